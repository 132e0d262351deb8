use std::future::Future;

use crate::domain::{
    allergy_profile::value_objects::SessionContext,
    common::CoreError,
    recommendation::{
        entities::{DishSuggestions, SafeDishRecommendations},
        value_objects::{RecommendSafeFoodsInput, RecommendationRequest},
    },
};

/// Suggests complete dishes that should avoid the given allergens.
#[cfg_attr(test, mockall::automock)]
pub trait DishRecommender: Send + Sync {
    fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> impl Future<Output = Result<DishSuggestions, CoreError>> + Send;
}

pub trait RecommendationService: Send + Sync {
    fn recommend_safe_foods(
        &self,
        context: SessionContext,
        input: RecommendSafeFoodsInput,
    ) -> impl Future<Output = Result<SafeDishRecommendations, CoreError>> + Send;
}
