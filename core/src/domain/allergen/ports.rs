use std::future::Future;

use crate::domain::{
    allergen::{
        entities::AllergenVerdict,
        value_objects::{CheckIngredientsInput, Ingredients},
    },
    allergy_profile::value_objects::SessionContext,
    common::CoreError,
};

/// Decides which of the given allergens occur in the ingredients.
#[cfg_attr(test, mockall::automock)]
pub trait AllergenEvaluator: Send + Sync {
    fn evaluate(
        &self,
        ingredients: Ingredients,
        allergens: Vec<String>,
    ) -> impl Future<Output = Result<AllergenVerdict, CoreError>> + Send;
}

pub trait AllergenCheckService: Send + Sync {
    fn check_ingredients(
        &self,
        context: SessionContext,
        input: CheckIngredientsInput,
    ) -> impl Future<Output = Result<AllergenVerdict, CoreError>> + Send;
}
