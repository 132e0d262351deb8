use tracing::debug;

use crate::domain::{
    allergen::ports::AllergenEvaluator,
    allergy_profile::ports::AllergyProfileRepository,
    classification::ports::FoodClassifier,
    common::{CoreError, services::Service},
    food_reference::{
        entities::FoodRecord,
        ports::{FoodReferenceRepository, FoodReferenceService},
    },
    recommendation::ports::DishRecommender,
    text_extraction::ports::TextExtractor,
};

impl<FR, FC, TE, AE, AP, DR> FoodReferenceService for Service<FR, FC, TE, AE, AP, DR>
where
    FR: FoodReferenceRepository,
    FC: FoodClassifier,
    TE: TextExtractor,
    AE: AllergenEvaluator,
    AP: AllergyProfileRepository,
    DR: DishRecommender,
{
    async fn get_food(&self, name: String) -> Result<FoodRecord, CoreError> {
        let record = self.food_reference_store.lookup(&name);
        debug!(food = %name, found = record.is_some(), "food reference lookup");
        record.ok_or(CoreError::NotFound)
    }

    async fn list_foods(&self) -> Result<Vec<FoodRecord>, CoreError> {
        Ok(self.food_reference_store.list())
    }
}
