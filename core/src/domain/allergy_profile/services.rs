use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::{
    allergen::ports::AllergenEvaluator,
    allergy_profile::{
        entities::AllergyProfile,
        ports::{AllergyProfileRepository, AllergyProfileService},
        value_objects::UpdateAllergyProfileInput,
    },
    classification::ports::FoodClassifier,
    common::{CoreError, services::Service},
    food_reference::ports::FoodReferenceRepository,
    recommendation::ports::DishRecommender,
    text_extraction::ports::TextExtractor,
};

impl<FR, FC, TE, AE, AP, DR> AllergyProfileService for Service<FR, FC, TE, AE, AP, DR>
where
    FR: FoodReferenceRepository,
    FC: FoodClassifier,
    TE: TextExtractor,
    AE: AllergenEvaluator,
    AP: AllergyProfileRepository,
    DR: DishRecommender,
{
    async fn get_profile(&self, session_id: Uuid) -> Result<AllergyProfile, CoreError> {
        let profile = self.allergy_profile_repository.get(session_id).await?;
        Ok(profile.unwrap_or_default())
    }

    #[instrument(skip(self, input))]
    async fn update_profile(
        &self,
        session_id: Uuid,
        input: UpdateAllergyProfileInput,
    ) -> Result<AllergyProfile, CoreError> {
        let mut profile = self.get_profile(session_id).await?;

        if let Some(allergens) = input.allergens {
            profile.replace_allergens(allergens);
        }
        profile.set_preferences(input.dietary_preferences, input.cuisine_preference);

        debug!(allergens = profile.allergens().len(), "saving allergy profile");
        self.allergy_profile_repository
            .save(session_id, profile)
            .await
    }

    #[instrument(skip(self))]
    async fn add_custom_allergen(
        &self,
        session_id: Uuid,
        allergen: String,
    ) -> Result<AllergyProfile, CoreError> {
        if allergen.trim().is_empty() {
            return Err(CoreError::Invalid("allergen must not be blank".to_string()));
        }

        let mut profile = self.get_profile(session_id).await?;
        if !profile.add_allergen(&allergen) {
            debug!("allergen already present, profile unchanged");
            return Ok(profile);
        }

        self.allergy_profile_repository
            .save(session_id, profile)
            .await
    }
}
