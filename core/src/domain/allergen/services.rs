use tracing::{info, instrument};

use crate::domain::{
    allergen::{
        entities::AllergenVerdict,
        ports::{AllergenCheckService, AllergenEvaluator},
        value_objects::CheckIngredientsInput,
    },
    allergy_profile::{
        entities::normalize_allergens, ports::AllergyProfileRepository,
        value_objects::SessionContext,
    },
    classification::ports::FoodClassifier,
    common::{CoreError, PreconditionError, services::Service},
    food_reference::ports::FoodReferenceRepository,
    recommendation::ports::DishRecommender,
    text_extraction::ports::TextExtractor,
};

impl<FR, FC, TE, AE, AP, DR> AllergenCheckService for Service<FR, FC, TE, AE, AP, DR>
where
    FR: FoodReferenceRepository,
    FC: FoodClassifier,
    TE: TextExtractor,
    AE: AllergenEvaluator,
    AP: AllergyProfileRepository,
    DR: DishRecommender,
{
    #[instrument(skip(self, context, input), fields(session_id = %context.session_id))]
    async fn check_ingredients(
        &self,
        context: SessionContext,
        input: CheckIngredientsInput,
    ) -> Result<AllergenVerdict, CoreError> {
        if input.ingredients.is_blank() {
            return Err(PreconditionError::EmptyIngredients.into());
        }

        let allergens = match input.allergens {
            Some(explicit) => normalize_allergens(explicit),
            None => context.profile.allergens().to_vec(),
        };

        if allergens.is_empty() {
            return Err(PreconditionError::EmptyAllergenSet.into());
        }

        let verdict = self
            .within_deadline(
                "allergen evaluation",
                self.allergen_evaluator.evaluate(input.ingredients, allergens),
            )
            .await?;

        info!(
            risk_level = %verdict.risk_level,
            detected = verdict.detected_allergens.len(),
            "ingredient check completed"
        );

        Ok(verdict)
    }
}
