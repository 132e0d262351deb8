use tracing::{info, instrument, warn};

use crate::domain::{
    allergen::{
        entities::{AllergenVerdict, RiskLevel},
        ports::AllergenEvaluator,
        value_objects::Ingredients,
    },
    allergy_profile::{ports::AllergyProfileRepository, value_objects::SessionContext},
    classification::ports::FoodClassifier,
    common::{CoreError, services::Service},
    food_reference::ports::FoodReferenceRepository,
    recommendation::{
        entities::{RecommendedDish, SafeDishRecommendations, ScreenedDish},
        ports::{DishRecommender, RecommendationService},
        value_objects::{RecommendSafeFoodsInput, RecommendationRequest},
    },
    text_extraction::ports::TextExtractor,
};

impl<FR, FC, TE, AE, AP, DR> Service<FR, FC, TE, AE, AP, DR>
where
    FR: FoodReferenceRepository,
{
    /// Checks the dish name, description and any known reference ingredients.
    fn screen_dish(&self, dish: &RecommendedDish, allergens: &[String]) -> AllergenVerdict {
        let mut text = format!("{}. {}", dish.name, dish.description);
        if let Some(reference) = self.food_reference_store.lookup(&dish.name) {
            text.push_str(". ");
            text.push_str(&reference.ingredients.join(", "));
        }

        self.screening.assess(&Ingredients::Text(text), allergens)
    }
}

impl<FR, FC, TE, AE, AP, DR> RecommendationService for Service<FR, FC, TE, AE, AP, DR>
where
    FR: FoodReferenceRepository,
    FC: FoodClassifier,
    TE: TextExtractor,
    AE: AllergenEvaluator,
    AP: AllergyProfileRepository,
    DR: DishRecommender,
{
    #[instrument(skip(self, context, input), fields(session_id = %context.session_id))]
    async fn recommend_safe_foods(
        &self,
        context: SessionContext,
        input: RecommendSafeFoodsInput,
    ) -> Result<SafeDishRecommendations, CoreError> {
        let allergens = context.profile.allergens().to_vec();
        let request = RecommendationRequest {
            allergens: allergens.clone(),
            dietary_preferences: context.profile.dietary_preferences.clone(),
            nutrition_goals: input.nutrition_goals.filter(|g| !g.trim().is_empty()),
            cuisine_preference: input
                .cuisine_preference
                .filter(|c| !c.trim().is_empty())
                .or_else(|| context.profile.cuisine_preference.clone()),
        };

        let suggestions = self
            .within_deadline("recommendation", self.dish_recommender.recommend(request))
            .await?;

        let mut recommendations = Vec::with_capacity(suggestions.recommendations.len());
        let mut screened_out = Vec::new();

        for dish in suggestions.recommendations {
            let verdict = self.screen_dish(&dish, &allergens);
            if verdict.risk_level == RiskLevel::Safe {
                recommendations.push(dish);
            } else {
                warn!(
                    dish = %dish.name,
                    risk_level = %verdict.risk_level,
                    "recommended dish failed allergen screening"
                );
                screened_out.push(ScreenedDish {
                    name: dish.name,
                    risk_level: verdict.risk_level,
                    detected_allergens: verdict.detected_allergens,
                });
            }
        }

        info!(
            kept = recommendations.len(),
            screened_out = screened_out.len(),
            "safe dish recommendations ready"
        );

        Ok(SafeDishRecommendations {
            recommendations,
            overall_reasoning: suggestions.overall_reasoning,
            screened_out,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use uuid::Uuid;

    use super::*;
    use crate::domain::{
        allergen::{matching::AllergenPolicy, ports::MockAllergenEvaluator},
        allergy_profile::{entities::AllergyProfile, ports::MockAllergyProfileRepository},
        classification::ports::MockFoodClassifier,
        common::ScanConfig,
        food_reference::{entities::FoodRecord, ports::MockFoodReferenceRepository},
        recommendation::entities::DishSuggestions,
        text_extraction::ports::MockTextExtractor,
    };

    #[derive(Default)]
    struct FakeRecommender {
        dishes: Vec<RecommendedDish>,
        seen: Mutex<Vec<RecommendationRequest>>,
    }

    impl DishRecommender for FakeRecommender {
        async fn recommend(
            &self,
            request: RecommendationRequest,
        ) -> Result<DishSuggestions, CoreError> {
            self.seen
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(request);
            Ok(DishSuggestions {
                recommendations: self.dishes.clone(),
                overall_reasoning: "Avoids your allergens".to_string(),
            })
        }
    }

    fn dish(name: &str, description: &str) -> RecommendedDish {
        RecommendedDish {
            name: name.to_string(),
            description: description.to_string(),
            reasoning: "Fits your profile".to_string(),
            image_hint: name.to_lowercase(),
        }
    }

    fn service(
        store: MockFoodReferenceRepository,
        recommender: FakeRecommender,
    ) -> Service<
        MockFoodReferenceRepository,
        MockFoodClassifier,
        MockTextExtractor,
        MockAllergenEvaluator,
        MockAllergyProfileRepository,
        FakeRecommender,
    > {
        Service::new(
            store,
            MockFoodClassifier::new(),
            MockTextExtractor::new(),
            MockAllergenEvaluator::new(),
            MockAllergyProfileRepository::new(),
            recommender,
            ScanConfig::default(),
            Arc::new(AllergenPolicy::default()),
        )
    }

    #[tokio::test]
    async fn unsafe_suggestions_are_screened_out() {
        let mut store = MockFoodReferenceRepository::new();
        store.expect_lookup().returning(|name| {
            (name == "Pad Thai").then(|| FoodRecord {
                name: "Pad Thai".to_string(),
                ingredients: vec!["Rice noodles".to_string(), "Peanuts".to_string()],
                nutritional_summary: String::new(),
                region: "Thailand".to_string(),
                history_note: String::new(),
                image_hint: "pad thai".to_string(),
            })
        });
        let recommender = FakeRecommender {
            dishes: vec![
                dish("Jollof Rice", "Smoky tomato rice with vegetables"),
                dish("Pad Thai", "Stir-fried rice noodles"),
                dish("Mac and Cheese", "Baked pasta in a cheese sauce"),
            ],
            ..Default::default()
        };
        let service = service(store, recommender);
        let context = SessionContext::new(
            Uuid::new_v4(),
            AllergyProfile::new(["Peanuts", "Milk (Dairy)"]),
        );

        let result = service
            .recommend_safe_foods(context, RecommendSafeFoodsInput::default())
            .await
            .unwrap();

        let kept: Vec<_> = result.recommendations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(kept, vec!["Jollof Rice"]);
        assert_eq!(result.screened_out.len(), 2);
        assert_eq!(result.screened_out[0].name, "Pad Thai");
        assert_eq!(result.screened_out[0].risk_level, RiskLevel::High);
        assert_eq!(result.screened_out[1].detected_allergens, vec!["Milk (Dairy)"]);
    }

    #[tokio::test]
    async fn profile_preferences_fill_missing_input() {
        let mut store = MockFoodReferenceRepository::new();
        store.expect_lookup().returning(|_| None);
        let service = service(store, FakeRecommender::default());

        let mut profile = AllergyProfile::new(["Soy"]);
        profile.set_preferences(Some("vegetarian".to_string()), Some("Ghanaian".to_string()));
        let context = SessionContext::new(Uuid::new_v4(), profile);

        service
            .recommend_safe_foods(
                context,
                RecommendSafeFoodsInput {
                    nutrition_goals: Some("high protein".to_string()),
                    cuisine_preference: Some("  ".to_string()),
                },
            )
            .await
            .unwrap();

        let seen = service.dish_recommender.seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            [RecommendationRequest {
                allergens: vec!["Soy".to_string()],
                dietary_preferences: Some("vegetarian".to_string()),
                nutrition_goals: Some("high protein".to_string()),
                cuisine_preference: Some("Ghanaian".to_string()),
            }]
        );
    }
}
