use std::sync::Arc;

use crate::domain::{
    allergen::{
        entities::AllergenVerdict, matching::AllergenPolicy, ports::AllergenEvaluator,
        value_objects::Ingredients,
    },
    common::CoreError,
};

/// Reference evaluator: pure keyword and synonym matching.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedAllergenEvaluator {
    policy: Arc<AllergenPolicy>,
}

impl RuleBasedAllergenEvaluator {
    pub fn new(policy: Arc<AllergenPolicy>) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AllergenPolicy {
        &self.policy
    }

    pub fn assess(&self, ingredients: &Ingredients, allergens: &[String]) -> AllergenVerdict {
        if allergens.is_empty() || ingredients.is_blank() {
            return AllergenVerdict::safe();
        }

        let text = ingredients.as_text();
        let mut detected: Vec<String> = Vec::new();

        for allergen in allergens {
            if detected.contains(allergen) {
                continue;
            }
            if self.policy.matcher(allergen).matches(&text) {
                detected.push(allergen.clone());
            }
        }

        AllergenVerdict::from_detected(detected, &self.policy)
    }
}

impl AllergenEvaluator for RuleBasedAllergenEvaluator {
    async fn evaluate(
        &self,
        ingredients: Ingredients,
        allergens: Vec<String>,
    ) -> Result<AllergenVerdict, CoreError> {
        Ok(self.assess(&ingredients, &allergens))
    }
}
