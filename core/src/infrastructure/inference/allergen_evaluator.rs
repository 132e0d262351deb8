use std::sync::Arc;

use tracing::instrument;

use crate::domain::{
    allergen::{
        entities::AllergenVerdict, evaluator::RuleBasedAllergenEvaluator,
        matching::AllergenPolicy, ports::AllergenEvaluator, value_objects::Ingredients,
    },
    common::CoreError,
    inference::ports::LLMClient,
};

use super::{
    payloads::{AllergenEvaluationPayload, parse_payload},
    prompts::build_allergen_prompt,
    schema::allergen_evaluation_schema,
    validation::reconcile_allergen_evaluation,
};

/// Lets the model decide which allergens occur; severity stays deterministic.
pub struct LlmAllergenEvaluator<L> {
    llm: Arc<L>,
    policy: Arc<AllergenPolicy>,
}

impl<L> LlmAllergenEvaluator<L> {
    pub fn new(llm: Arc<L>, policy: Arc<AllergenPolicy>) -> Self {
        Self { llm, policy }
    }
}

impl<L> AllergenEvaluator for LlmAllergenEvaluator<L>
where
    L: LLMClient,
{
    #[instrument(skip(self, ingredients, allergens), fields(allergens = allergens.len()))]
    async fn evaluate(
        &self,
        ingredients: Ingredients,
        allergens: Vec<String>,
    ) -> Result<AllergenVerdict, CoreError> {
        if allergens.is_empty() || ingredients.is_blank() {
            return Ok(AllergenVerdict::safe());
        }

        let text = ingredients.as_text();
        let prompt = build_allergen_prompt(&text, &allergens);
        let raw = self
            .llm
            .generate_with_text(prompt, allergen_evaluation_schema())
            .await?;

        let payload: AllergenEvaluationPayload = parse_payload(&raw)?;
        let verdict = reconcile_allergen_evaluation(payload, &text, &allergens, &self.policy)?;

        Ok(verdict)
    }
}

/// The evaluator selected by configuration.
pub enum ConfiguredAllergenEvaluator<L> {
    RuleBased(RuleBasedAllergenEvaluator),
    Inference(LlmAllergenEvaluator<L>),
}

impl<L> AllergenEvaluator for ConfiguredAllergenEvaluator<L>
where
    L: LLMClient,
{
    async fn evaluate(
        &self,
        ingredients: Ingredients,
        allergens: Vec<String>,
    ) -> Result<AllergenVerdict, CoreError> {
        match self {
            ConfiguredAllergenEvaluator::RuleBased(evaluator) => {
                evaluator.evaluate(ingredients, allergens).await
            }
            ConfiguredAllergenEvaluator::Inference(evaluator) => {
                evaluator.evaluate(ingredients, allergens).await
            }
        }
    }
}
