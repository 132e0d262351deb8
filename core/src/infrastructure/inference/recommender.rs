use std::sync::Arc;

use tracing::instrument;

use crate::domain::{
    common::CoreError,
    inference::ports::LLMClient,
    recommendation::{
        entities::DishSuggestions, ports::DishRecommender, value_objects::RecommendationRequest,
    },
};

use super::{
    payloads::{RecommendationPayload, parse_payload},
    prompts::build_recommendation_prompt,
    schema::recommendation_schema,
    validation::validate_recommendations,
};

pub struct LlmDishRecommender<L> {
    llm: Arc<L>,
}

impl<L> LlmDishRecommender<L> {
    pub fn new(llm: Arc<L>) -> Self {
        Self { llm }
    }
}

impl<L> DishRecommender for LlmDishRecommender<L>
where
    L: LLMClient,
{
    #[instrument(skip(self, request))]
    async fn recommend(&self, request: RecommendationRequest) -> Result<DishSuggestions, CoreError> {
        let raw = self
            .llm
            .generate_with_text(
                build_recommendation_prompt(&request),
                recommendation_schema(),
            )
            .await?;

        let payload: RecommendationPayload = parse_payload(&raw)?;
        Ok(validate_recommendations(payload)?)
    }
}
