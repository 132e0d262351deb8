use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::{
    classification::{entities::ClassificationResult, ports::FoodClassifier},
    common::CoreError,
    inference::ports::LLMClient,
    scan::entities::EncodedImage,
};

use super::{
    payloads::{ClassificationPayload, parse_payload},
    prompts::CLASSIFY_FOOD_PROMPT,
    schema::classification_schema,
    validation::validate_classification,
};

pub struct LlmFoodClassifier<L> {
    llm: Arc<L>,
}

impl<L> LlmFoodClassifier<L> {
    pub fn new(llm: Arc<L>) -> Self {
        Self { llm }
    }
}

impl<L> FoodClassifier for LlmFoodClassifier<L>
where
    L: LLMClient,
{
    #[instrument(skip(self, image), fields(image_sha256 = %image.sha256_hex()))]
    async fn classify(&self, image: EncodedImage) -> Result<ClassificationResult, CoreError> {
        let raw = self
            .llm
            .generate_with_image(
                CLASSIFY_FOOD_PROMPT.to_string(),
                image,
                classification_schema(),
            )
            .await?;

        let payload: ClassificationPayload = parse_payload(&raw)?;
        let result = validate_classification(payload)?;
        debug!(
            is_food = result.is_food,
            classification = %result.classification,
            confidence = result.confidence,
            "image classified"
        );

        Ok(result)
    }
}
