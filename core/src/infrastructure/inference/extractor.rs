use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::{
    common::CoreError, inference::ports::LLMClient, scan::entities::EncodedImage,
    text_extraction::ports::TextExtractor,
};

use super::{
    payloads::{TextExtractionPayload, parse_payload},
    prompts::EXTRACT_TEXT_PROMPT,
    schema::text_extraction_schema,
};

pub struct LlmTextExtractor<L> {
    llm: Arc<L>,
}

impl<L> LlmTextExtractor<L> {
    pub fn new(llm: Arc<L>) -> Self {
        Self { llm }
    }
}

impl<L> TextExtractor for LlmTextExtractor<L>
where
    L: LLMClient,
{
    #[instrument(skip(self, image), fields(image_sha256 = %image.sha256_hex()))]
    async fn extract_text(&self, image: EncodedImage) -> Result<String, CoreError> {
        let raw = self
            .llm
            .generate_with_image(
                EXTRACT_TEXT_PROMPT.to_string(),
                image,
                text_extraction_schema(),
            )
            .await?;

        let payload: TextExtractionPayload = parse_payload(&raw)?;
        let text = payload.extracted_text.trim().to_string();
        debug!(chars = text.len(), "label text extracted");

        Ok(text)
    }
}
