use serde::{Deserialize, de::DeserializeOwned};

use crate::domain::common::InferenceFailure;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationPayload {
    pub is_food: bool,
    pub classification: String,
    pub confidence: f64,
    #[serde(default)]
    pub food_details: Option<FoodDetailsPayload>,
    #[serde(default)]
    pub alternative_suggestions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodDetailsPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub nutritional_data: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub history: String,
    #[serde(default)]
    pub data_ai_hint: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextExtractionPayload {
    pub extracted_text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergenEvaluationPayload {
    pub allergen_detected: bool,
    pub alert: String,
    #[serde(default)]
    pub detected_allergens: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationPayload {
    pub recommendations: Vec<RecommendedFoodPayload>,
    #[serde(default)]
    pub overall_reasoning: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedFoodPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub data_ai_hint: String,
}

/// Parses a model reply, tolerating a surrounding Markdown code fence.
pub fn parse_payload<T: DeserializeOwned>(raw: &str) -> Result<T, InferenceFailure> {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(body.trim()).map_err(|e| InferenceFailure::InvalidPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_fenced_json() {
        let payload: TextExtractionPayload =
            parse_payload("```json\n{\"extractedText\": \"Sugar, salt\"}\n```").unwrap();
        assert_eq!(payload.extracted_text, "Sugar, salt");
    }

    #[test]
    fn missing_required_field_is_invalid() {
        let result: Result<ClassificationPayload, _> =
            parse_payload(r#"{"isFood": true, "classification": "Fufu"}"#);
        assert!(matches!(result, Err(InferenceFailure::InvalidPayload(_))));
    }
}
