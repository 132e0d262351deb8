use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::food_reference::entities::FoodRecord;

/// Classification label used when the image does not show food.
pub const NOT_FOOD_SENTINEL: &str = "Not a food item";

/// Below this confidence the classifier must offer alternatives.
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.7;

pub const MAX_ALTERNATIVE_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassificationResult {
    pub is_food: bool,
    pub classification: String,
    /// Between 0 and 1.
    pub confidence: f64,
    pub alternative_suggestions: Vec<String>,
    /// Details supplied by the classifier itself, independent of the reference store.
    pub food_details: Option<FoodRecord>,
}

impl ClassificationResult {
    pub fn not_food(confidence: f64) -> Self {
        Self {
            is_food: false,
            classification: NOT_FOOD_SENTINEL.to_string(),
            confidence,
            alternative_suggestions: Vec::new(),
            food_details: None,
        }
    }

    pub fn is_low_confidence(&self) -> bool {
        self.confidence < LOW_CONFIDENCE_THRESHOLD
    }
}
