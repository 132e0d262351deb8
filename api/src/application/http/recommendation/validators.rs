use allerscan_core::domain::recommendation::value_objects::RecommendSafeFoodsInput;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecommendationValidator {
    #[serde(default)]
    #[validate(length(max = 500, message = "nutrition_goals is too long"))]
    pub nutrition_goals: Option<String>,

    /// Falls back to the profile's cuisine preference.
    #[serde(default)]
    #[validate(length(max = 100, message = "cuisine_preference is too long"))]
    pub cuisine_preference: Option<String>,
}

impl From<RecommendationValidator> for RecommendSafeFoodsInput {
    fn from(value: RecommendationValidator) -> Self {
        RecommendSafeFoodsInput {
            nutrition_goals: value.nutrition_goals,
            cuisine_preference: value.cuisine_preference,
        }
    }
}
