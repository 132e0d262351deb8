use allerscan_core::domain::allergen::value_objects::{CheckIngredientsInput, Ingredients};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CheckIngredientsValidator {
    /// Free-text label or a list of ingredient names.
    pub ingredients: Ingredients,

    /// Overrides the session profile when present.
    #[serde(default)]
    #[validate(length(max = 64, message = "at most 64 allergens per check"))]
    pub allergens: Option<Vec<String>>,
}

impl From<CheckIngredientsValidator> for CheckIngredientsInput {
    fn from(value: CheckIngredientsValidator) -> Self {
        CheckIngredientsInput {
            ingredients: value.ingredients,
            allergens: value.allergens,
        }
    }
}
