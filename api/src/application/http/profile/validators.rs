use allerscan_core::domain::allergy_profile::value_objects::UpdateAllergyProfileInput;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileValidator {
    /// Replaces the whole allergen list when present.
    #[serde(default)]
    #[validate(length(max = 64, message = "at most 64 allergens per profile"))]
    pub allergens: Option<Vec<String>>,

    /// An empty string clears the stored value.
    #[serde(default)]
    #[validate(length(max = 500, message = "dietary_preferences is too long"))]
    pub dietary_preferences: Option<String>,

    #[serde(default)]
    #[validate(length(max = 100, message = "cuisine_preference is too long"))]
    pub cuisine_preference: Option<String>,
}

impl From<UpdateProfileValidator> for UpdateAllergyProfileInput {
    fn from(value: UpdateProfileValidator) -> Self {
        UpdateAllergyProfileInput {
            allergens: value.allergens,
            dietary_preferences: value.dietary_preferences,
            cuisine_preference: value.cuisine_preference,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddAllergenValidator {
    #[validate(length(min = 1, max = 100, message = "allergen is required"))]
    pub allergen: String,
}
