use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::allergen::matching::AllergenPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    High,
    Moderate,
    Safe,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::Safe => "SAFE",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AllergenVerdict {
    pub allergen_detected: bool,
    pub risk_level: RiskLevel,
    /// Profile allergens found in the ingredients, in profile order and spelling.
    pub detected_allergens: Vec<String>,
}

impl AllergenVerdict {
    pub fn safe() -> Self {
        Self {
            allergen_detected: false,
            risk_level: RiskLevel::Safe,
            detected_allergens: Vec::new(),
        }
    }

    pub fn from_detected(detected_allergens: Vec<String>, policy: &AllergenPolicy) -> Self {
        let risk_level = policy.risk_level(&detected_allergens);

        Self {
            allergen_detected: !detected_allergens.is_empty(),
            risk_level,
            detected_allergens,
        }
    }
}
