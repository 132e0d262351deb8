use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::allergen::entities::RiskLevel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecommendedDish {
    pub name: String,
    pub description: String,
    pub reasoning: String,
    /// Keyword used to pick illustrative imagery.
    pub image_hint: String,
}

/// Raw output of a [`DishRecommender`](super::ports::DishRecommender), before screening.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DishSuggestions {
    pub recommendations: Vec<RecommendedDish>,
    pub overall_reasoning: String,
}

/// A suggested dish removed because the deterministic check flagged it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScreenedDish {
    pub name: String,
    pub risk_level: RiskLevel,
    pub detected_allergens: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SafeDishRecommendations {
    pub recommendations: Vec<RecommendedDish>,
    pub overall_reasoning: String,
    pub screened_out: Vec<ScreenedDish>,
}
