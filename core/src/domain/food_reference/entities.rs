use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reference information about a dish, keyed by its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FoodRecord {
    pub name: String,
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub nutritional_summary: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub history_note: String,
    /// Keyword used to pick illustrative imagery.
    #[serde(default)]
    pub image_hint: String,
}

impl FoodRecord {
    pub fn has_ingredients(&self) -> bool {
        self.ingredients.iter().any(|i| !i.trim().is_empty())
    }
}
