use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Allergens offered as presets when editing a profile.
pub const COMMON_ALLERGENS: [&str; 12] = [
    "Peanuts",
    "Tree Nuts",
    "Milk (Dairy)",
    "Eggs",
    "Wheat (Gluten)",
    "Soy",
    "Fish",
    "Shellfish",
    "Sesame",
    "Corn",
    "Snails",
    "Agushi (Melon Seeds)",
];

/// The allergens and preferences declared for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AllergyProfile {
    allergens: Vec<String>,
    pub dietary_preferences: Option<String>,
    pub cuisine_preference: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Default for AllergyProfile {
    fn default() -> Self {
        Self::new(COMMON_ALLERGENS.iter().take(3).copied())
    }
}

impl AllergyProfile {
    pub fn new<I, S>(allergens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allergens: normalize_allergens(allergens),
            dietary_preferences: None,
            cuisine_preference: None,
            updated_at: Utc::now(),
        }
    }

    pub fn allergens(&self) -> &[String] {
        &self.allergens
    }

    pub fn replace_allergens<I, S>(&mut self, allergens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergens = normalize_allergens(allergens);
        self.updated_at = Utc::now();
    }

    /// Returns `false` when the label is blank or already present.
    pub fn add_allergen(&mut self, allergen: &str) -> bool {
        let allergen = allergen.trim();
        if allergen.is_empty() || self.allergens.iter().any(|a| a == allergen) {
            return false;
        }

        self.allergens.push(allergen.to_string());
        self.updated_at = Utc::now();
        true
    }

    pub fn set_preferences(
        &mut self,
        dietary_preferences: Option<String>,
        cuisine_preference: Option<String>,
    ) {
        if let Some(dietary) = dietary_preferences {
            self.dietary_preferences = non_blank(dietary);
        }
        if let Some(cuisine) = cuisine_preference {
            self.cuisine_preference = non_blank(cuisine);
        }
        self.updated_at = Utc::now();
    }
}

/// Trims entries, drops blanks and exact duplicates, keeps first-seen order.
pub fn normalize_allergens<I, S>(allergens: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut normalized: Vec<String> = Vec::new();

    for allergen in allergens {
        let allergen: String = allergen.into();
        let allergen = allergen.trim();
        if !allergen.is_empty() && !normalized.iter().any(|a| a == allergen) {
            normalized.push(allergen.to_string());
        }
    }

    normalized
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
