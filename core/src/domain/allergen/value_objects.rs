use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Ingredients as a free-text label or a structured list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Ingredients {
    Text(String),
    List(Vec<String>),
}

impl Ingredients {
    pub fn as_text(&self) -> String {
        match self {
            Ingredients::Text(text) => text.clone(),
            Ingredients::List(items) => items
                .iter()
                .map(|i| i.trim())
                .filter(|i| !i.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Ingredients::Text(text) => text.trim().is_empty(),
            Ingredients::List(items) => items.iter().all(|i| i.trim().is_empty()),
        }
    }
}

impl From<Vec<String>> for Ingredients {
    fn from(items: Vec<String>) -> Self {
        Ingredients::List(items)
    }
}

impl From<&str> for Ingredients {
    fn from(text: &str) -> Self {
        Ingredients::Text(text.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CheckIngredientsInput {
    pub ingredients: Ingredients,
    /// Falls back to the session profile when absent.
    pub allergens: Option<Vec<String>>,
}

/// Splits label text into individual ingredient entries.
pub fn split_ingredient_text(text: &str) -> Vec<String> {
    text.split([',', ';', '\n', '\r'])
        .map(|part| part.trim().trim_end_matches('.').trim())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
