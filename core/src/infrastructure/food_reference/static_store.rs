use std::{collections::HashMap, path::Path};

use tracing::info;

use crate::domain::{
    common::CoreError,
    food_reference::{entities::FoodRecord, ports::FoodReferenceRepository},
};

const BUNDLED_FOODS: &str = include_str!("../../../data/foods.json");

/// Immutable dataset loaded once at startup. Lookups need no locking.
#[derive(Debug, Clone)]
pub struct StaticFoodReferenceStore {
    records: Vec<FoodRecord>,
    by_name: HashMap<String, usize>,
}

impl StaticFoodReferenceStore {
    pub fn bundled() -> Result<Self, CoreError> {
        Self::from_json(BUNDLED_FOODS)
    }

    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ReferenceData(format!("cannot read {}: {e}", path.display()))
        })?;
        let store = Self::from_json(&json)?;
        info!(path = %path.display(), foods = store.records.len(), "loaded food reference dataset");

        Ok(store)
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let records: Vec<FoodRecord> = serde_json::from_str(json)
            .map_err(|e| CoreError::ReferenceData(format!("invalid food dataset: {e}")))?;

        Self::from_records(records)
    }

    pub fn from_records(records: Vec<FoodRecord>) -> Result<Self, CoreError> {
        let mut by_name = HashMap::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let key = lookup_key(&record.name);
            if key.is_empty() {
                return Err(CoreError::ReferenceData(format!(
                    "food at position {index} has no name"
                )));
            }
            if by_name.insert(key, index).is_some() {
                return Err(CoreError::ReferenceData(format!(
                    "duplicate food name `{}`",
                    record.name
                )));
            }
        }

        Ok(Self { records, by_name })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FoodReferenceRepository for StaticFoodReferenceStore {
    fn lookup(&self, name: &str) -> Option<FoodRecord> {
        self.by_name
            .get(&lookup_key(name))
            .and_then(|&index| self.records.get(index))
            .cloned()
    }

    fn list(&self) -> Vec<FoodRecord> {
        self.records.clone()
    }
}

fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}
