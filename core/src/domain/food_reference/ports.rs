use std::future::Future;

use crate::domain::{common::CoreError, food_reference::entities::FoodRecord};

/// Read-only dataset of known dishes.
#[cfg_attr(test, mockall::automock)]
pub trait FoodReferenceRepository: Send + Sync {
    /// Case-insensitive exact-name lookup. A miss is not an error.
    fn lookup(&self, name: &str) -> Option<FoodRecord>;

    fn list(&self) -> Vec<FoodRecord>;
}

pub trait FoodReferenceService: Send + Sync {
    fn get_food(&self, name: String) -> impl Future<Output = Result<FoodRecord, CoreError>> + Send;

    fn list_foods(&self) -> impl Future<Output = Result<Vec<FoodRecord>, CoreError>> + Send;
}
