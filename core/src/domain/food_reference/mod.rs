pub mod entities;
pub mod ports;
pub mod services;

pub use entities::FoodRecord;
pub use ports::{FoodReferenceRepository, FoodReferenceService};
