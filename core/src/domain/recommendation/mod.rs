pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{DishSuggestions, RecommendedDish, SafeDishRecommendations, ScreenedDish};
pub use ports::{DishRecommender, RecommendationService};
pub use value_objects::{RecommendSafeFoodsInput, RecommendationRequest};
