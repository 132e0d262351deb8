pub mod entities;
pub mod evaluator;
pub mod matching;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use evaluator::RuleBasedAllergenEvaluator;
pub use matching::AllergenPolicy;
pub use ports::{AllergenCheckService, AllergenEvaluator};
pub use value_objects::*;
