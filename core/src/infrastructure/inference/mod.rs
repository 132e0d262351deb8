pub mod allergen_evaluator;
pub mod classifier;
pub mod extractor;
pub mod payloads;
pub mod prompts;
pub mod recommender;
pub mod schema;
pub mod validation;

pub use allergen_evaluator::{ConfiguredAllergenEvaluator, LlmAllergenEvaluator};
pub use classifier::LlmFoodClassifier;
pub use extractor::LlmTextExtractor;
pub use recommender::LlmDishRecommender;
