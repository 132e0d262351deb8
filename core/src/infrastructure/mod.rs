pub mod allergy_profile;
pub mod food_reference;
pub mod inference;
pub mod llm;
