pub mod allergen;
pub mod allergy_profile;
pub mod classification;
pub mod common;
pub mod food_reference;
pub mod inference;
pub mod recommendation;
pub mod scan;
pub mod text_extraction;
