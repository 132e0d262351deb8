pub mod add_allergen;
pub mod get_profile;
pub mod update_profile;
