pub mod check_ingredients;
pub mod get_common_allergens;
