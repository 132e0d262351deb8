pub mod recommend_safe_foods;
