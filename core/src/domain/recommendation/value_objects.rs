use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendSafeFoodsInput {
    pub nutrition_goals: Option<String>,
    /// Falls back to the profile's cuisine preference.
    pub cuisine_preference: Option<String>,
}

/// Everything a recommender needs to know about the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecommendationRequest {
    pub allergens: Vec<String>,
    pub dietary_preferences: Option<String>,
    pub nutrition_goals: Option<String>,
    pub cuisine_preference: Option<String>,
}
