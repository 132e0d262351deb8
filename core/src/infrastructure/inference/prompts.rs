use crate::domain::recommendation::value_objects::RecommendationRequest;

pub const CLASSIFY_FOOD_PROMPT: &str = r#"You are an expert food classifier. You will identify the food item in the image and provide a confidence level (0-1) for your classification.

If the confidence level is below 0.7, suggest up to three alternative food item interpretations.
If the confidence level is 0.7 or above, return an empty list of alternative suggestions.

If the image does not show food, set isFood to false, set classification to "Not a food item", and leave foodDetails and alternativeSuggestions empty.

When you recognise the dish, fill foodDetails with its name, its typical ingredients, a short nutritional summary (nutritionalData), the region it comes from, a short history, and one or two keywords for illustrative imagery (dataAiHint).

Your output must be structured JSON only and conform to the requested schema."#;

pub const EXTRACT_TEXT_PROMPT: &str = r#"You read product labels. Transcribe the ingredient list printed on the label in the image, exactly as written, in extractedText.

If the label has no legible ingredient text, return an empty string. Do not guess ingredients that are not printed.

Your output must be structured JSON only and conform to the requested schema."#;

pub fn build_allergen_prompt(ingredients: &str, allergens: &[String]) -> String {
    format!(
        r#"You are an AI assistant specialized in detecting allergens in food ingredients.
Compare the following list of ingredients against the user's allergy profile to identify potential allergens.
Generate a risk alert indicating the severity of the risk (HIGH, MODERATE, or SAFE).

Ingredients: {ingredients}
Allergens: {allergens}

Output:
- allergenDetected: true if any of the user-specified allergens are present in the ingredients, false otherwise.
- alert: HIGH if multiple allergens are detected or if a critical allergen is detected, MODERATE if one allergen is detected, SAFE if no allergens are detected.
- detectedAllergens: array of allergens found in ingredients, spelled exactly as in the Allergens list."#,
        allergens = allergens.join(", "),
    )
}

pub fn build_recommendation_prompt(request: &RecommendationRequest) -> String {
    let allergens = if request.allergens.is_empty() {
        "none".to_string()
    } else {
        request.allergens.join(", ")
    };

    format!(
        r#"You are an AI food recommendation expert and creative chef. Your task is to recommend 3-5 delicious and safe dishes based on a user's allergy profile, dietary preferences, and nutrition goals.

User Profile:
- Allergens to avoid: {allergens}
- Dietary Preferences: {dietary}
- Nutrition Goals: {goals}
- Preferred Cuisine: {cuisine}

Your task:
1. Generate a list of 3 to 5 creative and appealing food recommendations that are safe for the user.
2. For each recommendation, provide a name, a short appetizing description, a reason why it's a good choice for the user, and a 1-2 word hint for imagery (dataAiHint).
3. Crucially, ensure that the typical ingredients of your recommended dishes DO NOT contain any of the user's allergens.
4. Provide a brief overallReasoning that summarizes your thought process for the recommendations as a whole.

Do not recommend simple ingredients (e.g., "apple"); recommend complete dishes (e.g., "Baked Apple with Cinnamon")."#,
        dietary = request.dietary_preferences.as_deref().unwrap_or("none"),
        goals = request.nutrition_goals.as_deref().unwrap_or("none"),
        cuisine = request.cuisine_preference.as_deref().unwrap_or("any"),
    )
}
