//! Turns raw provider payloads into domain values, rejecting output that
//! breaks the classifier contract.

use tracing::{debug, warn};

use crate::domain::{
    allergen::{
        entities::AllergenVerdict,
        matching::{AllergenMatcher, AllergenPolicy, base_terms, normalize_term},
    },
    classification::entities::{
        ClassificationResult, MAX_ALTERNATIVE_SUGGESTIONS, NOT_FOOD_SENTINEL,
    },
    common::InferenceFailure,
    food_reference::entities::FoodRecord,
    recommendation::entities::{DishSuggestions, RecommendedDish},
};

use super::payloads::{
    AllergenEvaluationPayload, ClassificationPayload, FoodDetailsPayload, RecommendationPayload,
};

pub fn validate_classification(
    payload: ClassificationPayload,
) -> Result<ClassificationResult, InferenceFailure> {
    let confidence = payload.confidence;
    if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
        return Err(InferenceFailure::InvalidPayload(format!(
            "confidence {confidence} is outside [0, 1]"
        )));
    }

    let classification = payload.classification.trim().to_string();
    if !payload.is_food || classification.eq_ignore_ascii_case(NOT_FOOD_SENTINEL) {
        return Ok(ClassificationResult::not_food(confidence));
    }
    if classification.is_empty() {
        return Err(InferenceFailure::InvalidPayload(
            "classification is empty".to_string(),
        ));
    }

    let mut result = ClassificationResult {
        is_food: true,
        food_details: payload
            .food_details
            .map(|details| food_record(details, &classification)),
        classification,
        confidence,
        alternative_suggestions: Vec::new(),
    };

    if result.is_low_confidence() {
        let mut alternatives: Vec<String> = Vec::new();
        for suggestion in payload.alternative_suggestions {
            let suggestion = suggestion.trim();
            if !suggestion.is_empty()
                && !alternatives
                    .iter()
                    .any(|a| a.eq_ignore_ascii_case(suggestion))
            {
                alternatives.push(suggestion.to_string());
            }
        }
        alternatives.truncate(MAX_ALTERNATIVE_SUGGESTIONS);

        if alternatives.is_empty() {
            return Err(InferenceFailure::InvalidPayload(format!(
                "confidence {confidence} requires alternative suggestions"
            )));
        }
        result.alternative_suggestions = alternatives;
    }

    Ok(result)
}

fn food_record(details: FoodDetailsPayload, classification: &str) -> FoodRecord {
    let name = details.name.trim();

    FoodRecord {
        name: if name.is_empty() {
            classification.to_string()
        } else {
            name.to_string()
        },
        ingredients: details
            .ingredients
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect(),
        nutritional_summary: details.nutritional_data,
        region: details.region,
        history_note: details.history,
        image_hint: details.data_ai_hint,
    }
}

/// Maps provider-detected allergens back onto the requested labels and
/// recomputes severity with the deterministic policy.
///
/// A reported entry counts for every label it names, whether spelled as the
/// label, one of its base terms, or an ingredient or synonym the label's
/// matcher recognises. A reply claiming a detection that reconciles to no
/// label falls back to matching the ingredient text; if that finds nothing
/// either, the reply is rejected rather than read as SAFE.
pub fn reconcile_allergen_evaluation(
    payload: AllergenEvaluationPayload,
    ingredients: &str,
    allergens: &[String],
    policy: &AllergenPolicy,
) -> Result<AllergenVerdict, InferenceFailure> {
    let matchers: Vec<AllergenMatcher> = allergens.iter().map(|a| policy.matcher(a)).collect();
    let mut matched = vec![false; allergens.len()];

    for reported in &payload.detected_allergens {
        let mut known = false;
        for (hit, matcher) in matched.iter_mut().zip(&matchers) {
            if refers_to(reported, matcher) {
                *hit = true;
                known = true;
            }
        }
        if !known {
            warn!(allergen = %reported, "provider reported an allergen outside the profile");
        }
    }

    if payload.allergen_detected && !matched.contains(&true) {
        warn!(
            reported = ?payload.detected_allergens,
            "provider detection did not reconcile, matching ingredient text"
        );
        for (hit, matcher) in matched.iter_mut().zip(&matchers) {
            *hit = matcher.matches(ingredients);
        }
        if !matched.contains(&true) {
            return Err(InferenceFailure::InvalidPayload(
                "provider reported allergens that match none of the requested labels".to_string(),
            ));
        }
    }

    let detected: Vec<String> = allergens
        .iter()
        .zip(matched)
        .filter_map(|(allergen, hit)| hit.then(|| allergen.clone()))
        .collect();

    let verdict = AllergenVerdict::from_detected(detected, policy);
    if !payload.alert.eq_ignore_ascii_case(verdict.risk_level.as_str())
        || payload.allergen_detected != verdict.allergen_detected
    {
        debug!(
            provider_alert = %payload.alert,
            risk_level = %verdict.risk_level,
            "provider severity overridden"
        );
    }

    Ok(verdict)
}

fn refers_to(reported: &str, matcher: &AllergenMatcher) -> bool {
    let reported = reported.trim();
    if reported.is_empty() {
        return false;
    }
    if reported.eq_ignore_ascii_case(matcher.allergen().trim()) {
        return true;
    }

    base_terms(matcher.allergen()).contains(&normalize_term(reported)) || matcher.matches(reported)
}

pub fn validate_recommendations(
    payload: RecommendationPayload,
) -> Result<DishSuggestions, InferenceFailure> {
    let recommendations: Vec<RecommendedDish> = payload
        .recommendations
        .into_iter()
        .filter(|dish| !dish.name.trim().is_empty())
        .map(|dish| RecommendedDish {
            name: dish.name.trim().to_string(),
            description: dish.description,
            reasoning: dish.reasoning,
            image_hint: dish.data_ai_hint,
        })
        .collect();

    if recommendations.is_empty() {
        return Err(InferenceFailure::InvalidPayload(
            "no dishes recommended".to_string(),
        ));
    }

    Ok(DishSuggestions {
        recommendations,
        overall_reasoning: payload.overall_reasoning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::allergen::entities::RiskLevel;

    fn classification(confidence: f64, alternatives: &[&str]) -> ClassificationPayload {
        ClassificationPayload {
            is_food: true,
            classification: "Banku".to_string(),
            confidence,
            food_details: None,
            alternative_suggestions: alternatives.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn low_confidence_keeps_at_most_three_alternatives() {
        let result = validate_classification(classification(
            0.4,
            &["Kenkey", "Fufu", "kenkey", "Tuo Zaafi", "Akple"],
        ))
        .unwrap();

        assert_eq!(
            result.alternative_suggestions,
            vec!["Kenkey", "Fufu", "Tuo Zaafi"]
        );
    }

    #[test]
    fn low_confidence_without_alternatives_is_invalid() {
        assert!(matches!(
            validate_classification(classification(0.4, &[])),
            Err(InferenceFailure::InvalidPayload(_))
        ));
    }

    #[test]
    fn high_confidence_clears_alternatives() {
        let result = validate_classification(classification(0.9, &["Kenkey"])).unwrap();
        assert!(result.alternative_suggestions.is_empty());
    }

    #[test]
    fn confidence_out_of_range_is_invalid() {
        for confidence in [-0.1, 1.5, f64::NAN] {
            assert!(validate_classification(classification(confidence, &["Fufu"])).is_err());
        }
    }

    #[test]
    fn not_food_is_normalised() {
        let payload = ClassificationPayload {
            is_food: false,
            classification: "A laptop".to_string(),
            confidence: 0.97,
            food_details: Some(FoodDetailsPayload {
                name: "Laptop".to_string(),
                ingredients: vec!["Aluminium".to_string()],
                nutritional_data: String::new(),
                region: String::new(),
                history: String::new(),
                data_ai_hint: String::new(),
            }),
            alternative_suggestions: vec!["Tablet".to_string()],
        };

        let result = validate_classification(payload).unwrap();
        assert_eq!(result, ClassificationResult::not_food(0.97));
    }

    fn evaluation(detected: bool, alert: &str, reported: &[&str]) -> AllergenEvaluationPayload {
        AllergenEvaluationPayload {
            allergen_detected: detected,
            alert: alert.to_string(),
            detected_allergens: reported.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn provider_allergens_are_mapped_to_profile_labels() {
        let allergens = vec!["Milk (Dairy)".to_string(), "Peanuts".to_string()];

        let verdict = reconcile_allergen_evaluation(
            evaluation(true, "MODERATE", &["peanut", "Mustard"]),
            "Peanuts, sugar",
            &allergens,
            &AllergenPolicy::default(),
        )
        .unwrap();

        assert_eq!(verdict.detected_allergens, vec!["Peanuts"]);
        assert_eq!(verdict.risk_level, RiskLevel::High);
    }

    #[test]
    fn synonyms_and_ingredients_reported_by_the_provider_count() {
        let allergens = vec!["Milk (Dairy)".to_string(), "Shellfish".to_string()];

        let verdict = reconcile_allergen_evaluation(
            evaluation(true, "MODERATE", &["Cheese"]),
            "Romaine lettuce, parmesan cheese",
            &allergens,
            &AllergenPolicy::default(),
        )
        .unwrap();

        assert!(verdict.allergen_detected);
        assert_eq!(verdict.detected_allergens, vec!["Milk (Dairy)"]);
        assert_eq!(verdict.risk_level, RiskLevel::Moderate);

        let verdict = reconcile_allergen_evaluation(
            evaluation(true, "HIGH", &["Shrimp (shellfish)"]),
            "Rice noodles, shrimp",
            &allergens,
            &AllergenPolicy::default(),
        )
        .unwrap();

        assert_eq!(verdict.detected_allergens, vec!["Shellfish"]);
        assert_eq!(verdict.risk_level, RiskLevel::High);
    }

    #[test]
    fn unreconciled_detection_falls_back_to_ingredient_matching() {
        let allergens = vec!["Eggs".to_string(), "Soy".to_string()];

        let verdict = reconcile_allergen_evaluation(
            evaluation(true, "MODERATE", &["Something odd"]),
            "Tofu, scrambled egg",
            &allergens,
            &AllergenPolicy::default(),
        )
        .unwrap();

        assert_eq!(verdict.detected_allergens, vec!["Eggs", "Soy"]);
        assert_eq!(verdict.risk_level, RiskLevel::High);
    }

    #[test]
    fn contradictory_detection_is_invalid() {
        let allergens = vec!["Sesame".to_string()];

        let result = reconcile_allergen_evaluation(
            evaluation(true, "MODERATE", &[]),
            "Rice, water, salt",
            &allergens,
            &AllergenPolicy::default(),
        );

        assert!(matches!(result, Err(InferenceFailure::InvalidPayload(_))));
    }

    #[test]
    fn clean_reply_stays_safe() {
        let allergens = vec!["Sesame".to_string()];

        let verdict = reconcile_allergen_evaluation(
            evaluation(false, "SAFE", &[]),
            "Rice, water, salt",
            &allergens,
            &AllergenPolicy::default(),
        )
        .unwrap();

        assert_eq!(verdict, AllergenVerdict::safe());
    }

    #[test]
    fn empty_recommendations_are_invalid() {
        let payload = RecommendationPayload {
            recommendations: Vec::new(),
            overall_reasoning: "Nothing fits".to_string(),
        };
        assert!(validate_recommendations(payload).is_err());
    }
}
