use serde_json::json;

pub fn classification_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "isFood": { "type": "boolean" },
            "classification": { "type": "string" },
            "confidence": { "type": "number" },
            "foodDetails": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "ingredients": {
                        "type": "array",
                        "items": { "type": "string" }
                    },
                    "nutritionalData": { "type": "string" },
                    "region": { "type": "string" },
                    "history": { "type": "string" },
                    "dataAiHint": { "type": "string" }
                },
                "required": ["name", "ingredients"]
            },
            "alternativeSuggestions": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["isFood", "classification", "confidence", "alternativeSuggestions"]
    })
}

pub fn text_extraction_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "extractedText": { "type": "string" }
        },
        "required": ["extractedText"]
    })
}

pub fn allergen_evaluation_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "allergenDetected": { "type": "boolean" },
            "alert": {
                "type": "string",
                "enum": ["HIGH", "MODERATE", "SAFE"]
            },
            "detectedAllergens": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["allergenDetected", "alert", "detectedAllergens"]
    })
}

pub fn recommendation_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "recommendations": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "description": { "type": "string" },
                        "reasoning": { "type": "string" },
                        "dataAiHint": { "type": "string" }
                    },
                    "required": ["name", "description", "reasoning", "dataAiHint"]
                }
            },
            "overallReasoning": { "type": "string" }
        },
        "required": ["recommendations", "overallReasoning"]
    })
}
