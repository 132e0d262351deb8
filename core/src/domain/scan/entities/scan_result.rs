use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    allergen::entities::AllergenVerdict,
    classification::entities::ClassificationResult,
    common::generate_uuid_v7,
    food_reference::entities::FoodRecord,
    scan::entities::scan_state::{ScanMode, ScanState},
};

/// How a successful scan ended. Only `Assessed` carries a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScanOutcome {
    Assessed,
    NotFood,
    NoDetailAvailable,
    NoTextExtracted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScanResult {
    pub id: Uuid,
    pub mode: ScanMode,
    pub outcome: ScanOutcome,
    /// Set in food mode.
    pub classification: Option<ClassificationResult>,
    /// Set in label mode.
    pub extracted_text: Option<String>,
    pub food_details: Option<FoodRecord>,
    pub ingredients: Vec<String>,
    pub verdict: Option<AllergenVerdict>,
    pub stages: Vec<ScanState>,
    pub created_at: DateTime<Utc>,
}

impl ScanResult {
    fn base(mode: ScanMode, outcome: ScanOutcome, stages: Vec<ScanState>) -> Self {
        Self {
            id: generate_uuid_v7(),
            mode,
            outcome,
            classification: None,
            extracted_text: None,
            food_details: None,
            ingredients: Vec::new(),
            verdict: None,
            stages,
            created_at: Utc::now(),
        }
    }

    pub fn not_food(classification: ClassificationResult, stages: Vec<ScanState>) -> Self {
        Self {
            classification: Some(classification),
            ..Self::base(ScanMode::Food, ScanOutcome::NotFood, stages)
        }
    }

    /// `food_details` may still carry descriptive data without ingredients.
    pub fn no_detail_available(
        classification: ClassificationResult,
        food_details: Option<FoodRecord>,
        stages: Vec<ScanState>,
    ) -> Self {
        Self {
            classification: Some(classification),
            food_details,
            ..Self::base(ScanMode::Food, ScanOutcome::NoDetailAvailable, stages)
        }
    }

    pub fn assessed_food(
        classification: ClassificationResult,
        food_details: FoodRecord,
        verdict: AllergenVerdict,
        stages: Vec<ScanState>,
    ) -> Self {
        Self {
            classification: Some(classification),
            ingredients: food_details.ingredients.clone(),
            food_details: Some(food_details),
            verdict: Some(verdict),
            ..Self::base(ScanMode::Food, ScanOutcome::Assessed, stages)
        }
    }

    pub fn no_text_extracted(extracted_text: String, stages: Vec<ScanState>) -> Self {
        Self {
            extracted_text: Some(extracted_text),
            ..Self::base(ScanMode::Label, ScanOutcome::NoTextExtracted, stages)
        }
    }

    pub fn assessed_label(
        extracted_text: String,
        ingredients: Vec<String>,
        verdict: AllergenVerdict,
        stages: Vec<ScanState>,
    ) -> Self {
        Self {
            extracted_text: Some(extracted_text),
            ingredients,
            verdict: Some(verdict),
            ..Self::base(ScanMode::Label, ScanOutcome::Assessed, stages)
        }
    }
}
