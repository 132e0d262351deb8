use std::{path::PathBuf, str::FromStr, time::Duration};

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

pub use entities::app_errors::{CoreError, InferenceFailure, PreconditionError};

#[derive(Clone, Debug)]
pub struct AllerscanConfig {
    pub llm: LLMConfig,
    pub scan: ScanConfig,
    pub allergen_policy: AllergenPolicyConfig,
    pub food_reference: FoodReferenceConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

#[derive(Clone, Debug)]
pub struct ScanConfig {
    /// Deadline applied to every inference call. `None` waits indefinitely.
    pub inference_timeout: Option<Duration>,
    pub allergen_evaluator: AllergenEvaluatorMode,
    pub max_image_bytes: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            inference_timeout: Some(Duration::from_secs(30)),
            allergen_evaluator: AllergenEvaluatorMode::RuleBased,
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Selects which allergen evaluator backs the scan pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AllergenEvaluatorMode {
    #[default]
    RuleBased,
    Inference,
}

impl AllergenEvaluatorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllergenEvaluatorMode::RuleBased => "rule-based",
            AllergenEvaluatorMode::Inference => "inference",
        }
    }
}

impl FromStr for AllergenEvaluatorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rule-based" | "rule_based" | "rules" => Ok(AllergenEvaluatorMode::RuleBased),
            "inference" | "llm" => Ok(AllergenEvaluatorMode::Inference),
            other => Err(format!(
                "unknown allergen evaluator `{other}`, expected `rule-based` or `inference`"
            )),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AllergenPolicyConfig {
    pub critical_allergens: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub struct FoodReferenceConfig {
    /// JSON dataset to load instead of the bundled one.
    pub dataset_path: Option<PathBuf>,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
