use std::{future::Future, sync::Arc};

use tracing::error;

use crate::domain::{
    allergen::{evaluator::RuleBasedAllergenEvaluator, matching::AllergenPolicy},
    common::{CoreError, InferenceFailure, ScanConfig},
    scan::tracker::ScanTracker,
};

pub struct Service<FR, FC, TE, AE, AP, DR> {
    pub(crate) food_reference_store: Arc<FR>,
    pub(crate) food_classifier: Arc<FC>,
    pub(crate) text_extractor: Arc<TE>,
    pub(crate) allergen_evaluator: Arc<AE>,
    pub(crate) allergy_profile_repository: Arc<AP>,
    pub(crate) dish_recommender: Arc<DR>,
    pub(crate) scan_tracker: Arc<ScanTracker>,
    pub(crate) scan_config: ScanConfig,
    /// Deterministic evaluator used to screen recommended dishes.
    pub(crate) screening: RuleBasedAllergenEvaluator,
}

impl<FR, FC, TE, AE, AP, DR> Clone for Service<FR, FC, TE, AE, AP, DR> {
    fn clone(&self) -> Self {
        Self {
            food_reference_store: Arc::clone(&self.food_reference_store),
            food_classifier: Arc::clone(&self.food_classifier),
            text_extractor: Arc::clone(&self.text_extractor),
            allergen_evaluator: Arc::clone(&self.allergen_evaluator),
            allergy_profile_repository: Arc::clone(&self.allergy_profile_repository),
            dish_recommender: Arc::clone(&self.dish_recommender),
            scan_tracker: Arc::clone(&self.scan_tracker),
            scan_config: self.scan_config.clone(),
            screening: self.screening.clone(),
        }
    }
}

impl<FR, FC, TE, AE, AP, DR> Service<FR, FC, TE, AE, AP, DR> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        food_reference_store: FR,
        food_classifier: FC,
        text_extractor: TE,
        allergen_evaluator: AE,
        allergy_profile_repository: AP,
        dish_recommender: DR,
        scan_config: ScanConfig,
        allergen_policy: Arc<AllergenPolicy>,
    ) -> Self {
        Self {
            food_reference_store: Arc::new(food_reference_store),
            food_classifier: Arc::new(food_classifier),
            text_extractor: Arc::new(text_extractor),
            allergen_evaluator: Arc::new(allergen_evaluator),
            allergy_profile_repository: Arc::new(allergy_profile_repository),
            dish_recommender: Arc::new(dish_recommender),
            scan_tracker: Arc::new(ScanTracker::default()),
            scan_config,
            screening: RuleBasedAllergenEvaluator::new(allergen_policy),
        }
    }

    pub fn scan_config(&self) -> &ScanConfig {
        &self.scan_config
    }

    /// Runs an adapter call under the configured inference timeout.
    pub(crate) async fn within_deadline<T, F>(
        &self,
        stage: &'static str,
        call: F,
    ) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        let Some(after) = self.scan_config.inference_timeout else {
            return call.await;
        };

        match tokio::time::timeout(after, call).await {
            Ok(result) => result,
            Err(_) => {
                error!(stage, timeout_ms = after.as_millis() as u64, "inference call timed out");
                Err(InferenceFailure::Timeout { stage, after }.into())
            }
        }
    }
}
