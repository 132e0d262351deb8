use std::sync::Arc;

use tracing::info;

use crate::{
    domain::{
        allergen::{evaluator::RuleBasedAllergenEvaluator, matching::AllergenPolicy},
        common::{AllergenEvaluatorMode, AllerscanConfig, CoreError, services::Service},
    },
    infrastructure::{
        allergy_profile::InMemoryAllergyProfileRepository,
        food_reference::StaticFoodReferenceStore,
        inference::{
            ConfiguredAllergenEvaluator, LlmAllergenEvaluator, LlmDishRecommender,
            LlmFoodClassifier, LlmTextExtractor,
        },
        llm::GeminiLLMClient,
    },
};

pub type AllerscanService = Service<
    StaticFoodReferenceStore,
    LlmFoodClassifier<GeminiLLMClient>,
    LlmTextExtractor<GeminiLLMClient>,
    ConfiguredAllergenEvaluator<GeminiLLMClient>,
    InMemoryAllergyProfileRepository,
    LlmDishRecommender<GeminiLLMClient>,
>;

pub async fn create_service(config: AllerscanConfig) -> Result<AllerscanService, CoreError> {
    let food_reference_store = match &config.food_reference.dataset_path {
        Some(path) => StaticFoodReferenceStore::from_path(path)?,
        None => StaticFoodReferenceStore::bundled()?,
    };

    let policy = Arc::new(AllergenPolicy::with_critical_allergens(
        &config.allergen_policy.critical_allergens,
    ));
    let llm = Arc::new(GeminiLLMClient::from_config(&config.llm));

    let allergen_evaluator = match config.scan.allergen_evaluator {
        AllergenEvaluatorMode::RuleBased => ConfiguredAllergenEvaluator::RuleBased(
            RuleBasedAllergenEvaluator::new(Arc::clone(&policy)),
        ),
        AllergenEvaluatorMode::Inference => ConfiguredAllergenEvaluator::Inference(
            LlmAllergenEvaluator::new(Arc::clone(&llm), Arc::clone(&policy)),
        ),
    };

    info!(
        foods = food_reference_store.len(),
        evaluator = config.scan.allergen_evaluator.as_str(),
        critical = ?policy.critical_allergens().collect::<Vec<_>>(),
        model = %config.llm.gemini_model,
        "allerscan service initialised"
    );

    Ok(Service::new(
        food_reference_store,
        LlmFoodClassifier::new(Arc::clone(&llm)),
        LlmTextExtractor::new(Arc::clone(&llm)),
        allergen_evaluator,
        InMemoryAllergyProfileRepository::new(),
        LlmDishRecommender::new(llm),
        config.scan,
        policy,
    ))
}
