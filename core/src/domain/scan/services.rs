use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::{
    allergen::{
        ports::AllergenEvaluator,
        value_objects::{Ingredients, split_ingredient_text},
    },
    allergy_profile::{ports::AllergyProfileRepository, value_objects::SessionContext},
    classification::ports::FoodClassifier,
    common::{CoreError, PreconditionError, services::Service},
    food_reference::{entities::FoodRecord, ports::FoodReferenceRepository},
    recommendation::ports::DishRecommender,
    scan::{
        entities::{EncodedImage, ScanMode, ScanResult, ScanState, ScanStateMachine},
        ports::ScanService,
        tracker::ScanTicket,
        value_objects::ScanImageInput,
    },
    text_extraction::ports::TextExtractor,
};

impl<FR, FC, TE, AE, AP, DR> Service<FR, FC, TE, AE, AP, DR> {
    /// Rejects missing, empty and oversized images before any adapter call.
    fn accept_image(&self, input: ScanImageInput) -> Result<EncodedImage, CoreError> {
        let image = input.image.ok_or(PreconditionError::MissingImage)?;
        if image.is_empty() {
            return Err(PreconditionError::EmptyImage.into());
        }
        image.ensure_within(self.scan_config.max_image_bytes)?;

        Ok(image)
    }
}

impl<FR, FC, TE, AE, AP, DR> Service<FR, FC, TE, AE, AP, DR>
where
    FR: FoodReferenceRepository,
    FC: FoodClassifier,
    TE: TextExtractor,
    AE: AllergenEvaluator,
    AP: AllergyProfileRepository,
    DR: DishRecommender,
{
    async fn run_food_scan(
        &self,
        context: &SessionContext,
        image: EncodedImage,
        ticket: &ScanTicket,
        machine: &mut ScanStateMachine,
    ) -> Result<ScanResult, CoreError> {
        machine.transition(ScanState::Classifying)?;
        let classification = self
            .within_deadline("classification", self.food_classifier.classify(image))
            .await?;
        ticket.ensure_current()?;

        if !classification.is_food {
            machine.transition(ScanState::NotFood)?;
            info!("scan finished: image is not food");
            return Ok(ScanResult::not_food(
                classification,
                machine.visited().to_vec(),
            ));
        }

        machine.transition(ScanState::LookingUpDetails)?;
        let supplied = classification.food_details.clone();
        let details = match supplied.clone().filter(FoodRecord::has_ingredients) {
            Some(details) => Some(details),
            None => {
                debug!(food = %classification.classification, "looking up reference details");
                self.food_reference_store
                    .lookup(&classification.classification)
                    .filter(FoodRecord::has_ingredients)
            }
        };

        let Some(details) = details else {
            machine.transition(ScanState::Done)?;
            info!(food = %classification.classification, "scan finished: no detail available");
            return Ok(ScanResult::no_detail_available(
                classification,
                supplied,
                machine.visited().to_vec(),
            ));
        };

        machine.transition(ScanState::Evaluating)?;
        let verdict = self
            .within_deadline(
                "allergen evaluation",
                self.allergen_evaluator.evaluate(
                    Ingredients::List(details.ingredients.clone()),
                    context.profile.allergens().to_vec(),
                ),
            )
            .await?;
        ticket.ensure_current()?;

        machine.transition(ScanState::Done)?;
        info!(
            food = %classification.classification,
            risk_level = %verdict.risk_level,
            "scan finished: assessed"
        );

        Ok(ScanResult::assessed_food(
            classification,
            details,
            verdict,
            machine.visited().to_vec(),
        ))
    }

    async fn run_label_scan(
        &self,
        context: &SessionContext,
        image: EncodedImage,
        ticket: &ScanTicket,
        machine: &mut ScanStateMachine,
    ) -> Result<ScanResult, CoreError> {
        machine.transition(ScanState::Extracting)?;
        let extracted_text = self
            .within_deadline("text extraction", self.text_extractor.extract_text(image))
            .await?;
        ticket.ensure_current()?;

        let ingredients = split_ingredient_text(&extracted_text);
        if ingredients.is_empty() {
            machine.transition(ScanState::Done)?;
            info!("scan finished: no text extracted");
            return Ok(ScanResult::no_text_extracted(
                extracted_text,
                machine.visited().to_vec(),
            ));
        }

        machine.transition(ScanState::Evaluating)?;
        let verdict = self
            .within_deadline(
                "allergen evaluation",
                self.allergen_evaluator.evaluate(
                    Ingredients::Text(extracted_text.clone()),
                    context.profile.allergens().to_vec(),
                ),
            )
            .await?;
        ticket.ensure_current()?;

        machine.transition(ScanState::Done)?;
        info!(risk_level = %verdict.risk_level, "scan finished: assessed");

        Ok(ScanResult::assessed_label(
            extracted_text,
            ingredients,
            verdict,
            machine.visited().to_vec(),
        ))
    }

    async fn run_scan(
        &self,
        mode: ScanMode,
        context: SessionContext,
        input: ScanImageInput,
    ) -> Result<ScanResult, CoreError> {
        let image = self.accept_image(input)?;
        info!(
            image_sha256 = %image.sha256_hex(),
            mime_type = image.mime_type(),
            bytes = image.len(),
            "scan started"
        );

        let ticket = self.scan_tracker.begin(context.session_id);
        let mut machine = ScanStateMachine::new(mode);

        let result = match mode {
            ScanMode::Food => {
                self.run_food_scan(&context, image, &ticket, &mut machine)
                    .await
            }
            ScanMode::Label => {
                self.run_label_scan(&context, image, &ticket, &mut machine)
                    .await
            }
        };

        match result {
            Err(CoreError::ScanCancelled) => {
                warn!(state = %machine.current(), "scan superseded, result discarded");
                Err(CoreError::ScanCancelled)
            }
            Err(e) => {
                let state = machine.current();
                machine.fail();
                error!(state = %state, error = %e, "scan failed");
                Err(e)
            }
            Ok(result) => Ok(result),
        }
    }
}

impl<FR, FC, TE, AE, AP, DR> ScanService for Service<FR, FC, TE, AE, AP, DR>
where
    FR: FoodReferenceRepository,
    FC: FoodClassifier,
    TE: TextExtractor,
    AE: AllergenEvaluator,
    AP: AllergyProfileRepository,
    DR: DishRecommender,
{
    #[instrument(skip(self, context, input), fields(session_id = %context.session_id, mode = "food"))]
    async fn scan_food(
        &self,
        context: SessionContext,
        input: ScanImageInput,
    ) -> Result<ScanResult, CoreError> {
        self.run_scan(ScanMode::Food, context, input).await
    }

    #[instrument(skip(self, context, input), fields(session_id = %context.session_id, mode = "label"))]
    async fn scan_label(
        &self,
        context: SessionContext,
        input: ScanImageInput,
    ) -> Result<ScanResult, CoreError> {
        self.run_scan(ScanMode::Label, context, input).await
    }

    fn cancel_scan(&self, session_id: Uuid) -> bool {
        let pending = self.scan_tracker.cancel(session_id);
        info!(%session_id, pending, "scan cancelled");
        pending
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use uuid::Uuid;

    use super::*;
    use crate::domain::{
        allergen::{
            entities::{AllergenVerdict, RiskLevel},
            evaluator::RuleBasedAllergenEvaluator,
            matching::AllergenPolicy,
            ports::MockAllergenEvaluator,
        },
        allergy_profile::{entities::AllergyProfile, ports::MockAllergyProfileRepository},
        classification::{entities::ClassificationResult, ports::MockFoodClassifier},
        common::{InferenceFailure, ScanConfig},
        recommendation::ports::MockDishRecommender,
        scan::entities::ScanOutcome,
    };

    struct FakeStore(Vec<FoodRecord>);

    impl FoodReferenceRepository for FakeStore {
        fn lookup(&self, name: &str) -> Option<FoodRecord> {
            self.0
                .iter()
                .find(|r| r.name.eq_ignore_ascii_case(name.trim()))
                .cloned()
        }

        fn list(&self) -> Vec<FoodRecord> {
            self.0.clone()
        }
    }

    struct ScriptedClassifier {
        result: Result<ClassificationResult, CoreError>,
        delay: Duration,
    }

    impl FoodClassifier for ScriptedClassifier {
        async fn classify(&self, _image: EncodedImage) -> Result<ClassificationResult, CoreError> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.result.clone()
        }
    }

    struct ScriptedExtractor(Result<String, CoreError>);

    impl TextExtractor for ScriptedExtractor {
        async fn extract_text(&self, _image: EncodedImage) -> Result<String, CoreError> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct CountingEvaluator {
        inner: RuleBasedAllergenEvaluator,
        calls: AtomicUsize,
    }

    impl AllergenEvaluator for CountingEvaluator {
        async fn evaluate(
            &self,
            ingredients: Ingredients,
            allergens: Vec<String>,
        ) -> Result<AllergenVerdict, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.inner.assess(&ingredients, &allergens))
        }
    }

    type TestService<FC, TE, AE> =
        Service<FakeStore, FC, TE, AE, MockAllergyProfileRepository, MockDishRecommender>;

    fn pad_thai() -> FoodRecord {
        FoodRecord {
            name: "Pad Thai".to_string(),
            ingredients: vec![
                "Rice noodles".to_string(),
                "Shrimp".to_string(),
                "Peanuts".to_string(),
                "Eggs".to_string(),
            ],
            nutritional_summary: "High in carbohydrates".to_string(),
            region: "Thailand".to_string(),
            history_note: "Popularised in the 1930s".to_string(),
            image_hint: "pad thai".to_string(),
        }
    }

    fn food(name: &str, confidence: f64) -> ClassificationResult {
        ClassificationResult {
            is_food: true,
            classification: name.to_string(),
            confidence,
            alternative_suggestions: Vec::new(),
            food_details: None,
        }
    }

    fn service<FC, TE, AE>(classifier: FC, extractor: TE, evaluator: AE) -> TestService<FC, TE, AE> {
        Service::new(
            FakeStore(vec![pad_thai()]),
            classifier,
            extractor,
            evaluator,
            MockAllergyProfileRepository::new(),
            MockDishRecommender::new(),
            ScanConfig::default(),
            Arc::new(AllergenPolicy::default()),
        )
    }

    fn classifier(result: Result<ClassificationResult, CoreError>) -> ScriptedClassifier {
        ScriptedClassifier {
            result,
            delay: Duration::ZERO,
        }
    }

    fn context(allergens: &[&str]) -> SessionContext {
        SessionContext::new(Uuid::new_v4(), AllergyProfile::new(allergens.iter().copied()))
    }

    fn image_input() -> ScanImageInput {
        ScanImageInput::new(EncodedImage::new("image/jpeg", vec![0xFF, 0xD8, 0xFF]).unwrap())
    }

    #[tokio::test]
    async fn food_scan_uses_reference_store_when_classifier_has_no_details() {
        let service = service(
            classifier(Ok(food("pad thai", 0.92))),
            ScriptedExtractor(Ok(String::new())),
            CountingEvaluator::default(),
        );

        let result = service
            .scan_food(context(&["Peanuts", "Milk (Dairy)"]), image_input())
            .await
            .unwrap();

        assert_eq!(result.outcome, ScanOutcome::Assessed);
        assert_eq!(result.ingredients, pad_thai().ingredients);
        let verdict = result.verdict.unwrap();
        assert_eq!(verdict.risk_level, RiskLevel::High);
        assert_eq!(verdict.detected_allergens, vec!["Peanuts".to_string()]);
        assert_eq!(
            result.stages,
            vec![
                ScanState::Idle,
                ScanState::Classifying,
                ScanState::LookingUpDetails,
                ScanState::Evaluating,
                ScanState::Done,
            ]
        );
    }

    #[tokio::test]
    async fn classifier_details_take_precedence_over_reference_store() {
        let mut classification = food("Pad Thai", 0.95);
        classification.food_details = Some(FoodRecord {
            ingredients: vec!["Rice noodles".to_string(), "Tofu".to_string()],
            ..pad_thai()
        });
        let service = service(
            classifier(Ok(classification)),
            ScriptedExtractor(Ok(String::new())),
            CountingEvaluator::default(),
        );

        let result = service
            .scan_food(context(&["Peanuts", "Soy"]), image_input())
            .await
            .unwrap();

        let verdict = result.verdict.unwrap();
        assert_eq!(verdict.detected_allergens, vec!["Soy".to_string()]);
        assert_eq!(verdict.risk_level, RiskLevel::Moderate);
    }

    #[tokio::test]
    async fn not_food_never_reaches_the_evaluator() {
        let service = service(
            classifier(Ok(ClassificationResult::not_food(0.98))),
            ScriptedExtractor(Ok(String::new())),
            MockAllergenEvaluator::new(),
        );

        let result = service
            .scan_food(context(&["Peanuts"]), image_input())
            .await
            .unwrap();

        assert_eq!(result.outcome, ScanOutcome::NotFood);
        assert!(result.verdict.is_none());
        assert_eq!(result.stages.last(), Some(&ScanState::NotFood));
    }

    #[tokio::test]
    async fn unknown_food_yields_no_detail_available() {
        let service = service(
            classifier(Ok(food("Kenkey", 0.81))),
            ScriptedExtractor(Ok(String::new())),
            MockAllergenEvaluator::new(),
        );

        let result = service
            .scan_food(context(&["Peanuts"]), image_input())
            .await
            .unwrap();

        assert_eq!(result.outcome, ScanOutcome::NoDetailAvailable);
        assert!(result.verdict.is_none());
        assert!(result.ingredients.is_empty());
    }

    #[tokio::test]
    async fn empty_extracted_text_never_reaches_the_evaluator() {
        let service = service(
            classifier(Ok(food("unused", 1.0))),
            ScriptedExtractor(Ok(" \n ".to_string())),
            MockAllergenEvaluator::new(),
        );

        let result = service
            .scan_label(context(&["Peanuts"]), image_input())
            .await
            .unwrap();

        assert_eq!(result.outcome, ScanOutcome::NoTextExtracted);
        assert!(result.verdict.is_none());
        assert_eq!(
            result.stages,
            vec![ScanState::Idle, ScanState::Extracting, ScanState::Done]
        );
    }

    #[tokio::test]
    async fn label_scan_evaluates_extracted_text() {
        let evaluator = CountingEvaluator::default();
        let service = service(
            classifier(Ok(food("unused", 1.0))),
            ScriptedExtractor(Ok("Wheat flour, cheese;\nsalt".to_string())),
            evaluator,
        );

        let result = service
            .scan_label(context(&["Wheat (Gluten)", "Milk (Dairy)"]), image_input())
            .await
            .unwrap();

        assert_eq!(result.ingredients, vec!["Wheat flour", "cheese", "salt"]);
        let verdict = result.verdict.unwrap();
        assert_eq!(verdict.risk_level, RiskLevel::High);
        assert_eq!(verdict.detected_allergens.len(), 2);
        assert_eq!(service.allergen_evaluator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn preconditions_are_checked_before_any_adapter_call() {
        let service = service(
            MockFoodClassifier::new(),
            ScriptedExtractor(Ok(String::new())),
            MockAllergenEvaluator::new(),
        );

        let missing = service
            .scan_food(context(&["Peanuts"]), ScanImageInput::default())
            .await;
        assert_eq!(
            missing.unwrap_err(),
            CoreError::Precondition(PreconditionError::MissingImage)
        );

        let mut small = service.clone();
        small.scan_config.max_image_bytes = 2;
        let oversized = small.scan_food(context(&["Peanuts"]), image_input()).await;
        assert_eq!(
            oversized.unwrap_err(),
            CoreError::Precondition(PreconditionError::ImageTooLarge { size: 3, max: 2 })
        );
    }

    #[tokio::test]
    async fn inference_failures_propagate_without_partial_result() {
        let service = service(
            classifier(Err(InferenceFailure::InvalidPayload(
                "missing confidence".to_string(),
            )
            .into())),
            ScriptedExtractor(Ok(String::new())),
            MockAllergenEvaluator::new(),
        );

        let result = service.scan_food(context(&["Peanuts"]), image_input()).await;

        assert!(result.unwrap_err().is_inference_failure());
    }

    #[tokio::test]
    async fn slow_adapter_call_times_out() {
        let mut service = service(
            ScriptedClassifier {
                result: Ok(food("Pad Thai", 0.9)),
                delay: Duration::from_millis(500),
            },
            ScriptedExtractor(Ok(String::new())),
            MockAllergenEvaluator::new(),
        );
        service.scan_config.inference_timeout = Some(Duration::from_millis(20));

        let result = service.scan_food(context(&["Peanuts"]), image_input()).await;

        assert_eq!(
            result.unwrap_err(),
            CoreError::Inference(InferenceFailure::Timeout {
                stage: "classification",
                after: Duration::from_millis(20),
            })
        );
    }

    #[tokio::test]
    async fn cancelled_scan_discards_late_result() {
        let service = service(
            ScriptedClassifier {
                result: Ok(food("Pad Thai", 0.9)),
                delay: Duration::from_millis(100),
            },
            ScriptedExtractor(Ok(String::new())),
            MockAllergenEvaluator::new(),
        );
        let context = context(&["Peanuts"]);
        let session_id = context.session_id;

        let (result, pending) = tokio::join!(service.scan_food(context, image_input()), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            service.cancel_scan(session_id)
        });

        assert!(pending);
        assert_eq!(result.unwrap_err(), CoreError::ScanCancelled);
    }
}
