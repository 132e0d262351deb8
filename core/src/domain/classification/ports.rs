use std::future::Future;

use crate::domain::{
    classification::entities::ClassificationResult, common::CoreError,
    scan::entities::EncodedImage,
};

/// Identifies the dish shown in an image.
#[cfg_attr(test, mockall::automock)]
pub trait FoodClassifier: Send + Sync {
    fn classify(
        &self,
        image: EncodedImage,
    ) -> impl Future<Output = Result<ClassificationResult, CoreError>> + Send;
}
