use std::future::Future;

use crate::domain::{common::CoreError, scan::entities::EncodedImage};

/// Reads the ingredient text printed on a product label.
#[cfg_attr(test, mockall::automock)]
pub trait TextExtractor: Send + Sync {
    /// An empty string means the label had no legible text.
    fn extract_text(
        &self,
        image: EncodedImage,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}
