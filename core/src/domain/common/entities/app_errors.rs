use std::time::Duration;

use thiserror::Error;

/// Rejections raised before any inference call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("no image was provided")]
    MissingImage,

    #[error("image payload is empty")]
    EmptyImage,

    #[error("invalid image data URI: {0}")]
    InvalidDataUri(String),

    #[error("unsupported MIME type `{0}`, expected an image")]
    UnsupportedMimeType(String),

    #[error("image is {size} bytes, the maximum is {max} bytes")]
    ImageTooLarge { size: usize, max: usize },

    #[error("no allergens to check against")]
    EmptyAllergenSet,

    #[error("no ingredients to check")]
    EmptyIngredients,
}

/// The inference provider could not produce a usable answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceFailure {
    #[error("inference request failed: {0}")]
    Transport(String),

    #[error("inference provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("inference payload did not match the expected schema: {0}")]
    InvalidPayload(String),

    #[error("{stage} timed out after {after:?}")]
    Timeout { stage: &'static str, after: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error(transparent)]
    Inference(#[from] InferenceFailure),

    #[error("scan was cancelled")]
    ScanCancelled,

    #[error("Not found")]
    NotFound,

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("reference data error: {0}")]
    ReferenceData(String),

    #[error("Internal server error")]
    InternalServerError,
}

impl CoreError {
    pub fn is_inference_failure(&self) -> bool {
        matches!(self, CoreError::Inference(_))
    }
}
