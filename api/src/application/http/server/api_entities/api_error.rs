use allerscan_core::domain::common::CoreError;
use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Precondition(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("analysis failed")]
    AnalysisFailed,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    pub status: u16,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST"),
            ApiError::Precondition(_) => (StatusCode::BAD_REQUEST, "E_PRECONDITION"),
            ApiError::ValidationError(_) => (StatusCode::BAD_REQUEST, "E_VALIDATION"),
            ApiError::AnalysisFailed => (StatusCode::BAD_GATEWAY, "E_ANALYSIS_FAILED"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "E_CONFLICT"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "E_NOT_FOUND"),
            ApiError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "E_INTERNAL_SERVER_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = ApiErrorResponse {
            code: code.to_string(),
            message: self.to_string(),
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Precondition(e) => ApiError::Precondition(e.to_string()),
            CoreError::Inference(e) => {
                error!("analysis failed: {}", e);
                ApiError::AnalysisFailed
            }
            CoreError::ScanCancelled => {
                ApiError::Conflict("scan was superseded or cancelled".to_string())
            }
            CoreError::NotFound => ApiError::NotFound("Not found".to_string()),
            CoreError::Invalid(message) => ApiError::ValidationError(message),
            CoreError::ReferenceData(message) => {
                error!("reference data error: {}", message);
                ApiError::InternalServerError("Internal server error".to_string())
            }
            CoreError::InternalServerError => {
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

/// JSON body extractor that also runs `validator` rules.
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::ValidationError(e.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::ValidationError(e.to_string()))?;

        Ok(ValidateJson(value))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use allerscan_core::domain::common::{InferenceFailure, PreconditionError};

    use super::*;

    #[test]
    fn core_errors_map_to_distinct_statuses() {
        let cases = [
            (
                CoreError::from(PreconditionError::EmptyImage),
                StatusCode::BAD_REQUEST,
            ),
            (
                CoreError::from(InferenceFailure::Timeout {
                    stage: "classification",
                    after: Duration::from_secs(5),
                }),
                StatusCode::BAD_GATEWAY,
            ),
            (CoreError::ScanCancelled, StatusCode::CONFLICT),
            (CoreError::NotFound, StatusCode::NOT_FOUND),
            (
                CoreError::InternalServerError,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status_and_code().0, status);
        }
    }

    #[test]
    fn provider_details_are_not_exposed() {
        let error = ApiError::from(CoreError::from(InferenceFailure::Provider {
            status: 500,
            body: "secret stack trace".to_string(),
        }));

        assert_eq!(error, ApiError::AnalysisFailed);
        assert_eq!(error.to_string(), "analysis failed");
    }
}
