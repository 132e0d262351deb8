use allerscan_core::domain::{
    allergy_profile::value_objects::SessionContext,
    scan::{entities::ScanResult, ports::ScanService},
};
use axum::{
    Extension,
    extract::{Multipart, State},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    scan::validators::{ScanImageForm, read_scan_image},
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ScanResponse {
    pub data: ScanResult,
}

#[utoipa::path(
    post,
    path = "/food",
    tag = "scan",
    summary = "Scan a dish",
    description = "Classifies the dish in the photo, resolves its ingredients and checks them against the session's allergy profile.",
    request_body(content = ScanImageForm, content_type = "multipart/form-data"),
    params(
        ("x-session-id" = String, Header, description = "Session identifier (UUID)"),
    ),
    responses(
        (status = 200, body = ScanResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse),
    ),
)]
pub async fn scan_food(
    State(state): State<AppState>,
    Extension(context): Extension<SessionContext>,
    multipart: Multipart,
) -> Result<Response<ScanResponse>, ApiError> {
    let input = read_scan_image(multipart).await?;

    let result = state
        .service
        .scan_food(context, input)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ScanResponse { data: result }))
}
