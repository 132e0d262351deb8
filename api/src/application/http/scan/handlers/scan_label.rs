use allerscan_core::domain::{
    allergy_profile::value_objects::SessionContext, scan::ports::ScanService,
};
use axum::{
    Extension,
    extract::{Multipart, State},
};

use crate::application::http::{
    scan::{
        handlers::scan_food::ScanResponse,
        validators::{ScanImageForm, read_scan_image},
    },
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/label",
    tag = "scan",
    summary = "Scan a product label",
    description = "Extracts the ingredient text from a label photo and checks it against the session's allergy profile.",
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
pub async fn scan_label(
    State(state): State<AppState>,
    Extension(context): Extension<SessionContext>,
    multipart: Multipart,
) -> Result<Response<ScanResponse>, ApiError> {
    let input = read_scan_image(multipart).await?;

    let result = state
        .service
        .scan_label(context, input)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ScanResponse { data: result }))
}
