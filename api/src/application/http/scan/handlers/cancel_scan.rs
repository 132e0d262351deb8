use allerscan_core::domain::{
    allergy_profile::value_objects::SessionContext, scan::ports::ScanService,
};
use axum::{Extension, extract::State};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    delete,
    path = "/current",
    tag = "scan",
    summary = "Cancel the in-flight scan",
    description = "Marks the session's pending scan as superseded; its result is discarded when it arrives.",
    params(
        ("x-session-id" = String, Header, description = "Session identifier (UUID)"),
    ),
    responses(
        (status = 204)
    ),
)]
pub async fn cancel_scan(
    State(state): State<AppState>,
    Extension(context): Extension<SessionContext>,
) -> Result<Response<()>, ApiError> {
    state.service.cancel_scan(context.session_id);

    Ok(Response::NoContent)
}
