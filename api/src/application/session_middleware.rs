use allerscan_core::domain::allergy_profile::{
    ports::AllergyProfileService, value_objects::SessionContext,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::application::http::server::{api_entities::api_error::ApiError, app_state::AppState};

pub const SESSION_HEADER: &str = "x-session-id";

/// Resolves the `x-session-id` header into a [`SessionContext`] stored in
/// request extensions. New sessions start with the default profile.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session_id = req
        .headers()
        .get(SESSION_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::BadRequest(format!("Missing {SESSION_HEADER} header")))
        .and_then(|value| {
            Uuid::parse_str(value.trim()).map_err(|_| {
                ApiError::BadRequest(format!("{SESSION_HEADER} must be a UUID"))
            })
        })?;

    let profile = state
        .service
        .get_profile(session_id)
        .await
        .map_err(ApiError::from)?;

    req.extensions_mut()
        .insert(SessionContext::new(session_id, profile));

    Ok(next.run(req).await)
}
