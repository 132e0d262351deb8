use allerscan_core::domain::allergy_profile::{
    ports::AllergyProfileService, value_objects::SessionContext,
};
use axum::{Extension, extract::State};

use crate::application::http::{
    profile::{handlers::get_profile::ProfileResponse, validators::UpdateProfileValidator},
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    put,
    path = "",
    tag = "profile",
    summary = "Update the session's allergy profile",
    request_body = UpdateProfileValidator,
    params(
        ("x-session-id" = String, Header, description = "Session identifier (UUID)"),
    ),
    responses(
        (status = 200, body = ProfileResponse),
        (status = 400, body = ApiErrorResponse),
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(context): Extension<SessionContext>,
    ValidateJson(payload): ValidateJson<UpdateProfileValidator>,
) -> Result<Response<ProfileResponse>, ApiError> {
    let profile = state
        .service
        .update_profile(context.session_id, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ProfileResponse { data: profile }))
}
