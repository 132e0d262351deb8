use allerscan_core::domain::allergy_profile::{
    ports::AllergyProfileService, value_objects::SessionContext,
};
use axum::{Extension, extract::State};

use crate::application::http::{
    profile::{handlers::get_profile::ProfileResponse, validators::AddAllergenValidator},
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/allergens",
    tag = "profile",
    summary = "Add a custom allergen",
    description = "Appends an allergen to the profile. Adding one that is already present leaves the profile unchanged.",
    request_body = AddAllergenValidator,
    params(
        ("x-session-id" = String, Header, description = "Session identifier (UUID)"),
    ),
    responses(
        (status = 200, body = ProfileResponse),
        (status = 400, body = ApiErrorResponse),
    ),
)]
pub async fn add_allergen(
    State(state): State<AppState>,
    Extension(context): Extension<SessionContext>,
    ValidateJson(payload): ValidateJson<AddAllergenValidator>,
) -> Result<Response<ProfileResponse>, ApiError> {
    let profile = state
        .service
        .add_custom_allergen(context.session_id, payload.allergen)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ProfileResponse { data: profile }))
}
