use allerscan_core::domain::{
    allergen::{entities::AllergenVerdict, ports::AllergenCheckService},
    allergy_profile::value_objects::SessionContext,
};
use axum::{Extension, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    allergen::validators::CheckIngredientsValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CheckIngredientsResponse {
    pub data: AllergenVerdict,
}

#[utoipa::path(
    post,
    path = "/check",
    tag = "allergen",
    summary = "Check ingredients against allergens",
    description = "Evaluates an ingredient list or label text against explicit allergens, or the session profile when none are given.",
    request_body = CheckIngredientsValidator,
    params(
        ("x-session-id" = String, Header, description = "Session identifier (UUID)"),
    ),
    responses(
        (status = 200, body = CheckIngredientsResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse),
    ),
)]
pub async fn check_ingredients(
    State(state): State<AppState>,
    Extension(context): Extension<SessionContext>,
    ValidateJson(payload): ValidateJson<CheckIngredientsValidator>,
) -> Result<Response<CheckIngredientsResponse>, ApiError> {
    let verdict = state
        .service
        .check_ingredients(context, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(CheckIngredientsResponse { data: verdict }))
}
