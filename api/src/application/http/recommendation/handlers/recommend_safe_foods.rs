use allerscan_core::domain::{
    allergy_profile::value_objects::SessionContext,
    recommendation::{entities::SafeDishRecommendations, ports::RecommendationService},
};
use axum::{Extension, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    recommendation::validators::RecommendationValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RecommendationResponse {
    pub data: SafeDishRecommendations,
}

#[utoipa::path(
    post,
    path = "",
    tag = "recommendation",
    summary = "Recommend allergen-safe dishes",
    description = "Asks the recommender for dishes that avoid the profile's allergens, then drops any suggestion the local screen flags.",
    request_body = RecommendationValidator,
    params(
        ("x-session-id" = String, Header, description = "Session identifier (UUID)"),
    ),
    responses(
        (status = 200, body = RecommendationResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse),
    ),
)]
pub async fn recommend_safe_foods(
    State(state): State<AppState>,
    Extension(context): Extension<SessionContext>,
    ValidateJson(payload): ValidateJson<RecommendationValidator>,
) -> Result<Response<RecommendationResponse>, ApiError> {
    let recommendations = state
        .service
        .recommend_safe_foods(context, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(RecommendationResponse {
        data: recommendations,
    }))
}
