use allerscan_core::domain::allergy_profile::{
    entities::AllergyProfile, value_objects::SessionContext,
};
use axum::Extension;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::api_entities::{
    api_error::{ApiError, ApiErrorResponse},
    response::Response,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProfileResponse {
    pub data: AllergyProfile,
}

#[utoipa::path(
    get,
    path = "",
    tag = "profile",
    summary = "Get the session's allergy profile",
    params(
        ("x-session-id" = String, Header, description = "Session identifier (UUID)"),
    ),
    responses(
        (status = 200, body = ProfileResponse),
        (status = 400, body = ApiErrorResponse),
    ),
)]
pub async fn get_profile(
    Extension(context): Extension<SessionContext>,
) -> Result<Response<ProfileResponse>, ApiError> {
    Ok(Response::OK(ProfileResponse {
        data: context.profile,
    }))
}
