use allerscan_core::domain::food_reference::{entities::FoodRecord, ports::FoodReferenceService};
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct FoodResponse {
    pub data: FoodRecord,
}

#[utoipa::path(
    get,
    path = "/{name}",
    tag = "food",
    summary = "Get a reference dish by name",
    description = "Name matching is case-insensitive.",
    params(
        ("name" = String, Path, description = "Dish name"),
    ),
    responses(
        (status = 200, body = FoodResponse),
        (status = 404, body = ApiErrorResponse),
    ),
)]
pub async fn get_food(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<FoodResponse>, ApiError> {
    let food = state.service.get_food(name).await.map_err(ApiError::from)?;

    Ok(Response::OK(FoodResponse { data: food }))
}
