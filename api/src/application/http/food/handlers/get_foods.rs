use allerscan_core::domain::food_reference::{entities::FoodRecord, ports::FoodReferenceService};
use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct FoodsResponse {
    pub data: Vec<FoodRecord>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "food",
    summary = "List reference dishes",
    responses(
        (status = 200, body = FoodsResponse)
    ),
)]
pub async fn get_foods(State(state): State<AppState>) -> Result<Response<FoodsResponse>, ApiError> {
    let foods = state.service.list_foods().await.map_err(ApiError::from)?;

    Ok(Response::OK(FoodsResponse { data: foods }))
}
