use allerscan_core::domain::allergy_profile::entities::COMMON_ALLERGENS;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::api_entities::response::Response;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CommonAllergensResponse {
    pub data: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/common",
    tag = "allergen",
    summary = "List common allergens",
    responses(
        (status = 200, body = CommonAllergensResponse)
    ),
)]
pub async fn get_common_allergens() -> Response<CommonAllergensResponse> {
    Response::OK(CommonAllergensResponse {
        data: COMMON_ALLERGENS.iter().map(|a| a.to_string()).collect(),
    })
}
