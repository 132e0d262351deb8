use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};

/// Runtime settings that clients may rely on.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PublicConfig {
    pub allergen_evaluator: String,
    pub gemini_model: String,
    pub critical_allergens: Vec<String>,
    pub max_image_bytes: usize,
    pub inference_timeout_secs: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/config",
    tag = "config",
    summary = "Get public configuration",
    responses(
        (status = 200, body = PublicConfig)
    ),
)]
pub async fn get_config(State(state): State<AppState>) -> Response<PublicConfig> {
    let scan = &state.args.scan;

    Response::OK(PublicConfig {
        allergen_evaluator: scan.allergen_evaluator.as_str().to_string(),
        gemini_model: state.args.llm.gemini_model.clone(),
        critical_allergens: scan.critical_allergens.clone(),
        max_image_bytes: scan.max_image_bytes,
        inference_timeout_secs: (scan.inference_timeout_secs > 0)
            .then_some(scan.inference_timeout_secs),
    })
}
