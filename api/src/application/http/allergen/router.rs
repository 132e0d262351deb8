use super::handlers::check_ingredients::{__path_check_ingredients, check_ingredients};
use super::handlers::get_common_allergens::{__path_get_common_allergens, get_common_allergens};
use crate::application::{
    http::server::app_state::AppState, session_middleware::session_middleware,
};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(check_ingredients, get_common_allergens))]
pub struct AllergenApiDoc;

pub fn allergen_routes(state: AppState) -> Router<AppState> {
    let checks = Router::new()
        .route(
            &format!("{}/allergens/check", state.args.server.root_path),
            post(check_ingredients),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .route(
            &format!("{}/allergens/common", state.args.server.root_path),
            get(get_common_allergens),
        )
        .merge(checks)
}
