use super::handlers::add_allergen::{__path_add_allergen, add_allergen};
use super::handlers::get_profile::{__path_get_profile, get_profile};
use super::handlers::update_profile::{__path_update_profile, update_profile};
use crate::application::{
    http::server::app_state::AppState, session_middleware::session_middleware,
};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_profile, update_profile, add_allergen))]
pub struct ProfileApiDoc;

pub fn profile_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/profile", state.args.server.root_path),
            get(get_profile).put(update_profile),
        )
        .route(
            &format!("{}/profile/allergens", state.args.server.root_path),
            post(add_allergen),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
}
