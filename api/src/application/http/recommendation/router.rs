use super::handlers::recommend_safe_foods::{__path_recommend_safe_foods, recommend_safe_foods};
use crate::application::{
    http::server::app_state::AppState, session_middleware::session_middleware,
};

use axum::{Router, middleware, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(recommend_safe_foods))]
pub struct RecommendationApiDoc;

pub fn recommendation_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/recommendations", state.args.server.root_path),
            post(recommend_safe_foods),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
}
