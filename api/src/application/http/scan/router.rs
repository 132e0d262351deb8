use super::handlers::{
    cancel_scan::{__path_cancel_scan, cancel_scan},
    scan_food::{__path_scan_food, scan_food},
    scan_label::{__path_scan_label, scan_label},
};
use super::validators::scan_body_limit;
use crate::application::{
    http::server::app_state::AppState, session_middleware::session_middleware,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(scan_food, scan_label, cancel_scan))]
pub struct ScanApiDoc;

pub fn scan_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/scans/food", state.args.server.root_path),
            post(scan_food),
        )
        .route(
            &format!("{}/scans/label", state.args.server.root_path),
            post(scan_label),
        )
        .route(
            &format!("{}/scans/current", state.args.server.root_path),
            delete(cancel_scan),
        )
        .layer(DefaultBodyLimit::max(scan_body_limit(
            state.args.scan.max_image_bytes,
        )))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
}
