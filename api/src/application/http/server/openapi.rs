use utoipa::OpenApi;

use crate::application::http::{
    allergen::router::AllergenApiDoc,
    food::router::FoodApiDoc,
    health::__path_health,
    profile::router::ProfileApiDoc,
    recommendation::router::RecommendationApiDoc,
    scan::router::ScanApiDoc,
    server::config::__path_get_config,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AllerScan API"
    ),
    paths(get_config, health),
    nest(
        (path = "/scans", api = ScanApiDoc),
        (path = "/allergens", api = AllergenApiDoc),
        (path = "/profile", api = ProfileApiDoc),
        (path = "/foods", api = FoodApiDoc),
        (path = "/recommendations", api = RecommendationApiDoc),
    )
)]
pub struct ApiDoc;
