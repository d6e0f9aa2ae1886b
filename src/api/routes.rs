//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::SourceKind;

use super::docs::ApiDoc;
use super::handlers::{get_meteodaten, health, prometheus, test_message, AppState};

/// Meteo data route.
pub const METEODATEN_PATH: &str = "/api/py/meteodaten";
/// Reachability test route, mounted only for the remote source.
pub const TEST_PATH: &str = "/api/py/test";
/// Swagger UI route.
pub const DOCS_PATH: &str = "/api/py/docs";
/// OpenAPI document route.
pub const OPENAPI_PATH: &str = "/api/py/openapi.json";

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let kind = state.source.kind();

    let mut router = Router::new()
        .route(METEODATEN_PATH, get(get_meteodaten))
        // Ops endpoints
        .route("/health", get(health))
        .route("/metrics", get(prometheus));

    if kind == SourceKind::Remote {
        router = router.route(TEST_PATH, get(test_message));
    }

    router
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::for_source(kind)))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
