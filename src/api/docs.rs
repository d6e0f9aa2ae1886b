//! OpenAPI document for the HTTP API.

use utoipa::OpenApi;

use crate::config::SourceKind;

use super::handlers::{DetailBody, ErrorBody, HealthResponse, MessageBody};
use super::routes::TEST_PATH;

/// Generated OpenAPI description of every route.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Meteodaten API",
        description = "Read-through access to daily meteo measurements"
    ),
    paths(
        crate::api::handlers::get_meteodaten,
        crate::api::handlers::test_message,
        crate::api::handlers::health
    ),
    components(schemas(ErrorBody, DetailBody, MessageBody, HealthResponse)),
    tags(
        (name = "meteodaten", description = "Meteo data endpoints"),
        (name = "ops", description = "Operational endpoints")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// The document for the routes actually mounted for `kind`.
    pub fn for_source(kind: SourceKind) -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        if kind == SourceKind::File {
            doc.paths.paths.remove(TEST_PATH);
        }
        doc
    }
}
