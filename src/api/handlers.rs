//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;
use utoipa::ToSchema;

use crate::error::FetchError;
use crate::metrics;
use crate::source::DataSource;

/// Body returned for a missing local file.
pub const FILE_NOT_FOUND_MESSAGE: &str =
    "JSON file not found. Please check the path and filename.";
/// Body returned for a local file holding malformed JSON.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON format. Please check the file content.";
/// Prefix of the `detail` returned when the upstream fetch fails.
pub const NETWORK_DETAIL_PREFIX: &str = "Fehler beim Abrufen der Daten";
/// Acknowledgement returned by the test endpoint.
pub const TEST_MESSAGE: &str = "Test erfolgreich";

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The single source behind the data endpoint.
    pub source: Arc<dyn DataSource>,
    /// Prometheus handle, present when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state without metrics.
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle so `/metrics` can render it.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Error object for local-file failures, sent with a 200 status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable failure message.
    pub error: String,
}

/// Error object for remote-fetch failures, sent with a 500 status.
#[derive(Debug, Serialize, ToSchema)]
pub struct DetailBody {
    /// Failure message including the underlying cause.
    pub detail: String,
}

/// Test endpoint acknowledgement.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageBody {
    /// Always "Test erfolgreich".
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: String,
}

// Local-file failures are reported in the body with a success status while
// remote failures use 500. Callers of the file variant must inspect the body.
impl IntoResponse for FetchError {
    fn into_response(self) -> Response {
        match self {
            FetchError::NotFound { .. } => (
                StatusCode::OK,
                Json(ErrorBody {
                    error: FILE_NOT_FOUND_MESSAGE.to_string(),
                }),
            )
                .into_response(),
            FetchError::Parse(_) => (
                StatusCode::OK,
                Json(ErrorBody {
                    error: INVALID_JSON_MESSAGE.to_string(),
                }),
            )
                .into_response(),
            FetchError::Network(cause) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DetailBody {
                    detail: format!("{}: {}", NETWORK_DETAIL_PREFIX, cause),
                }),
            )
                .into_response(),
            FetchError::Io { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DetailBody {
                    detail: "Internal Server Error".to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// Meteo data handler - relays the source's JSON unmodified.
#[utoipa::path(
    get,
    path = "/api/py/meteodaten",
    tag = "meteodaten",
    responses(
        (status = 200, description = "The JSON document as stored at the source. \
            In the local-file deployment, failures are also reported here as an `error` object."),
        (status = 500, description = "Upstream fetch failed (remote deployment)", body = DetailBody)
    )
)]
pub async fn get_meteodaten(State(state): State<AppState>) -> Result<Json<Value>, FetchError> {
    let kind = state.source.kind();
    let timer = metrics::timer_fetch(kind);

    let result = state.source.fetch().await;
    drop(timer);

    match result {
        Ok(value) => {
            metrics::inc_data_requests(kind, metrics::OUTCOME_OK);
            Ok(Json(value))
        }
        Err(e) => {
            warn!(source = %kind, outcome = e.outcome(), "Data fetch failed: {}", e);
            metrics::inc_data_requests(kind, e.outcome());
            Err(e)
        }
    }
}

/// Test handler - always acknowledges.
#[utoipa::path(
    get,
    path = "/api/py/test",
    tag = "meteodaten",
    responses((status = 200, description = "Service reachable", body = MessageBody))
)]
pub async fn test_message() -> Json<MessageBody> {
    metrics::inc_test_requests();
    Json(MessageBody {
        message: TEST_MESSAGE.to_string(),
    })
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "ops",
    responses((status = 200, description = "Process is up", body = HealthResponse))
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Metrics handler - Prometheus text, or 404 when metrics are disabled.
pub async fn prometheus(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
