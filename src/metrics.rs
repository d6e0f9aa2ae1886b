//! Prometheus metrics for the read-through endpoint.
//!
//! This module provides:
//! - Data request counters, labelled by source and outcome
//! - Fetch latency histograms, labelled by source
//! - Test endpoint hit counter

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::config::SourceKind;

// === Metric Name Constants ===

/// Data endpoint requests counter metric name.
pub const METRIC_DATA_REQUESTS: &str = "data_requests_total";
/// Data fetch latency metric name.
pub const METRIC_DATA_FETCH_LATENCY: &str = "data_fetch_latency_ms";
/// Test endpoint requests counter metric name.
pub const METRIC_TEST_REQUESTS: &str = "test_requests_total";

/// Outcome label for a successful fetch.
pub const OUTCOME_OK: &str = "ok";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_DATA_REQUESTS,
        "Total number of data endpoint requests by source and outcome"
    );
    describe_histogram!(
        METRIC_DATA_FETCH_LATENCY,
        "Time to acquire the JSON payload from its source in milliseconds"
    );
    describe_counter!(
        METRIC_TEST_REQUESTS,
        "Total number of test endpoint requests"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and describe all metrics.
pub fn install_prometheus() -> Result<PrometheusHandle, metrics_exporter_prometheus::BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Increment the data request counter.
pub fn inc_data_requests(source: SourceKind, outcome: &'static str) {
    counter!(
        METRIC_DATA_REQUESTS,
        "source" => source.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Increment the test endpoint counter.
pub fn inc_test_requests() {
    counter!(METRIC_TEST_REQUESTS).increment(1);
}

/// RAII guard for timing a fetch.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    source: SourceKind,
}

impl LatencyTimer {
    /// Create a new latency timer for the given source.
    pub fn new(source: SourceKind) -> Self {
        Self {
            start: Instant::now(),
            source,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(METRIC_DATA_FETCH_LATENCY, "source" => self.source.to_string())
            .record(self.elapsed_ms());
    }
}

/// Create a latency timer for a data fetch.
pub fn timer_fetch(source: SourceKind) -> LatencyTimer {
    LatencyTimer::new(source)
}
