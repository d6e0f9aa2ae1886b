//! Mock data source for unit testing.
//!
//! This module provides a source that can be used in tests
//! without touching the filesystem or the network.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;

use crate::config::SourceKind;
use crate::error::FetchError;

use super::DataSource;

/// What the mock returns on every fetch.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Succeed with this payload.
    Data(Value),
    /// Fail as if the file were missing.
    NotFound,
    /// Fail as if the file held malformed JSON.
    InvalidJson,
    /// Fail as if the upstream errored with this message.
    Network(String),
}

/// Mock source for testing.
#[derive(Debug, Clone)]
pub struct MockSource {
    kind: SourceKind,
    outcome: MockOutcome,
    /// Simulated latency in milliseconds.
    latency_ms: u64,
    calls: Arc<AtomicU64>,
}

impl MockSource {
    /// Create a mock pretending to be the given variant.
    pub fn new(kind: SourceKind, outcome: MockOutcome) -> Self {
        Self {
            kind,
            outcome,
            latency_ms: 0,
            calls: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Delay every fetch by `latency_ms`.
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Number of fetches performed so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    fn build_result(&self) -> Result<Value, FetchError> {
        match &self.outcome {
            MockOutcome::Data(value) => Ok(value.clone()),
            MockOutcome::NotFound => Err(FetchError::NotFound {
                path: "mock.json".into(),
            }),
            MockOutcome::InvalidJson => {
                serde_json::from_str::<Value>("{not json").map_err(FetchError::from)
            }
            MockOutcome::Network(message) => Err(FetchError::Network(message.clone())),
        }
    }
}

impl DataSource for MockSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Value, FetchError>> {
        async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.latency_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.latency_ms)).await;
            }
            self.build_result()
        }
        .boxed()
    }
}
