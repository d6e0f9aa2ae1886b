//! Unified error types for the meteo data service.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for startup and CLI paths.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Data acquisition error.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// HTTP client construction error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to acquire the JSON payload for a single request.
///
/// Every variant is terminal for the request; nothing is retried.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The local JSON document does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// The configured path.
        path: PathBuf,
    },

    /// The local document is not well-formed JSON.
    #[error("invalid json: {0}")]
    Parse(#[from] serde_json::Error),

    /// The local document exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The configured path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Upstream request failed, returned a non-2xx status, or sent a body
    /// that is not JSON.
    #[error("{0}")]
    Network(String),
}

impl FetchError {
    /// Build a `Network` error carrying the full source chain of `err`.
    pub fn network(err: &(dyn std::error::Error + 'static)) -> Self {
        FetchError::Network(error_chain(err))
    }

    /// Short label used for metrics and logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            FetchError::NotFound { .. } => "not_found",
            FetchError::Parse(_) => "parse_error",
            FetchError::Io { .. } => "io_error",
            FetchError::Network(_) => "network_error",
        }
    }
}

/// Render an error and its sources as `outer: inner: innermost`.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        // hyper and reqwest sometimes repeat the inner message in the outer one
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }

    message
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
