//! Read-through JSON API for daily meteo measurements.
//!
//! Every request to `/api/py/meteodaten` acquires the JSON document fresh from
//! exactly one source and relays it unmodified. Two deployments exist:
//!
//! ```text
//! DATA_SOURCE=file    read src/meteodaten_2023_daily.json from disk
//! DATA_SOURCE=remote  GET a fixed upstream URL
//! ```
//!
//! Failures are reported differently per deployment: the file variant answers
//! 200 with an `{"error": ...}` object, the remote variant answers 500 with a
//! `{"detail": ...}` object.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`source`]: The `DataSource` capability and its implementations
//! - [`api`]: HTTP routes, handlers, and OpenAPI document
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod source;
pub mod utils;

pub use config::{Config, SourceKind};
pub use error::{FetchError, Result, ServiceError};
pub use source::DataSource;
