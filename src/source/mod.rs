//! Data sources backing the meteo data endpoint.
//!
//! This module handles:
//! - The [`DataSource`] capability shared by both deployment variants
//! - Reading a JSON document from the local filesystem
//! - Relaying JSON from a fixed upstream URL
//! - A mock source for handler tests

pub mod file;
pub mod mock;
pub mod remote;

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;

use crate::config::{Config, SourceKind};
use crate::error::{FetchError, ServiceError};

pub use file::LocalFileSource;
pub use mock::{MockOutcome, MockSource};
pub use remote::RemoteSource;

/// A single fixed origin of JSON data, fetched fresh on every call.
pub trait DataSource: fmt::Debug + Send + Sync {
    /// Which variant this source implements.
    fn kind(&self) -> SourceKind;

    /// Acquire the payload. Exactly one attempt is made.
    fn fetch(&self) -> BoxFuture<'_, Result<Value, FetchError>>;
}

/// Build the source selected by `config.data_source`.
pub fn from_config(config: &Config) -> Result<Arc<dyn DataSource>, ServiceError> {
    let source: Arc<dyn DataSource> = match config.data_source {
        SourceKind::File => Arc::new(LocalFileSource::new(config.data_file_path.clone())),
        SourceKind::Remote => {
            let url = config
                .parsed_upstream_url()
                .map_err(ServiceError::InvalidConfig)?;
            Arc::new(RemoteSource::new(url)?)
        }
    };

    Ok(source)
}
