//! Local-file variant: serve a JSON document from disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::SourceKind;
use crate::error::FetchError;

use super::DataSource;

/// Reads and parses a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    /// Create a source for the given path. The file is not touched until fetch.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The configured path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file and parse it as JSON.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn read(&self) -> Result<Value, FetchError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => FetchError::NotFound {
                path: self.path.clone(),
            },
            _ => FetchError::Io {
                path: self.path.clone(),
                source: e,
            },
        })?;

        // from_slice also rejects invalid UTF-8 as a parse error
        let value: Value = serde_json::from_slice(&bytes)?;

        debug!(bytes = bytes.len(), "Loaded JSON document");

        Ok(value)
    }
}

impl DataSource for LocalFileSource {
    fn kind(&self) -> SourceKind {
        SourceKind::File
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Value, FetchError>> {
        self.read().boxed()
    }
}
