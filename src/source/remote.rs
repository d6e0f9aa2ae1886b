//! Remote-fetch variant: relay JSON from a fixed upstream URL.

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::config::SourceKind;
use crate::error::FetchError;

use super::DataSource;

/// Issues one GET to the upstream per fetch.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    /// HTTP client for upstream requests.
    http: reqwest::Client,
    /// Upstream JSON endpoint.
    url: Url,
}

impl RemoteSource {
    /// Create a remote source with its own pooled HTTP client.
    ///
    /// No request timeout is configured: a hung upstream holds the request open.
    pub fn new(url: Url) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .tcp_nodelay(true)
            .build()?;

        Ok(Self::with_client(http, url))
    }

    /// Create a remote source sharing an existing client.
    pub fn with_client(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }

    /// The upstream URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch the upstream document.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn get(&self) -> Result<Value, FetchError> {
        let response = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| FetchError::network(&e))?;

        let status = response.status();
        let response = response
            .error_for_status()
            .map_err(|e| FetchError::network(&e))?;

        let value: Value = response
            .json()
            .await
            .map_err(|e| FetchError::network(&e))?;

        debug!(status = %status, "Fetched upstream document");

        Ok(value)
    }
}

impl DataSource for RemoteSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Remote
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Value, FetchError>> {
        self.get().boxed()
    }
}
