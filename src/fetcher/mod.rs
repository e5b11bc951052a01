//! Network access for catalog searches.
//!
//! - [`Fetcher`] - Async trait performing one GET for a [`RequestDescriptor`]
//! - [`HttpFetcher`] - reqwest-backed implementation with bounded timeouts
//! - [`Connectivity`] - Synchronous "is the network reachable" probe
//!
//! A fetcher never retries and never turns HTTP error statuses into errors:
//! the caller receives the raw status and body and decides what a 4xx/5xx
//! means. Only connection-level failures produce a [`TransportError`].

mod connectivity;
mod error;
mod http_client;

pub use connectivity::{Connectivity, ConnectivityFlag, RouteConnectivity};
pub use error::{FetcherError, TransportError};
pub use http_client::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::query::RequestDescriptor;
use crate::user_agent;

use http_client::build_catalog_http_client;

/// Raw outcome of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code, including non-2xx codes.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl FetchResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Performs the network call for a catalog request.
///
/// Implementations must be cheap to share across tasks; the search
/// controller holds one behind an `Arc` and calls it from spawned workers.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Executes a single GET for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for connection-level failures.
    async fn fetch(&self, request: &RequestDescriptor) -> Result<FetchResponse, TransportError>;
}

/// Timeout settings for [`HttpFetcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpFetcherConfig {
    pub connect_timeout: Duration,
    /// Bound on the whole request, body included.
    pub read_timeout: Duration,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
        }
    }
}

/// HTTP fetcher for the catalog API.
///
/// Created once and reused so requests share a connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`FetcherError`] if HTTP client construction fails.
    pub fn new() -> Result<Self, FetcherError> {
        Self::with_config(HttpFetcherConfig::default())
    }

    /// Creates a fetcher with explicit timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`FetcherError`] if HTTP client construction fails.
    pub fn with_config(config: HttpFetcherConfig) -> Result<Self, FetcherError> {
        let client = build_catalog_http_client(
            &user_agent::default_catalog_user_agent(),
            config.connect_timeout,
            config.read_timeout,
        )?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[tracing::instrument(skip_all, fields(start_index = request.start_index()))]
    async fn fetch(&self, request: &RequestDescriptor) -> Result<FetchResponse, TransportError> {
        let url = request.url();
        debug!(api_url = %url, "Calling catalog API");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(url.as_str(), e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(url.as_str(), e))?;

        debug!(status, bytes = body.len(), "Catalog API responded");
        Ok(FetchResponse { status, body })
    }
}
