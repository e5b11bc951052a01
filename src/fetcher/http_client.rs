//! HTTP client construction policy for catalog requests.
//!
//! Centralizes timeout, user-agent, compression and proxy handling so every
//! fetcher is built the same way.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder, Proxy};
use tracing::warn;

use super::FetcherError;

/// Default connect timeout for catalog requests.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default total request timeout for catalog requests.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// Builds the catalog HTTP client.
///
/// # Errors
///
/// Returns [`FetcherError`] when client construction fails.
pub(crate) fn build_catalog_http_client(
    user_agent: &str,
    connect_timeout: Duration,
    read_timeout: Duration,
) -> Result<Client, FetcherError> {
    match try_build_client(user_agent, connect_timeout, read_timeout, false) {
        Ok(client) => Ok(client),
        Err(BuildClientFailure::Panic) => {
            // Some sandboxed environments panic when querying system proxy
            // settings; retry with environment proxies only.
            warn!("Catalog client hit system proxy panic; using env-proxy fallback builder");
            match try_build_client(user_agent, connect_timeout, read_timeout, true) {
                Ok(client) => Ok(client),
                Err(BuildClientFailure::Panic) => Err(FetcherError::client_build(
                    "HTTP client construction panicked while reading proxy settings",
                )),
                Err(BuildClientFailure::Build(error)) => {
                    Err(FetcherError::client_build(&error.to_string()))
                }
            }
        }
        Err(BuildClientFailure::Build(error)) => {
            Err(FetcherError::client_build(&error.to_string()))
        }
    }
}

enum BuildClientFailure {
    Panic,
    Build(reqwest::Error),
}

fn try_build_client(
    user_agent: &str,
    connect_timeout: Duration,
    read_timeout: Duration,
    disable_system_proxy_lookup: bool,
) -> Result<Client, BuildClientFailure> {
    let user_agent = user_agent.to_string();
    catch_unwind(AssertUnwindSafe(move || {
        let mut builder = base_builder(user_agent, connect_timeout, read_timeout);
        if disable_system_proxy_lookup {
            builder = apply_env_proxy_fallback(builder.no_proxy());
        }
        builder.build().map_err(BuildClientFailure::Build)
    }))
    .map_err(|_| BuildClientFailure::Panic)?
}

fn base_builder(user_agent: String, connect_timeout: Duration, read_timeout: Duration) -> ClientBuilder {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(read_timeout)
        .user_agent(user_agent)
        .default_headers(headers)
        .gzip(true)
}

fn apply_env_proxy_fallback(mut builder: ClientBuilder) -> ClientBuilder {
    if let Some(proxy) = env_proxy_for_scheme("https")
        && let Ok(resolved) = Proxy::https(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    if let Some(proxy) = env_proxy_for_scheme("http")
        && let Ok(resolved) = Proxy::http(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    builder
}

fn env_proxy_for_scheme(scheme: &str) -> Option<String> {
    match scheme {
        "https" => find_first_proxy_var(&["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"]),
        "http" => find_first_proxy_var(&["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"]),
        _ => None,
    }
}

fn find_first_proxy_var(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
