//! HTTP client setup and middleware configuration.
//!
//! This module builds the `reqwest` client used for image downloads, wrapped
//! in `reqwest-middleware` with request tracing and the jittered retry policy
//! from [`retry`](super::retry).
//!
//! # Examples
//!
//! ```rust
//! use imagedl::http::{create_http_client, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! The chain can be extended before it is built, for instance with a
//! middleware that answers requests itself:
//!
//! ```rust
//! use imagedl::http::{client_builder, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = client_builder(HttpClientConfig::default())?.build();
//! # Ok(())
//! # }
//! ```

use super::retry::{JitteredBackoff, RetryOptions, TransportFailuresOnly};

use reqwest::{header::HeaderMap, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::RetryTransientMiddleware;
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;

/// Configuration for HTTP client setup.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Retry policy for transport failures.
    pub retry: RetryOptions,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
    /// Total timeout of a single attempt.
    pub timeout: Option<Duration>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            retry: RetryOptions::default(),
            proxy: None,
            headers: None,
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

/// Idle connections kept per host; matches the typical batch size.
const POOL_MAX_IDLE_PER_HOST: usize = 25;

/// Creates an HTTP client with middleware configuration.
///
/// The client traces every request and retries transport failures with
/// [`JitteredBackoff`]. HTTP error statuses are never retried.
pub fn create_http_client(config: HttpClientConfig) -> Result<ClientWithMiddleware, reqwest::Error> {
    Ok(client_builder(config)?.build())
}

/// Same as [`create_http_client`], but returns the middleware builder so
/// more middleware can be appended after the retry layer.
pub fn client_builder(config: HttpClientConfig) -> Result<ClientBuilder, reqwest::Error> {
    let retry_policy = JitteredBackoff::new(config.retry);

    let mut inner_client_builder =
        reqwest::Client::builder().pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST);

    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    if let Some(headers) = config.headers {
        inner_client_builder = inner_client_builder.default_headers(headers);
    }

    if let Some(timeout) = config.timeout {
        inner_client_builder = inner_client_builder.timeout(timeout);
    }

    let inner_client = inner_client_builder.build()?;

    Ok(ClientBuilder::new(inner_client)
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default())
        // Retry transport failures.
        .with(RetryTransientMiddleware::new_with_policy_and_strategy(
            retry_policy,
            TransportFailuresOnly,
        )))
}
