//! HTTP module containing the retrying fetcher and its client setup.
//!
//! # Overview
//!
//! - [`client`] - HTTP client creation and middleware configuration
//! - [`retry`] - jittered backoff policy for transport failures
//! - [`content_type`] - accepted content types and their file extensions
//! - [`fetcher`] - the retrying fetcher that gates responses on content type
//!
//! # Examples
//!
//! ```rust
//! use imagedl::http::{create_http_client, ContentTypes, HttpClientConfig, RetryingFetcher};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let fetcher = RetryingFetcher::new(client, ContentTypes::common());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod content_type;
pub mod fetcher;
pub mod retry;

pub use client::{client_builder, create_http_client, HttpClientConfig};
pub use content_type::ContentTypes;
pub use fetcher::{FetchError, Fetched, RetryingFetcher};
pub use retry::{JitteredBackoff, RetryOptions, TransportFailuresOnly};
