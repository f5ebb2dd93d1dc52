//! Configuration structures and defaults for the downloader.
//!
//! # Examples
//!
//! ```rust
//! use imagedl::downloader::DownloadCallback;
//! use imagedl::download::{Status, Summary};
//!
//! let callback: DownloadCallback = Box::new(|summary: &Summary| match summary.status() {
//!     Status::Downloaded => println!("✓ {}", summary.url()),
//!     other => println!("✗ {} - {:?}", summary.url(), other),
//! });
//! ```

use crate::download::Summary;
use crate::http::{ContentTypes, HttpClientConfig, RetryOptions};
use crate::StyleOptions;

use reqwest::header::HeaderMap;
use std::env::current_dir;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Callback type for download completion events
pub type DownloadCallback = Box<dyn Fn(&Summary) + Send + Sync>;

/// Configuration structure for the downloader
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Directory where to store the downloaded images.
    pub directory: PathBuf,
    /// Number of workers, each processing one batch at a time.
    pub workers: usize,
    /// Number of batches that may wait in the queue.
    pub queue_capacity: usize,
    /// Retry policy for transport failures.
    pub retry: RetryOptions,
    /// Accepted content types and their extensions.
    pub content_types: ContentTypes,
    /// Timeout of a single HTTP attempt.
    pub timeout: Option<Duration>,
    /// Optional proxy configuration.
    pub proxy: Option<reqwest::Proxy>,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Downloader style options.
    pub style_options: StyleOptions,
    /// Callback for when each URL gets its outcome.
    pub on_complete: Option<Arc<DownloadCallback>>,
}

impl DownloaderConfig {
    /// HTTP client settings derived from this configuration.
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            retry: self.retry,
            proxy: self.proxy.clone(),
            headers: self.headers.clone(),
            timeout: self.timeout,
        }
    }
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("directory", &self.directory)
            .field("workers", &self.workers)
            .field("queue_capacity", &self.queue_capacity)
            .field("retry", &self.retry)
            .field("content_types", &self.content_types)
            .field("timeout", &self.timeout)
            .field("proxy", &self.proxy)
            .field("headers", &self.headers)
            .field("style_options", &self.style_options)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            directory: current_dir().unwrap_or_default(),
            workers: 10,
            queue_capacity: 10,
            retry: RetryOptions::default(),
            content_types: ContentTypes::common(),
            timeout: Some(Duration::from_secs(60)),
            proxy: None,
            headers: None,
            style_options: StyleOptions::default(),
            on_complete: None,
        }
    }
}
