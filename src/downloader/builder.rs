//! Builder pattern implementation for creating Downloader instances.
//!
//! # Examples
//!
//! ```rust
//! use imagedl::downloader::DownloaderBuilder;
//! use std::path::PathBuf;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), imagedl::Error> {
//! let downloader = DownloaderBuilder::hidden()
//!     .directory(PathBuf::from("./downloads"))
//!     .workers(4)
//!     .max_attempts(5)
//!     .base_delay(Duration::from_millis(100))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use super::{config::DownloaderConfig, downloader::Downloader};
use crate::download::{DestinationNamer, Summary};
use crate::error::{Error, Result};
use crate::http::{create_http_client, ContentTypes, RetryOptions, RetryingFetcher};
use crate::image::{DownloadImage, ImageClient, LocalFileWriter};
use crate::StyleOptions;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::{path::PathBuf, sync::Arc, time::Duration};

/// A builder used to create a [`Downloader`].
///
/// ```rust
/// # fn main() -> Result<(), imagedl::Error> {
/// use imagedl::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().workers(5).directory("downloads".into()).build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Convenience function to hide the progress bars.
    pub fn hidden() -> Self {
        let mut builder = DownloaderBuilder::default();
        builder.config.style_options = StyleOptions::hidden();
        builder
    }

    /// Sets the directory where to store the images.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Set the number of workers.
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Set how many batches may wait for a worker.
    pub fn queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.config.queue_capacity = queue_capacity;
        self
    }

    /// Replace the whole retry policy.
    pub fn retry(mut self, retry: RetryOptions) -> Self {
        self.config.retry = retry;
        self
    }

    /// Set the backoff scale.
    pub fn base_delay(mut self, base_delay: Duration) -> Self {
        self.config.retry.base_delay = base_delay;
        self
    }

    /// Set the largest acceptable backoff delay.
    pub fn max_delay(mut self, max_delay: Duration) -> Self {
        self.config.retry.max_delay = max_delay;
        self
    }

    /// Set the number of retries after the first attempt.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.retry.max_attempts = max_attempts;
        self
    }

    /// Set the accepted content types.
    pub fn content_types(mut self, content_types: ContentTypes) -> Self {
        self.config.content_types = content_types;
        self
    }

    /// Set the timeout of a single HTTP attempt; `None` disables it.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Route requests through a proxy.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Set the downloader style options.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Set callback for when each URL gets its outcome.
    ///
    /// The callback runs on the worker that recorded the outcome, while other
    /// downloads may still be in progress. A panic inside the callback is
    /// logged and does not affect the report.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Summary) + Send + Sync + 'static,
    {
        self.config.on_complete = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be
    /// merged into a single one.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add the http header
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue};
    /// use imagedl::downloader::DownloaderBuilder;
    ///
    /// let builder = DownloaderBuilder::new()
    ///     .header(header::USER_AGENT, HeaderValue::from_static("imagedl/0.1"));
    /// ```
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.config.workers == 0 {
            return Err(Error::InvalidConfig("workers must be at least 1".into()));
        }
        if self.config.queue_capacity == 0 {
            return Err(Error::InvalidConfig(
                "queue capacity must be at least 1".into(),
            ));
        }
        if self.config.content_types.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one content type must be accepted".into(),
            ));
        }
        Ok(())
    }

    /// Create the [`Downloader`] with the HTTP image client.
    pub fn build(self) -> Result<Downloader> {
        self.validate()?;

        let client = create_http_client(self.config.http_client_config())?;
        let fetcher = RetryingFetcher::new(client, self.config.content_types.clone());
        let image_client = ImageClient::new(fetcher, LocalFileWriter);

        self.build_with_client(image_client)
    }

    /// Create the [`Downloader`] around any image client.
    pub fn build_with_client<D: DownloadImage>(self, client: D) -> Result<Downloader<D>> {
        self.validate()?;

        let namer = DestinationNamer::new(
            self.config.directory.clone(),
            self.config.content_types.clone(),
        );
        Ok(Downloader::new(self.config, Arc::new(client), namer))
    }
}
