//! Downloader module: the worker pool, its builder and configuration.
//!
//! # Overview
//!
//! - `downloader` - the [`Downloader`] coordinator
//! - `builder` - [`DownloaderBuilder`] for configuration using the builder pattern
//! - `config` - configuration structures and callback types
//!
//! # Examples
//!
//! ```rust,no_run
//! use imagedl::downloader::DownloaderBuilder;
//!
//! # async fn example() -> Result<(), imagedl::Error> {
//! let downloader = DownloaderBuilder::hidden().workers(2).build()?;
//! let report = downloader
//!     .download_urls(["https://example.com/a.jpg", "https://example.com/b.png"], 25)
//!     .await?;
//! println!("{}", report.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Completion callback
//!
//! ```rust
//! use imagedl::downloader::DownloaderBuilder;
//! use imagedl::download::Status;
//!
//! let builder = DownloaderBuilder::new().on_complete(|summary| {
//!     if let Status::Failed(reason) = summary.status() {
//!         eprintln!("{} failed: {}", summary.url(), reason);
//!     }
//! });
//! ```

pub mod builder;
pub mod config;
pub mod downloader;

pub use builder::DownloaderBuilder;
pub use config::{DownloadCallback, DownloaderConfig};
pub use downloader::{Downloader, INVALID_URL_REASON};
