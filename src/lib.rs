//! imagedl downloads long, line-delimited lists of image URLs concurrently
//! and reports what happened to every single one of them.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use imagedl::{batch::LineFileSource, DownloaderBuilder, Error};
//! use std::path::PathBuf;
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("downloads"))
//!     .workers(10)
//!     .build()?;
//! let source = LineFileSource::new("images.txt", 25);
//!
//! let report = downloader.download_all(&source, CancellationToken::new()).await?;
//! println!("{} images downloaded", report.downloaded_images.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`batch`] - URL batch sources and the bounded batch queue
//! - [`download`] - outcomes, the aggregate report and destination naming
//! - [`downloader`] - the worker pool (`Downloader`) and its builder
//! - [`error`] - run-level error handling with the `Error` enum
//! - [`http`] - HTTP client, retry policy and the retrying fetcher
//! - [`image`] - the image client and file persistence
//! - [`progress`] - progress bar styling and display management

pub mod batch;
pub mod download;
pub mod downloader;
pub mod error;
pub mod http;
pub mod image;
pub mod progress;

pub use batch::{BatchQueue, BatchSource, LineFileSource, MemorySource};
pub use download::{DestinationNamer, ImageInfo, Report, Status, Summary};
pub use downloader::{Downloader, DownloaderBuilder};
pub use error::{Error, Result};
pub use http::{create_http_client, ContentTypes, HttpClientConfig, RetryOptions, RetryingFetcher};
pub use image::{DownloadError, DownloadImage, ImageClient, LocalFileWriter};
pub use progress::{ProgressBarOpts, StyleOptions};
