//! Image client: fetches one image and persists it.
//!
//! # Examples
//!
//! ```rust,no_run
//! use imagedl::download::DestinationNamer;
//! use imagedl::http::{create_http_client, ContentTypes, HttpClientConfig, RetryingFetcher};
//! use imagedl::image::{DownloadImage, ImageClient, LocalFileWriter};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let types = ContentTypes::common();
//! let fetcher = RetryingFetcher::new(create_http_client(HttpClientConfig::default())?, types.clone());
//! let client = ImageClient::new(fetcher, LocalFileWriter);
//! let namer = DestinationNamer::new("downloads", types);
//!
//! let url = "https://example.com/cat.jpg";
//! let path = client
//!     .download_image(&CancellationToken::new(), url, namer.name_for(url))
//!     .await?;
//! println!("saved to {}", path.display());
//! # Ok(())
//! # }
//! ```

use super::writer::{FileWriter, LocalFileWriter};
use crate::download::{Destination, Status};
use crate::http::{FetchError, Fetched, RetryingFetcher};

use async_trait::async_trait;
use reqwest::{Method, Request, Response, StatusCode, Url};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Everything that can go wrong while downloading one image.
///
/// Each variant is created where the failure happens and maps to exactly one
/// outcome category through [`DownloadError::into_status`].
#[derive(Error, Debug)]
pub enum DownloadError {
    /// The URL could not be turned into an HTTP request.
    #[error("could not build http request: {0}")]
    MakeRequest(String),

    /// The transport failed after all retries.
    #[error("could not fetch http response: {source}")]
    Fetch {
        #[source]
        source: reqwest_middleware::Error,
    },

    /// The response content type is not accepted.
    #[error("skip image due to not listed in accepted content type: {0:?}")]
    SkippedContentType(String),

    /// The server answered 404.
    #[error("could not download a non-existing image")]
    ImageNotFound,

    /// The server answered any other non-success status.
    #[error("could not download an invalid image: {0}")]
    InvalidImage(StatusCode),

    /// The destination file could not be created.
    #[error("could not create a new image file {path:?}: {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The body could not be copied into the destination file.
    #[error("could not copy image into the destination path {path:?}: {source}")]
    CopyImage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The run was cancelled while this download was pending.
    #[error("download cancelled")]
    Cancelled,
}

impl DownloadError {
    /// Outcome category of this error, carrying its description.
    pub fn into_status(self) -> Status {
        let msg = self.to_string();
        match self {
            DownloadError::SkippedContentType(_) => Status::Skipped(msg),
            DownloadError::ImageNotFound => Status::NotFound(msg),
            DownloadError::MakeRequest(_) | DownloadError::InvalidImage(_) => Status::Invalid(msg),
            DownloadError::Fetch { .. }
            | DownloadError::CreateFile { .. }
            | DownloadError::CopyImage { .. }
            | DownloadError::Cancelled => Status::Failed(msg),
        }
    }
}

impl From<FetchError> for DownloadError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transport(source) => DownloadError::Fetch { source },
            FetchError::SkippedContentType(content_type) => {
                DownloadError::SkippedContentType(content_type)
            }
        }
    }
}

/// Fetches an image and saves it, returning the path it was written to.
///
/// Implementations must observe `cancel` and give up with
/// [`DownloadError::Cancelled`] instead of hanging.
#[async_trait]
pub trait DownloadImage: Send + Sync + 'static {
    async fn download_image(
        &self,
        cancel: &CancellationToken,
        url: &str,
        destination: Destination,
    ) -> Result<PathBuf, DownloadError>;
}

/// Downloads images through a [`RetryingFetcher`] and hands the bytes to a
/// [`FileWriter`].
#[derive(Debug, Clone)]
pub struct ImageClient<W = LocalFileWriter> {
    fetcher: RetryingFetcher,
    writer: W,
}

impl<W: FileWriter> ImageClient<W> {
    pub fn new(fetcher: RetryingFetcher, writer: W) -> Self {
        Self { fetcher, writer }
    }

    /// Builds the GET request for `url`.
    pub fn build_request(url: &str) -> Result<Request, DownloadError> {
        let url = Url::parse(url).map_err(|e| DownloadError::MakeRequest(e.to_string()))?;

        match url.scheme() {
            "http" | "https" => Ok(Request::new(Method::GET, url)),
            scheme => Err(DownloadError::MakeRequest(format!(
                "unsupported url scheme {:?}",
                scheme
            ))),
        }
    }

    async fn save(&self, response: Response, path: PathBuf) -> Result<PathBuf, DownloadError> {
        let mut file = match self.writer.create(&path).await {
            Ok(file) => file,
            Err(source) => return Err(DownloadError::CreateFile { path, source }),
        };

        match self.writer.copy(&mut file, response).await {
            Ok(written) => {
                debug!("Wrote {} bytes to {:?}", written, path);
                Ok(path)
            }
            Err(source) => Err(DownloadError::CopyImage { path, source }),
        }
    }
}

#[async_trait]
impl<W: FileWriter + 'static> DownloadImage for ImageClient<W> {
    async fn download_image(
        &self,
        cancel: &CancellationToken,
        url: &str,
        destination: Destination,
    ) -> Result<PathBuf, DownloadError> {
        let request = Self::build_request(url)?;

        debug!("Fetching {}", url);
        let Fetched {
            response,
            content_type,
        } = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(DownloadError::Cancelled),
            fetched = self.fetcher.fetch(request) => fetched?,
        };

        match response.status() {
            StatusCode::NOT_FOUND => return Err(DownloadError::ImageNotFound),
            status if !status.is_success() => return Err(DownloadError::InvalidImage(status)),
            _ => (),
        }

        let path = destination.path_for(&content_type);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DownloadError::Cancelled),
            saved = self.save(response, path) => saved,
        }
    }
}
