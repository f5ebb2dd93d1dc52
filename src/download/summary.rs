//! Per-URL download outcome.
//!
//! # Examples
//!
//! ```rust
//! use imagedl::download::{Status, Summary};
//!
//! let summary = Summary::new("https://example.com/a.jpg", Status::NotFound(
//!     "could not download a non-existing image".into(),
//! ));
//!
//! match summary.status() {
//!     Status::Downloaded => println!("saved {:?}", summary.path()),
//!     Status::Skipped(reason) => println!("skipped: {}", reason),
//!     Status::NotFound(reason) | Status::Invalid(reason) | Status::Failed(reason) => {
//!         println!("{}: {}", summary.url(), reason)
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

/// Outcome category of a single URL, with its error description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The image was fetched and persisted.
    Downloaded,
    /// The response content type is not accepted.
    Skipped(String),
    /// The server answered 404.
    NotFound(String),
    /// The URL is malformed or the server answered a non-2xx status.
    Invalid(String),
    /// Transport, persistence or any other failure.
    Failed(String),
}

impl Status {
    /// Error description, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Status::Downloaded => None,
            Status::Skipped(msg)
            | Status::NotFound(msg)
            | Status::Invalid(msg)
            | Status::Failed(msg) => Some(msg),
        }
    }
}

/// Represents the outcome of one URL.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Source URL.
    url: String,
    /// Status.
    status: Status,
    /// Where the image was written, for downloaded images.
    path: Option<PathBuf>,
}

impl Summary {
    /// Create a new [`Summary`].
    pub fn new(url: impl Into<String>, status: Status) -> Self {
        Self {
            url: url.into(),
            status,
            path: None,
        }
    }

    /// Create a summary for an image saved at `path`.
    pub fn downloaded(url: impl Into<String>, path: PathBuf) -> Self {
        Self {
            url: url.into(),
            status: Status::Downloaded,
            path: Some(path),
        }
    }

    /// Get the source URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Get the destination path of a downloaded image.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether the image ended up on disk.
    #[must_use]
    pub fn is_downloaded(&self) -> bool {
        self.status == Status::Downloaded
    }

    pub(crate) fn into_parts(self) -> (String, Status) {
        (self.url, self.status)
    }
}
