//! Error handling for the imagedl library.
//!
//! Two layers of errors exist. [`Error`] covers failures that abort a whole
//! run (the URL list cannot be loaded, the configuration is unusable).
//! Everything that can go wrong for a single URL is a
//! [`DownloadError`](crate::image::DownloadError) instead, and is turned into
//! a categorized outcome at the task boundary.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a download run.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// Typically a worker task that panicked or was aborted.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The URL list could not be read.
    ///
    /// This is the only error that is fatal to a run: no report is produced.
    #[error("could not load url batches from {path:?}")]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Every worker has exited, so the batch queue no longer accepts work.
    #[error("the batch queue was closed before all batches were submitted")]
    QueueClosed,

    /// The downloader was configured with unusable values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error from the Reqwest library while building the HTTP client.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
}

/// Result type alias for operations that can fail with an imagedl [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
