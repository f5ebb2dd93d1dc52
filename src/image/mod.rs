//! Image client and file persistence.
//!
//! - [`client`] - [`ImageClient`], the [`DownloadImage`] seam and [`DownloadError`]
//! - [`writer`] - the [`FileWriter`] collaborator and its local implementation

pub mod client;
pub mod writer;

pub use client::{DownloadError, DownloadImage, ImageClient};
pub use writer::{FileWriter, LocalFileWriter, Sink};
