//! Progress module containing progress bar functionality.
//!
//! - `style` - Progress bar styling options and templates
//! - `display` - Progress bar display management and coordination
//!
//! # Examples
//!
//! ```rust
//! use imagedl::downloader::DownloaderBuilder;
//! use imagedl::progress::StyleOptions;
//!
//! let builder = DownloaderBuilder::new().style_options(StyleOptions::default());
//! ```

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::{ProgressBarOpts, StyleOptions};
