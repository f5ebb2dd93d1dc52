//! Download outcomes, the aggregate report and destination naming.
//!
//! # Overview
//!
//! - [`summary`] - per-URL outcome ([`Summary`]) and its category ([`Status`])
//! - [`report`] - the five-way aggregate [`Report`]
//! - [`destination`] - two-stage file naming ([`DestinationNamer`])
//!
//! # Examples
//!
//! ```rust
//! use imagedl::download::{Report, Status, Summary};
//!
//! let mut report = Report::default();
//! report.record(Summary::new("not a url", Status::Invalid("image url is invalid".into())));
//! assert_eq!(report.invalid_images.len(), 1);
//! ```

pub mod destination;
pub mod report;
pub mod summary;

pub use destination::{Destination, DestinationNamer, TokenFn};
pub use report::{ImageInfo, Report};
pub use summary::{Status, Summary};
