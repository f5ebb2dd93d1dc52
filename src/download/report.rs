//! The aggregate report: five disjoint outcome collections.

use super::summary::{Status, Summary};
use serde::{Deserialize, Serialize};

/// One URL in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Categorized outcomes of a run.
///
/// Every URL handed to the downloader lands in exactly one collection.
/// Collections are append-only; ordering inside each one follows completion
/// order and is not meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub downloaded_images: Vec<ImageInfo>,
    pub skipped_images: Vec<ImageInfo>,
    pub not_found_images: Vec<ImageInfo>,
    pub invalid_images: Vec<ImageInfo>,
    pub failed_images: Vec<ImageInfo>,
}

impl Report {
    /// Files one outcome under its category.
    pub fn record(&mut self, summary: Summary) {
        let (url, status) = summary.into_parts();
        let (bucket, error) = match status {
            Status::Downloaded => (&mut self.downloaded_images, None),
            Status::Skipped(msg) => (&mut self.skipped_images, Some(msg)),
            Status::NotFound(msg) => (&mut self.not_found_images, Some(msg)),
            Status::Invalid(msg) => (&mut self.invalid_images, Some(msg)),
            Status::Failed(msg) => (&mut self.failed_images, Some(msg)),
        };
        bucket.push(ImageInfo { url, error });
    }

    /// Moves every outcome of `other` into `self`.
    pub fn merge(&mut self, other: Report) {
        self.downloaded_images.extend(other.downloaded_images);
        self.skipped_images.extend(other.skipped_images);
        self.not_found_images.extend(other.not_found_images);
        self.invalid_images.extend(other.invalid_images);
        self.failed_images.extend(other.failed_images);
    }

    /// Total number of outcomes.
    pub fn len(&self) -> usize {
        self.downloaded_images.len()
            + self.skipped_images.len()
            + self.not_found_images.len()
            + self.invalid_images.len()
            + self.failed_images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(category, count)` pairs in report order.
    pub fn counts(&self) -> [(&'static str, usize); 5] {
        [
            ("downloaded", self.downloaded_images.len()),
            ("skipped", self.skipped_images.len()),
            ("not found", self.not_found_images.len()),
            ("invalid", self.invalid_images.len()),
            ("failed", self.failed_images.len()),
        ]
    }
}

impl FromIterator<Summary> for Report {
    fn from_iter<I: IntoIterator<Item = Summary>>(iter: I) -> Self {
        let mut report = Report::default();
        iter.into_iter().for_each(|summary| report.record(summary));
        report
    }
}
