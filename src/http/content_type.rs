//! Accepted content types and the file extension each one is stored with.

use reqwest::{header::CONTENT_TYPE, Response};
use std::collections::HashMap;
use std::sync::Arc;

/// Mapping from accepted MIME type to file extension (leading dot included).
///
/// Responses whose content type is not a key of this mapping are skipped.
/// The mapping is shared cheaply between the fetcher and the destination namer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypes {
    extensions: Arc<HashMap<String, String>>,
}

impl ContentTypes {
    /// Common image types.
    pub const COMMON: [(&'static str, &'static str); 10] = [
        ("image/jpeg", ".jpg"),
        ("image/png", ".png"),
        ("image/gif", ".gif"),
        ("image/bmp", ".bmp"),
        ("image/webp", ".webp"),
        ("image/svg+xml", ".svg"),
        ("image/x-icon", ".ico"),
        ("image/tiff", ".tiff"),
        ("image/vnd.radiance", ".hdr"),
        ("image/jp2", ".jp2"),
    ];

    /// Creates a mapping from `(mime, extension)` pairs.
    ///
    /// Keys are normalized the same way response headers are, so
    /// `"Image/JPEG"` and `"image/jpeg"` are the same entry.
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let extensions = pairs
            .into_iter()
            .map(|(mime, ext)| (Self::normalize(mime.as_ref()), ext.into()))
            .collect();
        Self {
            extensions: Arc::new(extensions),
        }
    }

    /// The ten common image types.
    pub fn common() -> Self {
        Self::new(Self::COMMON)
    }

    /// Normalizes a `Content-Type` header value: parameters are dropped and
    /// the essence is trimmed and lowercased.
    ///
    /// ```rust
    /// use imagedl::ContentTypes;
    ///
    /// assert_eq!(ContentTypes::normalize("Image/JPEG; charset=binary"), "image/jpeg");
    /// ```
    pub fn normalize(value: &str) -> String {
        value
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }

    /// Resolves the normalized content type of a response, or an empty string
    /// when the header is absent or not valid text.
    pub fn resolve(response: &Response) -> String {
        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(Self::normalize)
            .unwrap_or_default()
    }

    /// Whether the (already normalized) content type is accepted.
    pub fn accepts(&self, content_type: &str) -> bool {
        self.extensions.contains_key(content_type)
    }

    /// Extension for an accepted content type.
    pub fn extension(&self, content_type: &str) -> Option<&str> {
        self.extensions.get(content_type).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self::common()
    }
}
