//! Destination naming for downloaded images.
//!
//! A destination is chosen in two stages. The base name and a unique token
//! are picked from the URL before any request is sent; the extension is only
//! known once the response content type is, so [`Destination::path_for`]
//! finishes the path afterwards.
//!
//! ```rust
//! use imagedl::download::DestinationNamer;
//! use imagedl::ContentTypes;
//! use std::path::Path;
//!
//! let namer = DestinationNamer::new("/downloads", ContentTypes::common())
//!     .with_token_fn(|| "01J9ZQ".to_string());
//!
//! let destination = namer.name_for("https://example.com/cat.jpeg");
//! assert_eq!(destination.path_for("image/png"), Path::new("/downloads/cat_01j9zq.png"));
//! ```

use crate::http::ContentTypes;

use reqwest::Url;
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// Generator of unique, time-ordered tokens.
pub type TokenFn = Arc<dyn Fn() -> String + Send + Sync>;

/// Derives collision-resistant file paths under a storage root.
#[derive(Clone)]
pub struct DestinationNamer {
    root: PathBuf,
    content_types: ContentTypes,
    token: TokenFn,
}

impl fmt::Debug for DestinationNamer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DestinationNamer")
            .field("root", &self.root)
            .field("content_types", &self.content_types)
            .finish()
    }
}

impl DestinationNamer {
    /// Creates a namer using UUIDv7 tokens, which sort by creation time.
    pub fn new(root: impl Into<PathBuf>, content_types: ContentTypes) -> Self {
        Self {
            root: root.into(),
            content_types,
            token: Arc::new(|| Uuid::now_v7().simple().to_string()),
        }
    }

    /// Replaces the token generator.
    pub fn with_token_fn<F>(mut self, token: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.token = Arc::new(token);
        self
    }

    /// Storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Picks the file stem for `url`: `{base name without extension}_{token}`.
    pub fn name_for(&self, url: &str) -> Destination {
        let base = base_name(&url_path(url));
        let token = (self.token)().to_lowercase();

        Destination {
            root: self.root.clone(),
            file_stem: format!("{}_{}", strip_extension(&base), token),
            content_types: self.content_types.clone(),
        }
    }
}

/// A destination whose extension is still pending.
#[derive(Debug, Clone)]
pub struct Destination {
    root: PathBuf,
    file_stem: String,
    content_types: ContentTypes,
}

impl Destination {
    /// Unescaped file stem.
    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }

    /// Final path for a response of the given (normalized) content type.
    ///
    /// The stem is percent-escaped as a single path segment; unaccepted
    /// content types get no extension.
    pub fn path_for(&self, content_type: &str) -> PathBuf {
        let extension = self.content_types.extension(content_type).unwrap_or_default();
        self.root
            .join(format!("{}{}", urlencoding::encode(&self.file_stem), extension))
    }
}

/// Decoded path of `url`, empty when the URL has no path at all.
fn url_path(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };

    // The parser turns a missing path into "/" for http(s); look at the raw
    // text to tell "https://a.com" and "https://a.com/" apart.
    let after_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let without_query = after_scheme.split(['?', '#']).next().unwrap_or_default();
    if !without_query.contains('/') {
        return String::new();
    }

    let path = parsed.path();
    urlencoding::decode(path)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| path.to_owned())
}

/// Last element of a slash-separated path.
///
/// Trailing slashes are ignored; a path made only of slashes yields `"/"`,
/// and an empty path yields an empty name.
fn base_name(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_owned();
    }

    trimmed
        .rsplit('/')
        .next()
        .unwrap_or(trimmed)
        .to_owned()
}

/// Removes the extension (from the last dot of the name) if any.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => name,
    }
}
