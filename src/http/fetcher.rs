//! Retrying fetcher with content-type gating.

use super::content_type::ContentTypes;

use reqwest::{Request, Response};
use reqwest_middleware::ClientWithMiddleware;
use thiserror::Error;
use tracing::debug;

/// Why a fetch produced no usable response.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The transport failed and retries were exhausted.
    #[error("transport failed: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// The server answered, but with a content type outside the accepted set.
    #[error("content type {0:?} is not accepted")]
    SkippedContentType(String),
}

/// An accepted response together with its resolved content type.
#[derive(Debug)]
pub struct Fetched {
    pub response: Response,
    pub content_type: String,
}

/// Sends requests through the retrying middleware stack and rejects any
/// response whose content type is not accepted.
///
/// The transport is whatever terminates the middleware chain, so a stub
/// middleware can stand in for the network.
#[derive(Debug, Clone)]
pub struct RetryingFetcher {
    client: ClientWithMiddleware,
    content_types: ContentTypes,
}

impl RetryingFetcher {
    pub fn new(client: ClientWithMiddleware, content_types: ContentTypes) -> Self {
        Self {
            client,
            content_types,
        }
    }

    /// The accepted content-type mapping.
    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    /// Executes the request.
    ///
    /// The content-type check happens before any status inspection: an
    /// unaccepted type is skipped whatever the HTTP status.
    pub async fn fetch(&self, request: Request) -> Result<Fetched, FetchError> {
        let response = self.client.execute(request).await?;
        let content_type = ContentTypes::resolve(&response);

        if !self.content_types.accepts(&content_type) {
            debug!(
                url = %response.url(),
                status = %response.status(),
                content_type = %content_type,
                "skipping response with unaccepted content type"
            );
            return Err(FetchError::SkippedContentType(content_type));
        }

        Ok(Fetched {
            response,
            content_type,
        })
    }
}
