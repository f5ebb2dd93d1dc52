#![allow(dead_code)]

use async_trait::async_trait;
use imagedl::batch::{BatchQueue, BatchSource};
use imagedl::download::{Destination, DestinationNamer};
use imagedl::http::{client_builder, ContentTypes, HttpClientConfig, RetryOptions, RetryingFetcher};
use imagedl::image::{DownloadError, DownloadImage, FileWriter, Sink};
use imagedl::Error;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

// Common test constants
pub const TEST_USER_AGENT: &str = "imagedl-test-agent";
pub const TEST_TOKEN: &str = "01J9ZQ5W8R2X4TQ3N7D6E5F4G3";
pub const TEST_IMAGE_URL: &str = "https://fachr.in/static/image/memoji.jpg";
pub const TEST_IMAGE_BYTES: &[u8] = b"\xff\xd8\xff\xe0 not really a jpeg";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Writes a URL list to a temporary file.
pub fn create_url_list(dir: &Path, urls: &[&str]) -> PathBuf {
    let path = dir.join("images.txt");
    std::fs::write(&path, urls.join("\n")).expect("Failed to write url list");
    path
}

/// Creates test headers with common user agent
pub fn create_test_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(TEST_USER_AGENT));
    headers
}

/// Retry options with millisecond delays.
pub fn fast_retry(max_attempts: u32) -> RetryOptions {
    RetryOptions {
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_secs(1),
        max_attempts,
    }
}

/// A namer producing predictable file names under `root`.
pub fn fixed_namer(root: &Path) -> DestinationNamer {
    DestinationNamer::new(root, ContentTypes::common()).with_token_fn(|| TEST_TOKEN.to_string())
}

// === Transport stub ===

/// Terminates the middleware chain in place of the network.
///
/// The first `failures` calls fail at the transport level; later calls
/// answer with the configured status, content type and body.
#[derive(Clone)]
pub struct StubTransport {
    failures: usize,
    status: u16,
    content_type: Option<String>,
    body: Vec<u8>,
    calls: Arc<AtomicUsize>,
}

impl StubTransport {
    pub fn respond(status: u16, content_type: Option<&str>) -> Self {
        Self {
            failures: 0,
            status,
            content_type: content_type.map(String::from),
            body: TEST_IMAGE_BYTES.to_vec(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn image() -> Self {
        Self::respond(200, Some("image/jpeg"))
    }

    pub fn failing_first(mut self, failures: usize) -> Self {
        self.failures = failures;
        self
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl Middleware for StubTransport {
    async fn handle(
        &self,
        _req: Request,
        _extensions: &mut http::Extensions,
        _next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(reqwest_middleware::Error::Middleware(anyhow::anyhow!(
                "connection reset by peer"
            )));
        }

        let mut builder = http::Response::builder().status(self.status);
        if let Some(ref content_type) = self.content_type {
            builder = builder.header(CONTENT_TYPE, content_type.as_str());
        }
        let response = builder
            .body(self.body.clone())
            .expect("Failed to build stub response");
        Ok(Response::from(response))
    }
}

/// A retrying fetcher whose transport is `transport`.
pub fn stub_fetcher(transport: StubTransport, retry: RetryOptions) -> RetryingFetcher {
    let config = HttpClientConfig {
        retry,
        proxy: None,
        headers: Some(create_test_headers()),
        timeout: None,
    };
    let client = client_builder(config)
        .expect("Failed to build http client")
        .with(transport)
        .build();
    RetryingFetcher::new(client, ContentTypes::common())
}

// === File writer stub ===

/// Records created paths and optionally fails one of the two steps.
#[derive(Clone, Default)]
pub struct RecordingWriter {
    pub fail_create: bool,
    pub fail_copy: bool,
    pub created: Arc<Mutex<Vec<PathBuf>>>,
}

#[async_trait]
impl FileWriter for RecordingWriter {
    async fn create(&self, path: &Path) -> io::Result<Sink> {
        if self.fail_create {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.created.lock().unwrap().push(path.to_path_buf());
        Ok(Box::new(tokio::io::sink()))
    }

    async fn copy(&self, _destination: &mut Sink, mut source: Response) -> io::Result<u64> {
        if self.fail_copy {
            return Err(io::Error::other("disk full"));
        }
        let mut written = 0;
        while let Some(chunk) = source.chunk().await.map_err(io::Error::other)? {
            written += chunk.len() as u64;
        }
        Ok(written)
    }
}

// === Image client stub ===

type Script = dyn Fn(&str, &Destination) -> Result<PathBuf, DownloadError> + Send + Sync;

/// Answers each URL with the outcome chosen by a closure and counts calls.
pub struct ScriptedClient {
    script: Box<Script>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedClient {
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(&str, &Destination) -> Result<PathBuf, DownloadError> + Send + Sync + 'static,
    {
        Self {
            script: Box::new(script),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every URL downloads successfully.
    pub fn always_ok() -> Self {
        Self::new(|_, destination| Ok(destination.path_for("image/jpeg")))
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl DownloadImage for ScriptedClient {
    async fn download_image(
        &self,
        _cancel: &CancellationToken,
        url: &str,
        destination: Destination,
    ) -> Result<PathBuf, DownloadError> {
        self.calls.lock().unwrap().push(url.to_string());
        tokio::task::yield_now().await;
        (self.script)(url, &destination)
    }
}

/// Waits until cancelled, then fails.
pub struct HangingClient;

#[async_trait]
impl DownloadImage for HangingClient {
    async fn download_image(
        &self,
        cancel: &CancellationToken,
        _url: &str,
        _destination: Destination,
    ) -> Result<PathBuf, DownloadError> {
        cancel.cancelled().await;
        Err(DownloadError::Cancelled)
    }
}

// === Batch source stubs ===

/// Fails before submitting anything.
pub struct FailingSource;

#[async_trait]
impl BatchSource for FailingSource {
    async fn load(&self, _queue: &BatchQueue) -> imagedl::Result<()> {
        Err(Error::Load {
            path: PathBuf::from("/fixtures/missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        })
    }
}

/// Submits `good` batches, then fails.
pub struct FailingAfter {
    pub good: Vec<Vec<String>>,
}

#[async_trait]
impl BatchSource for FailingAfter {
    async fn load(&self, queue: &BatchQueue) -> imagedl::Result<()> {
        for batch in &self.good {
            queue.submit(batch.clone()).await?;
        }
        Err(Error::Load {
            path: PathBuf::from("/fixtures/truncated.txt"),
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "truncated"),
        })
    }
}

/// Generates `count` distinct valid URLs.
pub fn generate_urls(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("https://images.example.com/{}.jpg", i))
        .collect()
}
