//! Tests for the retrying fetcher: retry budget and content-type gating.

use imagedl::http::{create_http_client, ContentTypes, FetchError, HttpClientConfig};
use reqwest::{Method, Request, StatusCode, Url};
use std::sync::atomic::Ordering;
use std::time::Duration;

mod common;
use common::helpers::*;

fn get(url: &str) -> Request {
    Request::new(Method::GET, Url::parse(url).unwrap())
}

#[test]
fn test_create_http_client_with_custom_config() {
    let config = HttpClientConfig {
        retry: fast_retry(5),
        proxy: None,
        headers: Some(create_test_headers()),
        timeout: Some(Duration::from_secs(5)),
    };
    assert!(create_http_client(config).is_ok());
}

#[tokio::test]
async fn test_fetch_succeeds_first_time() {
    let transport = StubTransport::image();
    let calls = transport.calls();
    let fetcher = stub_fetcher(transport, fast_retry(3));

    let fetched = fetcher.fetch(get(TEST_IMAGE_URL)).await.unwrap();
    assert_eq!(fetched.content_type, "image/jpeg");
    assert_eq!(fetched.response.status(), StatusCode::OK);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_fetch_recovers_within_retry_budget() {
    // Fails three times, then succeeds on the fourth and last allowed call.
    for failures in 1..=3 {
        let transport = StubTransport::image().failing_first(failures);
        let calls = transport.calls();
        let fetcher = stub_fetcher(transport, fast_retry(3));

        let fetched = fetcher.fetch(get(TEST_IMAGE_URL)).await;
        assert!(fetched.is_ok(), "failures = {}", failures);
        assert_eq!(calls.load(Ordering::SeqCst), failures + 1);
    }
}

#[tokio::test]
async fn test_fetch_gives_up_after_retry_budget() {
    let transport = StubTransport::image().failing_first(usize::MAX);
    let calls = transport.calls();
    let fetcher = stub_fetcher(transport, fast_retry(3));

    let err = fetcher.fetch(get(TEST_IMAGE_URL)).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "{:?}", err);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_fetch_without_retries_calls_once() {
    let transport = StubTransport::image().failing_first(usize::MAX);
    let calls = transport.calls();
    let fetcher = stub_fetcher(transport, fast_retry(0));

    let err = fetcher.fetch(get(TEST_IMAGE_URL)).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_fetch_does_not_retry_error_statuses() {
    let transport = StubTransport::respond(503, Some("image/jpeg"));
    let calls = transport.calls();
    let fetcher = stub_fetcher(transport, fast_retry(3));

    let fetched = fetcher.fetch(get(TEST_IMAGE_URL)).await.unwrap();
    assert_eq!(fetched.response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_fetch_skips_unaccepted_content_type_whatever_the_status() {
    for status in [200, 404, 500] {
        let transport = StubTransport::respond(status, Some("text/html; charset=utf-8"));
        let calls = transport.calls();
        let fetcher = stub_fetcher(transport, fast_retry(3));

        match fetcher.fetch(get(TEST_IMAGE_URL)).await {
            Err(FetchError::SkippedContentType(content_type)) => {
                assert_eq!(content_type, "text/html")
            }
            other => panic!("status {}: unexpected {:?}", status, other.map(|f| f.content_type)),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test]
async fn test_fetch_skips_missing_content_type() {
    let fetcher = stub_fetcher(StubTransport::respond(200, None), fast_retry(0));

    let err = fetcher.fetch(get(TEST_IMAGE_URL)).await.unwrap_err();
    assert!(matches!(err, FetchError::SkippedContentType(ref t) if t.is_empty()));
}

#[tokio::test]
async fn test_fetch_normalizes_content_type() {
    let transport = StubTransport::respond(200, Some(" Image/PNG ; q=0.9"));
    let fetcher = stub_fetcher(transport, fast_retry(0));

    let fetched = fetcher.fetch(get(TEST_IMAGE_URL)).await.unwrap();
    assert_eq!(fetched.content_type, "image/png");
    assert_eq!(fetcher.content_types().extension(&fetched.content_type), Some(".png"));
}

#[test]
fn test_custom_content_types() {
    let types = ContentTypes::new([("image/avif", ".avif")]);
    assert!(types.accepts("image/avif"));
    assert!(!types.accepts("image/jpeg"));
    assert_eq!(types.len(), 1);
}
