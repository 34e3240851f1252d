//! Tests for the HTTP client module

use super::*;
use crate::auth::AuthConfig;
use crate::config::HttpClientConfig;
use crate::error::{Error, ErrorKind};
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_config(base_url: String, max_retries: u32) -> HttpClientConfig {
    HttpClientConfig::builder()
        .base_url(base_url)
        .max_retries(max_retries)
        .backoff(Duration::from_millis(10), 2)
        .build()
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("q", "cats")
        .query_pairs([("page", "2"), ("page", "3")])
        .header("X-Request-Id", "abc123")
        .timeout(Duration::from_secs(10))
        .retries(2)
        .resource("wallpaper abc123")
        .skip_auth();

    assert_eq!(
        config.query,
        vec![
            ("q".to_string(), "cats".to_string()),
            ("page".to_string(), "2".to_string()),
            ("page".to_string(), "3".to_string()),
        ]
    );
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    assert_eq!(config.max_retries, Some(2));
    assert_eq!(config.resource_or("url"), "wallpaper abc123");
    assert!(config.skip_auth);
}

#[test]
fn test_build_url() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com/v1/")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.build_url("/search"), "https://api.example.com/v1/search");
    assert_eq!(client.build_url("search"), "https://api.example.com/v1/search");
    assert_eq!(
        client.build_url("https://cdn.example.com/full.jpg"),
        "https://cdn.example.com/full.jpg"
    );
}

#[tokio::test]
async fn test_get_json_with_query_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "test"))
        .and(query_param("page", "2"))
        .and(header("X-Custom", "value"))
        .and(header("X-Request-Id", "req-456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": 42
        })))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Custom", "value")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let data: serde_json::Value = client
        .get_json(
            "/api/search",
            RequestConfig::new()
                .query("q", "test")
                .query("page", "2")
                .header("X-Request-Id", "req-456"),
        )
        .await
        .unwrap();

    assert_eq!(data["value"], 42);
}

#[tokio::test]
async fn test_get_bytes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/full/wallhaven-abc.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(HttpClientConfig::default()).unwrap();
    let bytes = client
        .get_bytes(
            &format!("{}/full/wallhaven-abc.jpg", mock_server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap();

    assert_eq!(bytes.as_ref(), &[0xFF, 0xD8, 0xFF]);
}

#[tokio::test]
async fn test_api_key_applied_unless_skipped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/secure"))
        .and(header("Authorization", "Client-ID key-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cdn"))
        .respond_with(ResponseTemplate::new(200).set_body_string("img"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_auth(
        fast_config(mock_server.uri(), 0),
        AuthConfig::prefixed_header("Authorization", "Client-ID ", "key-1"),
    )
    .unwrap();

    let _: serde_json::Value = client
        .get_json("/secure", RequestConfig::new())
        .await
        .unwrap();
    client
        .get_bytes("/cdn", RequestConfig::new().skip_auth())
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let cdn = requests.iter().find(|r| r.url.path() == "/cdn").unwrap();
    assert!(cdn.headers.get("Authorization").is_none());
}

#[tokio::test]
async fn test_status_classification() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/denied"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(fast_config(mock_server.uri(), 3)).unwrap();

    let err = client
        .get_bytes("/missing", RequestConfig::new().resource("wallpaper zzz999"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("wallpaper zzz999"));

    let err = client
        .get_bytes("/denied", RequestConfig::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);

    // 5xx is not retried even with a retry budget
    let err = client
        .get_bytes("/broken", RequestConfig::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_invalid_json_is_decode_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/garbage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(fast_config(mock_server.uri(), 0)).unwrap();
    let err = client
        .get_json::<serde_json::Value>("/garbage", RequestConfig::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert!(matches!(&err, Error::Decode { message } if message.starts_with("/garbage: ")));

    let config = fast_config(mock_server.uri(), 0);
    let err = tokio::task::spawn_blocking(move || {
        let client = BlockingHttpClient::with_config(config).unwrap();
        let err = client
            .get_json::<serde_json::Value>("/garbage", RequestConfig::new())
            .unwrap_err();
        err
    })
    .await
    .unwrap();
    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_rate_limit_no_retry_by_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "60"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(fast_config(mock_server.uri(), 0)).unwrap();
    let start = Instant::now();
    let err = client
        .get_bytes("/limited", RequestConfig::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RateLimited);
    assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_rate_limit_retried_then_succeeds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(fast_config(mock_server.uri(), 3)).unwrap();
    let start = Instant::now();
    let data: serde_json::Value = client
        .get_json("/limited", RequestConfig::new())
        .await
        .unwrap();

    assert_eq!(data["ok"], true);
    // 10ms + 20ms of backoff
    assert!(start.elapsed() >= Duration::from_millis(30));
}

#[tokio::test]
async fn test_rate_limit_retry_budget_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("x-ratelimit-reset", "0"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(fast_config(mock_server.uri(), 2)).unwrap();
    let err = client
        .get_bytes("/limited", RequestConfig::new())
        .await
        .unwrap_err();

    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_per_request_retry_override() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(429))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(fast_config(mock_server.uri(), 0)).unwrap();
    let err = client
        .get_bytes("/limited", RequestConfig::new().retries(1))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RateLimited);
}

#[tokio::test]
async fn test_blocking_client_pipeline() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "mountains"))
        .and(header("X-API-Key", "k"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"n": 1})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = fast_config(mock_server.uri(), 1);
    let (data, missing) = tokio::task::spawn_blocking(move || {
        let client =
            BlockingHttpClient::with_auth(config, AuthConfig::header("X-API-Key", "k")).unwrap();
        let data: serde_json::Value = client
            .get_json("/search", RequestConfig::new().query("q", "mountains"))
            .unwrap();
        let missing = client.get_bytes("/gone", RequestConfig::new()).unwrap_err();
        (data, missing)
    })
    .await
    .unwrap();

    assert_eq!(data["n"], 1);
    assert_eq!(missing.kind(), ErrorKind::NotFound);
}

#[test]
fn test_debug_hides_credentials() {
    let client = HttpClient::with_auth(
        HttpClientConfig::default(),
        AuthConfig::header("X-API-Key", "very-secret"),
    )
    .unwrap();
    let debug = format!("{client:?}");
    assert!(!debug.contains("very-secret"));
    assert!(debug.contains("has_credentials: true"));
}
