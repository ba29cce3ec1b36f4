//! HTTP client behavior against a mock backend
//!
//! Covers the 401 refresh-and-retry cycle: exactly one refresh, exactly one
//! retry, and no retries for any other failure.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use positivevoice_infra::{ApiClient, ApiClientConfig, ApiError, BearerTokens};

#[derive(Debug, Deserialize)]
struct Pong {
    ok: bool,
}

struct StubTokens {
    token: Mutex<Option<String>>,
    refresh_result: bool,
    refreshed_token: Option<String>,
    refresh_calls: AtomicUsize,
}

impl StubTokens {
    fn new(token: Option<&str>) -> Self {
        Self {
            token: Mutex::new(token.map(String::from)),
            refresh_result: false,
            refreshed_token: None,
            refresh_calls: AtomicUsize::new(0),
        }
    }

    fn with_refresh(token: Option<&str>, refreshed: &str) -> Self {
        Self {
            token: Mutex::new(token.map(String::from)),
            refresh_result: true,
            refreshed_token: Some(refreshed.to_string()),
            refresh_calls: AtomicUsize::new(0),
        }
    }

    fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BearerTokens for StubTokens {
    async fn id_token(&self) -> Option<String> {
        self.token.lock().clone()
    }

    async fn refresh_token_if_needed(&self) -> bool {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if self.refresh_result {
            *self.token.lock() = self.refreshed_token.clone();
        } else {
            *self.token.lock() = None;
        }
        self.refresh_result
    }
}

fn client(server: &MockServer, tokens: Arc<StubTokens>) -> ApiClient {
    ApiClient::new(ApiClientConfig::new(server.uri()), tokens).expect("api client")
}

#[tokio::test]
async fn attaches_bearer_header_and_decodes_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("Authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(StubTokens::new(Some("token-1"))));
    let pong: Pong = api.get("/ping", &[]).await.expect("response");
    assert!(pong.ok);
}

#[tokio::test]
async fn refresh_and_retry_is_indistinguishable_from_first_try_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = Arc::new(StubTokens::with_refresh(Some("stale"), "fresh"));
    let api = client(&server, tokens.clone());

    let pong: Pong = api.get("/ping", &[]).await.expect("retried response");
    assert!(pong.ok);
    assert_eq!(tokens.refresh_calls(), 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn failed_refresh_surfaces_unauthorized_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = Arc::new(StubTokens::new(Some("stale")));
    let api = client(&server, tokens.clone());

    let result: Result<Pong, ApiError> = api.get("/ping", &[]).await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
    assert_eq!(tokens.refresh_calls(), 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn second_401_after_refresh_is_final() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    let tokens = Arc::new(StubTokens::with_refresh(Some("stale"), "fresh"));
    let api = client(&server, tokens.clone());

    let result: Result<Pong, ApiError> = api.get("/ping", &[]).await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
    assert_eq!(tokens.refresh_calls(), 1, "only one refresh per request");
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = Arc::new(StubTokens::new(Some("token-1")));
    let api = client(&server, tokens.clone());

    let result: Result<Pong, ApiError> = api.get("/ping", &[]).await;
    assert!(matches!(result, Err(ApiError::Http(500))));
    assert_eq!(tokens.refresh_calls(), 0, "refresh is reserved for 401");
}

#[tokio::test]
async fn requests_without_a_session_omit_the_bearer_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(StubTokens::new(None)));
    let _pong: Pong = api.get("/ping", &[]).await.expect("anonymous response");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("Authorization").is_none());
}

#[tokio::test]
async fn query_parameters_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(wiremock::matchers::query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(StubTokens::new(Some("token-1"))));
    let _pong: Pong = api.get("/items", &[("limit", "20".to_string())]).await.expect("response");
}

#[tokio::test]
async fn post_retry_resends_the_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header("Authorization", "Bearer fresh"))
        .and(wiremock::matchers::body_json(serde_json::json!({"name": "水"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = Arc::new(StubTokens::with_refresh(Some("stale"), "fresh"));
    let api = client(&server, tokens);

    let pong: Pong = api
        .post("/items", &serde_json::json!({"name": "水"}))
        .await
        .expect("retried post");
    assert!(pong.ok);
}
