//! Integration tests for `UmamiClient` against a mock Umami server.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use pretty_assertions::assert_eq;
use reqwest::{Method, StatusCode};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use umami_mcp::client::UmamiClient;
use umami_mcp::config::Config;
use umami_mcp::credentials::Clock;
use umami_mcp::error::UmamiError;
use umami_mcp::query::QueryParams;

/// 2023-11-14T22:13:20Z, a whole second.
const START: i64 = 1_700_000_000_000;
const SECOND: i64 = 1000;
const HOUR: i64 = 3600 * SECOND;

struct ManualClock(AtomicI64);

impl ManualClock {
    fn at(millis: i64) -> Arc<Self> {
        Arc::new(Self(AtomicI64::new(millis)))
    }

    fn set(&self, millis: i64) {
        self.0.store(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

fn token_expiring_at(exp_seconds: i64) -> String {
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(format!(r#"{{"userId":"u1","exp":{}}}"#, exp_seconds))
    )
}

fn password_client(server: &MockServer, clock: Arc<ManualClock>) -> UmamiClient {
    let config = Config::new(server.uri(), "admin", "s3cret", "");
    UmamiClient::with_clock(config, clock).unwrap()
}

fn api_key_client(server: &MockServer) -> UmamiClient {
    UmamiClient::new(Config::new(server.uri(), "", "", "key-123")).unwrap()
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": token,
            "user": {"id": "u1", "username": "admin"}
        })))
        .mount(server)
        .await;
}

async fn mount_me(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u1"})))
        .mount(server)
        .await;
}

async fn login_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == "/api/auth/login")
        .count()
}

// ============================================================================
// Preflight
// ============================================================================

#[tokio::test]
async fn test_missing_base_url_fails_without_network() {
    let client = UmamiClient::new(Config::new("", "admin", "pw", "")).unwrap();
    let err = assert_err!(client.get("/api/me", None).await);
    assert!(matches!(err, UmamiError::Config(_)));
    assert!(err.to_string().contains("UMAMI_URL is not configured"));
}

#[tokio::test]
async fn test_missing_credentials_fail_without_network() {
    let server = MockServer::start().await;
    let client = UmamiClient::new(Config::new(server.uri(), "admin", "", "")).unwrap();

    let err = assert_err!(client.get("/api/me", None).await);
    assert!(matches!(err, UmamiError::Config(_)));
    assert!(err.to_string().contains("Authentication not configured"));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

// ============================================================================
// Credentials
// ============================================================================

#[tokio::test]
async fn test_api_key_is_bearer_and_login_never_happens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/websites"))
        .and(header("authorization", "Bearer key-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(2)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    assert_ok!(client.get("/api/websites", None).await);
    assert_ok!(client.get("/api/websites", None).await);
}

#[tokio::test]
async fn test_api_key_wins_over_username_and_password() {
    let server = MockServer::start().await;
    mount_me(&server).await;

    let client = UmamiClient::new(Config::new(server.uri(), "admin", "pw", "key-123")).unwrap();
    assert_ok!(client.get("/api/me", None).await);
    assert_eq!(login_count(&server).await, 0);
}

#[tokio::test]
async fn test_login_sends_credentials_and_uses_token() {
    let server = MockServer::start().await;
    let token = token_expiring_at(START / SECOND + 3600);
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "admin", "password": "s3cret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": token})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = password_client(&server, ManualClock::at(START));
    let value = assert_ok!(client.get("/api/me", None).await);
    assert_eq!(value, json!({"id": "u1"}));
}

#[tokio::test]
async fn test_token_reused_until_expiry_buffer() {
    let server = MockServer::start().await;
    mount_login(&server, &token_expiring_at(START / SECOND + 3600)).await;
    mount_me(&server).await;

    let clock = ManualClock::at(START);
    let client = password_client(&server, clock.clone());

    assert_ok!(client.get("/api/me", None).await);
    assert_eq!(login_count(&server).await, 1);

    clock.set(START + 3299 * SECOND);
    assert_ok!(client.get("/api/me", None).await);
    assert_eq!(login_count(&server).await, 1);

    clock.set(START + 3301 * SECOND);
    assert_ok!(client.get("/api/me", None).await);
    assert_eq!(login_count(&server).await, 2);
}

#[tokio::test]
async fn test_token_without_exp_claim_assumes_a_day() {
    let server = MockServer::start().await;
    mount_login(&server, "opaque-session-token").await;
    mount_me(&server).await;

    let clock = ManualClock::at(START);
    let client = password_client(&server, clock.clone());

    assert_ok!(client.get("/api/me", None).await);

    clock.set(START + 23 * HOUR);
    assert_ok!(client.get("/api/me", None).await);
    assert_eq!(login_count(&server).await, 1);

    clock.set(START + 25 * HOUR);
    assert_ok!(client.get("/api/me", None).await);
    assert_eq!(login_count(&server).await, 2);
}

#[tokio::test]
async fn test_clones_share_the_token_cache() {
    let server = MockServer::start().await;
    mount_login(&server, &token_expiring_at(START / SECOND + 3600)).await;
    mount_me(&server).await;

    let client = password_client(&server, ManualClock::at(START));
    let clone = client.clone();

    assert_ok!(client.get("/api/me", None).await);
    assert_ok!(clone.get("/api/me", None).await);
    assert_eq!(login_count(&server).await, 1);
}

#[tokio::test]
async fn test_concurrent_cache_misses_each_log_in() {
    let server = MockServer::start().await;
    mount_login(&server, &token_expiring_at(START / SECOND + 3600)).await;
    mount_me(&server).await;

    let client = password_client(&server, ManualClock::at(START));
    let (a, b) = tokio::join!(client.get("/api/me", None), client.get("/api/me", None));
    assert_ok!(a);
    assert_ok!(b);
    assert_eq!(login_count(&server).await, 2);

    assert_ok!(client.get("/api/me", None).await);
    assert_eq!(login_count(&server).await, 2);
}

#[tokio::test]
async fn test_rejected_login_is_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Incorrect username and/or password."))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = password_client(&server, ManualClock::at(START));

    let err = assert_err!(client.get("/api/me", None).await);
    match err {
        UmamiError::Authentication { status, ref body } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, "Incorrect username and/or password.");
        }
        other => panic!("expected authentication error, got {other:?}"),
    }

    // Nothing was cached, so the next call logs in again
    assert_err!(client.get("/api/me", None).await);
    assert_eq!(login_count(&server).await, 2);
}

#[tokio::test]
async fn test_failed_relogin_does_not_reuse_stale_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"token": token_expiring_at(START / SECOND + 3600)})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    mount_me(&server).await;

    let clock = ManualClock::at(START);
    let client = password_client(&server, clock.clone());
    assert_ok!(client.get("/api/me", None).await);

    clock.set(START + 3301 * SECOND);
    let err = assert_err!(client.get("/api/me", None).await);
    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));

    // The stale token is still inside the buffer and is not reused
    assert_err!(client.get("/api/me", None).await);
    assert_eq!(login_count(&server).await, 3);
}

// ============================================================================
// Dispatch
// ============================================================================

#[tokio::test]
async fn test_query_string_drops_absent_and_empty_values() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let query = QueryParams::new()
        .with("a", 1i64)
        .with("b", "")
        .with_opt::<String>("c", None)
        .with("d", false);
    assert_ok!(client.get("/api/x", Some(&query)).await);

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), Some("a=1&d=false"));
}

#[tokio::test]
async fn test_no_question_mark_when_all_params_filtered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let query = QueryParams::new().with("q", "");
    assert_ok!(client.get("/api/x", Some(&query)).await);

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/websites"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"domain": "example.com", "name": "Example"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "w-1", "domain": "example.com"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let value = assert_ok!(
        client
            .post(
                "/api/websites",
                &json!({"domain": "example.com", "name": "Example"})
            )
            .await
    );
    assert_eq!(value["id"], "w-1");
}

#[tokio::test]
async fn test_request_without_body_sends_no_content_type() {
    let server = MockServer::start().await;
    mount_login(&server, &token_expiring_at(START / SECOND + 3600)).await;
    mount_me(&server).await;

    let client = password_client(&server, ManualClock::at(START));
    assert_ok!(client.get("/api/me", None).await);

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 2);

    let login = &requests[0];
    assert_eq!(login.url.path(), "/api/auth/login");
    assert!(login.headers.get("authorization").is_none());

    let me = &requests[1];
    assert_eq!(me.url.path(), "/api/me");
    assert!(me.headers.get("content-type").is_none());
    assert!(me.body.is_empty());
    assert!(me.headers.get("authorization").is_some());
}

#[tokio::test]
async fn test_non_success_status_is_api_error_with_verbatim_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/websites/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let err = assert_err!(client.get("/api/websites/missing", None).await);
    match err {
        UmamiError::Api {
            method,
            path,
            status,
            body,
        } => {
            assert_eq!(method, Method::GET);
            assert_eq!(path, "/api/websites/missing");
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, "Not found");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_api_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/teams/t-1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let err = assert_err!(client.delete("/api/teams/t-1").await);
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn test_response_normalization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"pageviews": 42})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/empty"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/text"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let client = api_key_client(&server);

    assert_eq!(
        assert_ok!(client.get("/api/json", None).await),
        json!({"pageviews": 42})
    );
    assert_eq!(
        assert_ok!(client.post("/api/empty", &json!({})).await),
        json!({"success": true})
    );
    assert_eq!(
        assert_ok!(client.post("/api/text", &json!({})).await),
        json!("ok")
    );
}

#[tokio::test]
async fn test_connection_failure_is_http_error() {
    // Nothing listens on port 1
    let client = UmamiClient::new(Config::new("http://127.0.0.1:1", "", "", "key")).unwrap();
    let err = assert_err!(client.get("/api/me", None).await);
    assert!(matches!(err, UmamiError::Http(_)));
}

#[tokio::test]
async fn test_trailing_slash_base_url() {
    let server = MockServer::start().await;
    mount_me(&server).await;

    let config = Config::new(format!("{}///", server.uri()), "", "", "key");
    let client = UmamiClient::new(config).unwrap();
    assert_ok!(client.get("/api/me", None).await);

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests[0].url.path(), "/api/me");
}

#[tokio::test]
async fn test_error_display_scrubs_secrets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(403).set_body_string("bad key key-123"))
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let err = assert_err!(client.get("/api/me", None).await);
    let shown = err.sanitized_display(&["key-123", ""]);
    assert!(!shown.contains("key-123"));
    assert!(shown.contains("[REDACTED]"));
}
