//! Mock service tests for the unioncloud client.
//!
//! These tests use wiremock to simulate a UnionCloud host and exercise the
//! full pipeline over loopback HTTP with the reqwest transport.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration};
use serde_json::json;
use unioncloud::auth::request_hash;
use unioncloud::{
    ApiHost, Attachment, Clock, ClientOptions, Credentials, Error, ManualClock, Method,
    ReqwestTransport, RequestSpec, TransportError, UnionCloud,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const T0: i64 = 1_700_000_000;

/// Helper to create an API host from a mock server.
fn mock_host(server: &MockServer) -> ApiHost {
    // For tests, we need to allow HTTP localhost
    ApiHost::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn client_at(server: &MockServer, clock: &ManualClock) -> UnionCloud {
    UnionCloud::builder(mock_host(server))
        .clock(Arc::new(clock.clone()))
        .build()
        .unwrap()
}

fn authed_client(server: &MockServer) -> UnionCloud {
    let clock = ManualClock::at_timestamp(T0);
    let mut client = client_at(server, &clock);
    client.set_auth_token("abc", clock.now() + Duration::seconds(3600));
    client
}

fn credentials() -> Credentials {
    Credentials::new("admin@union.test", "secret", "app-1", "app-secret")
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_authenticate_success() {
    let server = MockServer::start().await;
    let stamp = T0.to_string();

    Mock::given(method("POST"))
        .and(path("/api/authenticate"))
        .and(header("content-type", "application/json"))
        .and(header("accept-version", "v1"))
        .and(body_json(json!({
            "email": "admin@union.test",
            "password": "secret",
            "app_id": "app-1",
            "date_stamp": stamp,
            "hash": request_hash("admin@union.test", "secret", "app-1", &stamp, "app-secret"),
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "SUCCESS",
            "response": {"auth_token": "abc", "expires": 3600}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let clock = ManualClock::at_timestamp(T0);
    let mut client = client_at(&server, &clock);
    let expires_at = client.authenticate(&credentials()).await.unwrap();

    assert_eq!(expires_at, DateTime::from_timestamp(T0 + 3600, 0));
    assert!(client.is_authenticated());
    assert_eq!(client.get_auth_token().unwrap().token, "abc");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("auth-token").is_none());
    let agent = requests[0].headers.get("user-agent").unwrap().to_str().unwrap();
    assert!(agent.starts_with("UnionCloud API Wrapper (Rust) v"));
}

#[tokio::test]
async fn test_authenticate_failure_result_returns_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/authenticate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "FAILURE"
        })))
        .mount(&server)
        .await;

    let clock = ManualClock::at_timestamp(T0);
    let mut client = client_at(&server, &clock);
    assert!(client.authenticate(&credentials()).await.unwrap().is_none());
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_authenticate_error_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/authenticate"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": {"error_message": "Invalid credentials", "error_code": 401}
        })))
        .mount(&server)
        .await;

    let clock = ManualClock::at_timestamp(T0);
    let mut client = client_at(&server, &clock);
    let err = client.authenticate(&credentials()).await.unwrap_err();

    let service = err.as_service().unwrap();
    assert_eq!(service.message, "Invalid credentials");
    assert!(service.is_auth_error());
    assert_eq!(service.status, 401);
}

#[tokio::test]
async fn test_expired_token_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let clock = ManualClock::at_timestamp(T0);
    let mut client = client_at(&server, &clock);
    client.set_auth_token("abc", clock.now() + Duration::seconds(5));
    clock.advance(Duration::seconds(5));

    let err = client.users(None, None).await.unwrap_err();
    assert!(matches!(err, Error::AuthExpired));
    assert_eq!(err.code(), Some(401));
}

// ============================================================================
// Request Shape Tests
// ============================================================================

#[tokio::test]
async fn test_authenticated_listing_sends_token_and_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(header("auth-token", "abc"))
        .and(query_param("mode", "standard"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("total_pages", "5")
                .insert_header("records_per_page", "20")
                .insert_header("total_records", "97")
                .set_body_json(json!({"response": [{"uid": 1}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let resp = client.users(None, Some(2)).await.unwrap();

    assert_eq!(resp.data["response"][0]["uid"], 1);
    let pagination = resp.pagination.unwrap();
    assert_eq!(pagination.pages.current, 2);
    assert_eq!(pagination.pages.total, 5);
    assert_eq!(pagination.records.per_page, 20);
    assert_eq!(pagination.records.total, 97);
}

#[tokio::test]
async fn test_group_join_wraps_body_in_data() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/groups/5/join"))
        .and(body_json(json!({"data": {"uid": 42, "membership_type_id": 3}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    client.group_join(5, 42, 3).await.unwrap();
}

#[tokio::test]
async fn test_user_group_create_sends_null_folder() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user_groups"))
        .and(body_json(json!({"data": {
            "ug_name": "Volunteers",
            "ug_description": "Helpers",
            "folder_id": null,
        }})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": {"ug_id": 9}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let resp = client.user_group_create("Volunteers", "Helpers", None).await.unwrap();
    assert_eq!(resp.data["response"]["ug_id"], 9);
}

#[tokio::test]
async fn test_event_cancel_sends_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/events/77/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "cancelled"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    client.event_cancel(77).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_attachments_are_sent_as_multipart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/json/upload/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "queued"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let spec = RequestSpec::new(Method::Post, "/json/upload/students")
        .with_body(json!({"data": {"batch": 1}}))
        .with_attachment(
            Attachment::new("file", "students.csv", b"uid,name\n1,Ada\n".to_vec())
                .with_content_type("text/csv"),
        );
    client.call(spec).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    assert_eq!(requests[0].headers.get_all("content-type").iter().count(), 1);
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("students.csv"));
    assert!(body.contains(r#"{"data":{"batch":1}}"#));
}

// ============================================================================
// Response Normalization Tests
// ============================================================================

#[tokio::test]
async fn test_error_envelope_with_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {"message": "Not found", "code": 404}
        })))
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let err = client.user_get(9, None).await.unwrap_err();

    let service = err.as_service().unwrap();
    assert_eq!(service.message, "Not found");
    assert_eq!(service.code, 404);
    assert_eq!(service.status, 200);
}

#[tokio::test]
async fn test_rate_limit_headers_on_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("X-RateLimit-Remaining", "0")
                .insert_header("X-RateLimit-Limit", "300")
                .insert_header("X-RateLimit-Reset", "60")
                .set_body_json(json!({
                    "errors": {"error_message": "Too many requests", "error_code": "429"}
                })),
        )
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let err = client.events(None).await.unwrap_err();

    let service = err.as_service().unwrap();
    assert_eq!(service.code, 429);
    let rate_limit = service.rate_limit.unwrap();
    assert_eq!(rate_limit.remaining, 0);
    assert_eq!(rate_limit.limit, 300);
    assert_eq!(rate_limit.reset, 60);
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/event_types"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let err = client.event_types().await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn test_debug_trace_merged_into_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/groups"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Request-Id", "req-42")
                .insert_header("X-Runtime", "0.05")
                .set_body_json(json!({"response": []})),
        )
        .mount(&server)
        .await;

    let mut client = authed_client(&server);
    client.set_options(ClientOptions::debug());
    let resp = client.groups(None, None).await.unwrap();

    let trace = &resp.data["request"];
    assert_eq!(trace["id"], "req-42");
    assert_eq!(trace["token"], "abc");
    assert_eq!(trace["token_expires"], T0 + 3600);
    assert_eq!(trace["parameters"], json!({"mode": "full", "page": "1"}));
    assert_eq!(trace["status"], "200 OK");
    assert_eq!(resp.data["response"], json!([]));
}

// ============================================================================
// Large Payload Tests
// ============================================================================

#[tokio::test]
async fn test_file_path_reference_is_read_from_disk() {
    let server = MockServer::start().await;

    let mut side_file = tempfile::NamedTempFile::new().unwrap();
    write!(side_file, r#"{{"a":1}}"#).unwrap();
    let location = side_file.path().to_str().unwrap().to_string();

    Mock::given(method("GET"))
        .and(path("/api/elections/7/election_voters"))
        .and(query_param("page", "1"))
        .and(query_param("voter_type", "actual"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"file_path": location})))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let resp = client.election_voters(7, None, None).await.unwrap();
    assert_eq!(resp.data, json!({"a": 1}));
}

#[tokio::test]
async fn test_file_path_url_is_fetched_without_token() {
    let server = MockServer::start().await;
    let side_url = format!("{}/exports/voters.json", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/elections/7/election_voters_demographics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"file_path": side_url})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/exports/voters.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"voters": [1, 2]})))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let resp = client
        .election_voters_demographics(7, None, None, None)
        .await
        .unwrap();
    assert_eq!(resp.data, json!({"voters": [1, 2]}));

    let requests = server.received_requests().await.unwrap();
    let side = requests
        .iter()
        .find(|r| r.url.path() == "/exports/voters.json")
        .unwrap();
    assert!(side.headers.get("auth-token").is_none());
}

#[tokio::test]
async fn test_missing_side_file_is_side_channel_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/elections/7/election_voters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "file_path": "/nonexistent/unioncloud/voters.json"
        })))
        .mount(&server)
        .await;

    let client = authed_client(&server);
    let err = client.election_voters(7, None, None).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Transport(TransportError::SideChannel { .. })
    ));
}

// ============================================================================
// Transport Tests
// ============================================================================

#[tokio::test]
async fn test_unreachable_host_is_connection_error() {
    // Reserve a port, then free it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let host = ApiHost::new(format!("http://127.0.0.1:{}", port)).unwrap();

    let clock = ManualClock::at_timestamp(T0);
    let mut client = UnionCloud::builder(host)
        .clock(Arc::new(clock.clone()))
        .build()
        .unwrap();
    client.set_auth_token("abc", clock.now() + Duration::seconds(60));

    let err = client.event_types().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Transport(TransportError::Connection { .. })
    ));
}

fn client_with_transport(server: &MockServer, transport: ReqwestTransport) -> UnionCloud {
    let clock = ManualClock::at_timestamp(T0);
    let mut client = UnionCloud::builder(mock_host(server))
        .transport(Arc::new(transport))
        .clock(Arc::new(clock.clone()))
        .build()
        .unwrap();
    client.set_auth_token("abc", clock.now() + Duration::seconds(60));
    client
}

#[tokio::test]
async fn test_slow_response_outlives_connect_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/event_types"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": []}))
                .set_delay(StdDuration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let transport = ReqwestTransport::builder()
        .connect_timeout(StdDuration::from_millis(100))
        .build()
        .unwrap();
    let client = client_with_transport(&server, transport);

    let response = client.event_types().await.unwrap();
    assert_eq!(response.data["response"], json!([]));
}

#[tokio::test]
async fn test_request_timeout_is_opt_in() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/event_types"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": []}))
                .set_delay(StdDuration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let transport = ReqwestTransport::builder()
        .request_timeout(Some(StdDuration::from_millis(100)))
        .build()
        .unwrap();
    let client = client_with_transport(&server, transport);

    let err = client.event_types().await.unwrap_err();
    assert!(matches!(err, Error::Transport(TransportError::Timeout { .. })));
}
