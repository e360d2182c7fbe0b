//! Router-level tests for the lookup API.
//!
//! The router is driven in-process; the lookup site is replaced by saved
//! pages or a local mock server.

use std::sync::Arc;

use assert_json_diff::assert_json_eq;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use rc_lookup::{FetchConfig, StaticPage, UnreachablePage};
use rc_lookup_server::{router, AppState, CREDIT};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const FOUND: &str = include_str!("fixtures/rc_found.html");
const NOT_FOUND: &str = include_str!("fixtures/rc_not_found.html");
const EMPTY: &str = include_str!("fixtures/rc_empty.html");

const ONE_FIELD: &str = r#"<html><body>
    <div class="card"><span>Owner Name</span><p>RAHUL SHARMA</p></div>
    <div class="card"><span>Chassis No</span><p>MA3XXXXX</p></div>
</body></html>"#;

// ─────────────────────── helpers ───────────────────────

fn app_with_page(html: &str) -> Router {
    router(Arc::new(AppState::new(StaticPage::new(html))))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(content_type: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, content_type)
        .body(body.into())
        .unwrap()
}

fn post_json(body: Value) -> Request<Body> {
    post("application/json", body.to_string())
}

/// Send one request and return status plus raw body bytes.
async fn send_raw(app: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, req).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn invalid_input() -> Value {
    json!({
        "credit": CREDIT,
        "status": "error",
        "message": "Invalid or missing rc_number"
    })
}

// ═══════════════════════════════════════════════════════
// INPUT VALIDATION
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_missing_rc_number_get() {
    let (status, body) = send(app_with_page(FOUND), get("/")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_eq!(body, invalid_input());
}

#[tokio::test]
async fn test_short_rc_number_every_method() {
    let requests = [
        get("/?rc_number=%20ab%20"),
        post_json(json!({ "rc_number": " ab " })),
        post("application/x-www-form-urlencoded", "rc_number=ab"),
        post_json(json!({})),
        post("text/plain", "rc_number=dl01ab1234"),
    ];
    for req in requests {
        let (status, body) = send(app_with_page(FOUND), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_json_eq!(body, invalid_input());
    }
}

#[tokio::test]
async fn test_non_string_rc_number_is_missing() {
    let (status, body) = send(
        app_with_page(FOUND),
        post_json(json!({ "rc_number": 1234567 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_eq!(body, invalid_input());
}

// ═══════════════════════════════════════════════════════
// LOOKUP OUTCOMES
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_single_pair_success() {
    let (status, body) = send(app_with_page(ONE_FIELD), get("/?rc_number=dl01ab1234")).await;
    assert_eq!(status, StatusCode::OK);
    assert_json_eq!(
        body,
        json!({
            "credit": CREDIT,
            "status": "success",
            "rc_number": "DL01AB1234",
            "details": { "Owner Name": "RAHUL SHARMA" }
        })
    );
}

#[tokio::test]
async fn test_full_page_success_via_form_post() {
    let (status, body) = send(
        app_with_page(FOUND),
        post("application/x-www-form-urlencoded", "rc_number=+dl01ab1234+"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rc_number"], "DL01AB1234");
    assert_eq!(body["details"]["Fuel Type"], "PETROL");
    assert_eq!(body["details"].as_object().unwrap().len(), 19);
    assert!(body["details"].get("Phone").is_none());
}

#[tokio::test]
async fn test_multipart_form_post() {
    let body = "--XX\r\n\
                Content-Disposition: form-data; name=\"rc_number\"\r\n\r\n\
                dl01ab1234\r\n\
                --XX--\r\n";
    let (status, body) = send(
        app_with_page(ONE_FIELD),
        post("multipart/form-data; boundary=XX", body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_json_eq!(
        body,
        json!({
            "credit": CREDIT,
            "status": "success",
            "rc_number": "DL01AB1234",
            "details": { "Owner Name": "RAHUL SHARMA" }
        })
    );
}

#[tokio::test]
async fn test_multipart_without_rc_number() {
    let body = "--XX\r\n\
                Content-Disposition: form-data; name=\"rc\"\r\n\r\n\
                dl01ab1234\r\n\
                --XX--\r\n";
    let (status, body) = send(
        app_with_page(ONE_FIELD),
        post("multipart/form-data; boundary=XX", body),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_eq!(body, invalid_input());
}

#[tokio::test]
async fn test_network_failure() {
    let app = router(Arc::new(AppState::new(UnreachablePage::new(
        "error sending request: connection refused",
    ))));
    let (status, body) = send(app, get("/?rc_number=DL01AB1234")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_json_eq!(
        body,
        json!({
            "credit": CREDIT,
            "status": "error",
            "message": "Network error: error sending request: connection refused"
        })
    );
}

#[tokio::test]
async fn test_site_reported_not_found_is_500() {
    let (status, body) = send(app_with_page(NOT_FOUND), get("/?rc_number=XX00XX0000")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_json_eq!(
        body,
        json!({
            "credit": CREDIT,
            "status": "error",
            "message": "Vehicle not found or invalid RC number"
        })
    );
}

#[tokio::test]
async fn test_no_fields_is_404() {
    let (status, body) = send(
        app_with_page(EMPTY),
        post_json(json!({ "rc_number": "dl01zz0000" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_json_eq!(
        body,
        json!({
            "credit": CREDIT,
            "status": "not_found",
            "message": "No details found for dl01zz0000"
        })
    );
}

#[tokio::test]
async fn test_case_variants_share_rc_number() {
    let (_, lower) = send(app_with_page(ONE_FIELD), get("/?rc_number=dl01ab1234")).await;
    let (_, upper) = send(
        app_with_page(ONE_FIELD),
        post_json(json!({ "rc_number": "DL01AB1234" })),
    )
    .await;
    assert_eq!(lower["rc_number"], "DL01AB1234");
    assert_eq!(lower, upper);
}

#[tokio::test]
async fn test_repeated_request_is_byte_identical() {
    let app = app_with_page(FOUND);
    let (_, first) = send_raw(app.clone(), get("/?rc_number=DL01AB1234")).await;
    let (_, second) = send_raw(app, get("/?rc_number=DL01AB1234")).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_end_to_end_upstream_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let state = AppState::http(FetchConfig {
        base_url: server.uri(),
        ..FetchConfig::default()
    })
    .unwrap();
    let (status, body) = send(router(Arc::new(state)), get("/?rc_number=DL01AB1234")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Network error: "), "{message}");
    assert!(message.contains("404"), "{message}");
}

// ═══════════════════════════════════════════════════════
// SURFACE
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app_with_page(EMPTY), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_json_eq!(
        body,
        json!({
            "status": "healthy",
            "service": "Vehicle RC Details API",
            "version": "1.0"
        })
    );
}

#[tokio::test]
async fn test_unsupported_method() {
    let req = Request::builder()
        .method(Method::PUT)
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send_raw(app_with_page(FOUND), req).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
