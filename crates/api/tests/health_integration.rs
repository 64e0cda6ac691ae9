//! Integration tests for health endpoints and response headers.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{body_json, create_test_app, create_test_app_with, get};
use apks_hub_api::config::Config;
use apks_hub_api::services::StaticConfigFetcher;
use tower::ServiceExt;

// ============================================================================
// Health Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let (app, fetcher) = create_test_app(StaticConfigFetcher::new());

    let response = get(&app, "/api/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["default_site"]["package"], "com.tencent.ig");
    assert_eq!(body["default_site"]["name"], "PUBG Mobile");
    assert_eq!(body["default_site"]["articles"], 1);
    assert_eq!(body["remote"]["timeout_ms"], 500);
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn test_liveness_and_readiness() {
    let (app, _) = create_test_app(StaticConfigFetcher::new());

    let live = body_json(get(&app, "/api/health/live").await).await;
    let ready = body_json(get(&app, "/api/health/ready").await).await;

    assert_eq!(live["status"], "alive");
    assert_eq!(ready["status"], "ready");
}

// ============================================================================
// Header Tests
// ============================================================================

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let (app, _) = create_test_app(StaticConfigFetcher::new());

    for path in ["/api/health/live", "/no/such/page/here", "/"] {
        let response = get(&app, path).await;
        let headers = response.headers();
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff", "{path}");
        assert_eq!(headers[header::X_FRAME_OPTIONS], "SAMEORIGIN", "{path}");
        assert!(headers.get(header::STRICT_TRANSPORT_SECURITY).is_none(), "{path}");
    }
}

#[tokio::test]
async fn test_hsts_when_enabled() {
    let config = Config::load_for_test(&[("security.hsts_enabled", "true")]).unwrap();
    let (app, _) = create_test_app_with(config, StaticConfigFetcher::new());

    let response = get(&app, "/api/health/live").await;

    assert!(response
        .headers()
        .get(header::STRICT_TRANSPORT_SECURITY)
        .is_some());
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let (app, _) = create_test_app(StaticConfigFetcher::new());

    let response = get(&app, "/api/health/live").await;

    let id = response.headers()["x-request-id"].to_str().unwrap();
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn test_inbound_request_id_is_echoed() {
    let (app, _) = create_test_app(StaticConfigFetcher::new());

    let request = Request::builder()
        .uri("/api/health/live")
        .header("x-request-id", "cdn-7f3a")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "cdn-7f3a");
}
