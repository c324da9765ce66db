//! Health check and middleware tests against the full router.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_ok_with_readable_store() {
    let app = common::build_test_app().await;

    let response = get(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["store_healthy"], true);
    assert_eq!(json["read_policy"], "fail-open");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn health_reports_configured_read_policy() {
    let app = common::build_test_app_with_policy(folio_db::ReadPolicy::FailClosed).await;

    let json = body_json(get(&app, "/health").await).await;

    assert_eq!(json["read_policy"], "fail-closed");
}

#[tokio::test]
async fn health_reports_degraded_with_corrupt_store() {
    let app = common::build_test_app().await;
    std::fs::write(&app.data_file, "{broken").unwrap();

    let response = get(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store_healthy"], false);
}

// ---------------------------------------------------------------------------
// Request ID
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_carries_generated_request_id() {
    let app = common::build_test_app().await;

    let response = get(&app, "/health").await;

    let id = response.headers().get("x-request-id").unwrap();
    assert!(!id.to_str().unwrap().is_empty());
}

#[tokio::test]
async fn incoming_request_id_is_propagated() {
    let app = common::build_test_app().await;

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-me-123")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.headers().get("x-request-id").unwrap(), "trace-me-123");
}

// ---------------------------------------------------------------------------
// CORS
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let app = common::build_test_app().await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/projects")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn cors_ignores_unknown_origin() {
    let app = common::build_test_app().await;

    let request = Request::builder()
        .uri("/api/projects")
        .header("origin", "http://evil.test")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

// ---------------------------------------------------------------------------
// Body limit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn oversized_body_returns_413() {
    let app = common::build_test_app().await;
    let description = "x".repeat(2 * 1024 * 1024);

    let response = common::post_json(
        &app,
        "/api/projects",
        serde_json::json!({ "description": description }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["code"], "PAYLOAD_TOO_LARGE");
    assert_eq!(app.stored_count(), 0);
}

// ---------------------------------------------------------------------------
// Unknown routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app().await;

    let response = get(&app, "/api/nothing-here").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(&app, "/uploads/missing.png").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
