//! Health endpoint integration tests
//!
//! Tests for GET /api/health and the operational endpoints beside it.

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::TestHarness;

#[tokio::test]
async fn test_health_without_keys() {
    let harness = TestHarness::without_keys().await;

    let response = harness.server.get("/api/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["total_models"], 11);
    assert_eq!(body["configured_count"], 0);
    assert_eq!(body["configured_models"], serde_json::json!([]));
    assert_eq!(body["available_models"][0], "gpt-4");
    assert_eq!(body["available_models"][10], "mistral-large");
    assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_health_lists_configured_models_in_registration_order() {
    let harness = TestHarness::with_keys(&[
        ("MISTRAL_API_KEY", "m-key"),
        ("ANTHROPIC_API_KEY", "a-key"),
    ])
    .await;

    let body: Value = harness.server.get("/api/health").await.json();

    assert_eq!(body["configured_count"], 5);
    assert_eq!(
        body["configured_models"],
        serde_json::json!([
            "claude-3-sonnet",
            "claude-3-haiku",
            "claude-3-opus",
            "mistral-7b",
            "mistral-large"
        ])
    );
}

#[tokio::test]
async fn test_blank_key_counts_as_unconfigured() {
    let harness = TestHarness::with_keys(&[("OPENAI_API_KEY", "   ")]).await;

    let body: Value = harness.server.get("/api/health").await.json();

    assert_eq!(body["configured_count"], 0);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let harness = TestHarness::without_keys().await;

    let response = harness.server.get("/api/openapi.json").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["paths"]["/api/chat"]["post"].is_object());
    assert!(body["paths"]["/api/conversations/{conversation_id}"]["delete"].is_object());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let harness = TestHarness::without_keys().await;

    let response = harness.server.get("/api/does-not-exist").await;

    response.assert_status(StatusCode::NOT_FOUND);
}
