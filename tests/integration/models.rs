//! Models endpoint integration tests
//!
//! Tests for GET /api/models.

use serde_json::Value;

use crate::common::TestHarness;

#[tokio::test]
async fn test_models_without_keys() {
    let harness = TestHarness::without_keys().await;

    let response = harness.server.get("/api/models").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["default_model"], "gpt-3.5-turbo");

    let models = body["models"].as_object().unwrap();
    assert_eq!(models.len(), 11);
    assert!(models.values().all(|m| m["configured"] == false));

    assert_eq!(
        body["models"]["gpt-4"],
        serde_json::json!({
            "name": "GPT-4 (OpenAI)",
            "provider": "openai",
            "configured": false,
            "api_key_env": "OPENAI_API_KEY"
        })
    );
    assert_eq!(body["models"]["gemini-pro"]["provider"], "google");
    assert_eq!(body["models"]["llama-2-70b"]["provider"], "replicate");
    assert_eq!(body["models"]["llama-2-70b"]["api_key_env"], "REPLICATE_API_KEY");
}

#[tokio::test]
async fn test_models_report_configuration_per_family() {
    let harness = TestHarness::with_keys(&[("GOOGLE_API_KEY", "g-key")]).await;

    let body: Value = harness.server.get("/api/models").await.json();

    assert_eq!(body["models"]["gemini-pro"]["configured"], true);
    assert_eq!(body["models"]["gemini-pro-vision"]["configured"], true);
    assert_eq!(body["models"]["gpt-4"]["configured"], false);
    assert_eq!(body["models"]["claude-3-opus"]["configured"], false);
}

#[tokio::test]
async fn test_models_keep_registration_order() {
    let harness = TestHarness::without_keys().await;

    let text = harness.server.get("/api/models").await.text();

    let gpt4 = text.find("\"gpt-4\"").unwrap();
    let claude = text.find("\"claude-3-sonnet\"").unwrap();
    let mistral = text.find("\"mistral-large\"").unwrap();
    assert!(gpt4 < claude && claude < mistral);
}
