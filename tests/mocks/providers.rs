//! Mock AI provider APIs for testing
//!
//! Provides wiremock-based mocks for the upstream endpoints:
//! - POST /chat/completions - OpenAI and Mistral
//! - POST /v1/messages - Anthropic
//! - POST /v1beta/models/{model}:generateContent - Google
//! - POST /predictions - Replicate

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::{
    matchers::{body_partial_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
pub const ANTHROPIC_MESSAGES_PATH: &str = "/v1/messages";
pub const REPLICATE_PREDICTIONS_PATH: &str = "/predictions";

/// Google generateContent path for a model
pub fn google_path(model: &str) -> String {
    format!("/v1beta/models/{model}:generateContent")
}

/// Mock provider server wrapper
pub struct MockProviders {
    server: MockServer,
}

impl MockProviders {
    /// Start a new mock provider server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the mock server URI
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    // =========================================================================
    // OpenAI / Mistral
    // =========================================================================

    /// Mock a chat completion reply for `model`, checking the bearer key
    pub async fn mock_chat_completion(&self, model: &str, api_key: &str, content: &str) {
        Mock::given(method("POST"))
            .and(path(CHAT_COMPLETIONS_PATH))
            .and(header("Authorization", format!("Bearer {api_key}").as_str()))
            .and(body_partial_json(json!({ "model": model })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-test123",
                "object": "chat.completion",
                "model": model,
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": content },
                    "finish_reason": "stop"
                }]
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a raw status and body from the chat completions endpoint
    pub async fn mock_chat_completion_status(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(CHAT_COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Mock a chat completion reply that arrives after `delay`
    pub async fn mock_chat_completion_delayed(&self, content: &str, delay: Duration) {
        Mock::given(method("POST"))
            .and(path(CHAT_COMPLETIONS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "choices": [{ "message": { "role": "assistant", "content": content } }]
                    }))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    // =========================================================================
    // Anthropic
    // =========================================================================

    /// Mock a messages reply, checking the key and version headers
    pub async fn mock_anthropic_message(&self, api_key: &str, content: &str) {
        Mock::given(method("POST"))
            .and(path(ANTHROPIC_MESSAGES_PATH))
            .and(header("x-api-key", api_key))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_test123",
                "type": "message",
                "role": "assistant",
                "content": [{ "type": "text", "text": content }],
                "stop_reason": "end_turn"
            })))
            .mount(&self.server)
            .await;
    }

    // =========================================================================
    // Google
    // =========================================================================

    /// Mock a generateContent reply, checking the key query parameter
    pub async fn mock_google_generate(&self, model: &str, api_key: &str, content: &str) {
        Mock::given(method("POST"))
            .and(path(google_path(model)))
            .and(query_param("key", api_key))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": content }] },
                    "finishReason": "STOP"
                }]
            })))
            .mount(&self.server)
            .await;
    }

    // =========================================================================
    // Replicate
    // =========================================================================

    /// Mock a prediction reply, checking the token header
    pub async fn mock_replicate_prediction(&self, api_key: &str, content: &str) {
        Mock::given(method("POST"))
            .and(path(REPLICATE_PREDICTIONS_PATH))
            .and(header("Authorization", format!("Token {api_key}").as_str()))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "pred_test123",
                "status": "succeeded",
                "output": [content]
            })))
            .mount(&self.server)
            .await;
    }

    // =========================================================================
    // Request capture
    // =========================================================================

    /// JSON bodies of every request received on `request_path`, in arrival order
    pub async fn received_bodies(&self, request_path: &str) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == request_path)
            .map(|request| serde_json::from_slice(&request.body).expect("request body is JSON"))
            .collect()
    }

    /// Number of requests received on any path
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}
