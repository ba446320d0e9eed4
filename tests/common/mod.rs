//! Common test utilities for Switchboard
//!
//! Builds the real router against a wiremock provider server, with API keys
//! supplied explicitly instead of read from the process environment.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use serde_json::Value;
use switchboard::{
    mock::{FixedPicker, MockResponder},
    routes, AiProvider, AppState, Config, Provider, ProviderClient,
};

use crate::mocks::MockProviders;

/// Test configuration constants
pub mod constants {
    pub const TEST_OPENAI_API_KEY: &str = "sk-test-openai";
    pub const TEST_ANTHROPIC_API_KEY: &str = "sk-ant-test";
    pub const TEST_GOOGLE_API_KEY: &str = "google-test-key";
    pub const TEST_REPLICATE_API_KEY: &str = "r8_test";
    pub const TEST_MISTRAL_API_KEY: &str = "mistral-test-key";

    /// Template index the harness pins the mock responder to
    pub const MOCK_TEMPLATE: usize = 0;
    /// Upstream timeout used by the harness
    pub const UPSTREAM_TIMEOUT_SECS: u64 = 2;
}

/// Every provider key, for tests that want all models configured
pub fn all_keys() -> Vec<(&'static str, &'static str)> {
    vec![
        ("OPENAI_API_KEY", constants::TEST_OPENAI_API_KEY),
        ("ANTHROPIC_API_KEY", constants::TEST_ANTHROPIC_API_KEY),
        ("GOOGLE_API_KEY", constants::TEST_GOOGLE_API_KEY),
        ("REPLICATE_API_KEY", constants::TEST_REPLICATE_API_KEY),
        ("MISTRAL_API_KEY", constants::TEST_MISTRAL_API_KEY),
    ]
}

/// Test harness wiring the app to a mock provider server
///
/// # Example
///
/// ```ignore
/// let harness = TestHarness::with_keys(&[("OPENAI_API_KEY", "sk-test")]).await;
/// harness.providers.mock_chat_completion("gpt-4", "sk-test", "Hi").await;
///
/// let body = harness.chat(json!({ "message": "Hello", "model": "gpt-4" })).await;
/// assert_eq!(body["response"], "Hi");
/// ```
pub struct TestHarness {
    pub server: TestServer,
    pub providers: MockProviders,
}

impl TestHarness {
    /// Harness with no API keys: every model answers in mock mode
    pub async fn without_keys() -> Self {
        Self::with_keys(&[]).await
    }

    /// Harness with the given credential variables set
    pub async fn with_keys(keys: &[(&str, &str)]) -> Self {
        let providers = MockProviders::start().await;

        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            upstream_timeout_seconds: constants::UPSTREAM_TIMEOUT_SECS,
            api_base_overrides: Provider::ALL
                .iter()
                .map(|&provider| (provider, providers.uri()))
                .collect(),
            debug_enabled: false,
        };

        let env: HashMap<String, String> = keys
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        let timeout = Duration::from_secs(constants::UPSTREAM_TIMEOUT_SECS);
        let provider: Arc<dyn AiProvider> =
            Arc::new(ProviderClient::new(reqwest::Client::new(), timeout));
        let mock = MockResponder::new(Box::new(FixedPicker(constants::MOCK_TEMPLATE)));

        let state = Arc::new(
            AppState::new_for_testing(config, env, provider, mock)
                .expect("Failed to build test state"),
        );
        let app = routes::create_router(state);
        let server = TestServer::new(app).expect("Failed to create test server");

        Self { server, providers }
    }

    /// POST /api/chat and return the JSON body (any status)
    pub async fn chat(&self, body: Value) -> Value {
        self.server.post("/api/chat").json(&body).await.json::<Value>()
    }

    /// GET a conversation's history
    pub async fn conversation(&self, conversation_id: &str) -> Value {
        self.server
            .get(&format!("/api/conversations/{conversation_id}"))
            .await
            .json::<Value>()
    }
}
