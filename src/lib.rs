//! Switchboard - chat gateway across multiple AI providers
//!
//! This library provides the core of the Switchboard server: a static model
//! registry, per-provider wire adapters, an in-memory conversation store, a
//! mock responder for unconfigured models, and the HTTP routes exposing them.

pub mod chat;
pub mod config;
pub mod conversation;
pub mod credentials;
pub mod docs;
pub mod error;
pub mod mock;
pub mod providers;
pub mod registry;
pub mod routes;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;

pub use crate::chat::{ChatRequest, ChatResult, ChatService};
pub use crate::config::Config;
pub use crate::conversation::{ConversationStore, ConversationTurn};
pub use crate::credentials::CredentialSet;
pub use crate::mock::MockResponder;
pub use crate::providers::{AiProvider, ProviderClient};
pub use crate::registry::{ModelRegistry, Provider};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    pub registry: Arc<ModelRegistry>,
    pub credentials: Arc<CredentialSet>,
    pub conversations: Arc<ConversationStore>,
    pub chat: ChatService,
}

impl AppState {
    /// Create a new application state
    ///
    /// Credentials are read from the process environment.
    pub fn new(config: Config) -> Result<Self> {
        let registry = Arc::new(ModelRegistry::builtin_with_overrides(
            &config.api_base_overrides,
        )?);
        let credentials = Arc::new(CredentialSet::from_env(&registry));

        // Initialize HTTP client with connection pooling
        let timeout = Duration::from_secs(config.upstream_timeout_seconds);
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .timeout(timeout)
            .build()?;
        let provider: Arc<dyn AiProvider> = Arc::new(ProviderClient::new(http_client, timeout));

        Ok(Self::from_parts(
            config,
            registry,
            credentials,
            provider,
            MockResponder::random(),
        ))
    }

    fn from_parts(
        config: Config,
        registry: Arc<ModelRegistry>,
        credentials: Arc<CredentialSet>,
        provider: Arc<dyn AiProvider>,
        mock: MockResponder,
    ) -> Self {
        let conversations = Arc::new(ConversationStore::new());
        let chat = ChatService::new(
            registry.clone(),
            credentials.clone(),
            conversations.clone(),
            provider,
            mock,
        );

        Self {
            config,
            start_time: Instant::now(),
            registry,
            credentials,
            conversations,
            chat,
        }
    }

    /// Create an application state for testing with injected collaborators
    ///
    /// This constructor uses:
    /// - Credentials from the supplied map instead of the process environment
    /// - Any provider implementation (typically a `ProviderClient` aimed at wiremock)
    /// - A mock responder with a deterministic template picker
    #[cfg(any(test, feature = "test-utils"))]
    pub fn new_for_testing(
        config: Config,
        env: std::collections::HashMap<String, String>,
        provider: Arc<dyn AiProvider>,
        mock: MockResponder,
    ) -> Result<Self> {
        let registry = Arc::new(ModelRegistry::builtin_with_overrides(
            &config.api_base_overrides,
        )?);
        let credentials = Arc::new(CredentialSet::load_all(&registry, |name| {
            env.get(name).cloned()
        }));

        Ok(Self::from_parts(config, registry, credentials, provider, mock))
    }
}
