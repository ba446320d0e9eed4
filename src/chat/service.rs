//! Chat service
//!
//! Per request: resolve the model, pick the mock or provider path, and on
//! success record the exchange in the conversation store. Provider failures
//! become unsuccessful results and leave history untouched.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::{ChatRequest, ChatResult};
use crate::conversation::{ConversationStore, ConversationTurn, CONTEXT_WINDOW_TURNS};
use crate::credentials::CredentialSet;
use crate::error::AppResult;
use crate::mock::MockResponder;
use crate::providers::{AiProvider, ProviderCall};
use crate::registry::{ModelDescriptor, ModelRegistry};

/// Orchestrates chat requests across providers
pub struct ChatService {
    registry: Arc<ModelRegistry>,
    credentials: Arc<CredentialSet>,
    conversations: Arc<ConversationStore>,
    provider: Arc<dyn AiProvider>,
    mock: MockResponder,
}

impl ChatService {
    pub fn new(
        registry: Arc<ModelRegistry>,
        credentials: Arc<CredentialSet>,
        conversations: Arc<ConversationStore>,
        provider: Arc<dyn AiProvider>,
        mock: MockResponder,
    ) -> Self {
        Self {
            registry,
            credentials,
            conversations,
            provider,
            mock,
        }
    }

    /// Resolve the requested model, falling back to the default
    pub fn resolve_model(&self, requested: Option<&str>) -> &ModelDescriptor {
        if let Some(id) = requested {
            if self.registry.describe(id).is_none() {
                warn!(
                    requested = %id,
                    default = %self.registry.default_model(),
                    "Model not found, using default"
                );
            }
        }
        self.registry.resolve(requested)
    }

    /// Whether `model_id` would be answered by the mock responder
    pub fn is_mock(&self, model_id: &str) -> bool {
        !self.credentials.is_configured(model_id)
    }

    /// Handle one chat request
    ///
    /// Only validation failures are returned as errors; provider failures are
    /// reported through an unsuccessful [`ChatResult`].
    pub async fn chat(&self, request: &ChatRequest) -> AppResult<ChatResult> {
        let message = request.validated_message()?;
        let descriptor = self.resolve_model(request.model.as_deref());
        let conversation_id = request.conversation();

        // Held until the exchange is recorded so turns follow completion order
        let _sequence = match conversation_id {
            Some(id) => Some(self.conversations.acquire(id).await),
            None => None,
        };

        info!(
            model = %descriptor.id,
            provider = %descriptor.provider,
            conversation_id = ?conversation_id,
            "Processing chat message"
        );

        let reply = match self.credentials.get(&descriptor.id) {
            None => {
                info!(model = %descriptor.id, "No API key configured, using mock responder");
                Ok(self.mock.respond(message, &descriptor.display_name))
            }
            Some(credential) => {
                let history = conversation_id
                    .map(|id| self.conversations.window(id, CONTEXT_WINDOW_TURNS))
                    .unwrap_or_default();
                self.provider
                    .complete(ProviderCall::new(descriptor, credential, message, &history))
                    .await
            }
        };

        match reply {
            Ok(text) => {
                if let Some(id) = conversation_id {
                    self.conversations.append_exchange(
                        id,
                        ConversationTurn::user(message),
                        ConversationTurn::assistant(text.clone()),
                    );
                }
                Ok(ChatResult::success(descriptor, text))
            }
            Err(e) => {
                error!(
                    model = %descriptor.id,
                    provider = self.provider.name(),
                    upstream_status = ?e.status(),
                    error = %e,
                    "Error generating response"
                );
                Ok(ChatResult::failure(descriptor, e.to_string()))
            }
        }
    }
}
