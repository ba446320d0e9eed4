//! Chat orchestration
//!
//! Request/result contract of the gateway and the [`ChatService`] that picks
//! between a real provider call and the mock responder.

pub mod service;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::registry::ModelDescriptor;

pub use service::ChatService;

/// Incoming chat request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// User message; must be non-empty after trimming
    #[serde(default)]
    pub message: String,
    /// Model id; absent or unknown ids fall back to the default model
    #[serde(default)]
    pub model: Option<String>,
    /// Conversation to read context from and append to
    #[serde(default)]
    pub conversation_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_conversation(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }

    /// The trimmed message, or a validation error if nothing is left
    pub fn validated_message(&self) -> AppResult<&str> {
        let message = self.message.trim();
        if message.is_empty() {
            return Err(AppError::BadRequest("Message is required".to_string()));
        }
        Ok(message)
    }

    /// Conversation id, treating an empty string as absent
    pub fn conversation(&self) -> Option<&str> {
        self.conversation_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Uniform chat result returned for real, mock and failed calls alike
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatResult {
    /// Reply text (or an apology on failure)
    pub response: String,
    /// Model actually used
    pub model: String,
    /// Display name of the model actually used
    pub model_name: String,
    pub timestamp: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResult {
    pub fn success(descriptor: &ModelDescriptor, response: String) -> Self {
        Self {
            response,
            model: descriptor.id.clone(),
            model_name: descriptor.display_name.clone(),
            timestamp: Utc::now().to_rfc3339(),
            success: true,
            error: None,
        }
    }

    pub fn failure(descriptor: &ModelDescriptor, error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            response: format!(
                "Sorry, I encountered an error with {}: {}",
                descriptor.id, error
            ),
            model: descriptor.id.clone(),
            model_name: descriptor.display_name.clone(),
            timestamp: Utc::now().to_rfc3339(),
            success: false,
            error: Some(error),
        }
    }
}
