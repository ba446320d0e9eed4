//! Conversation history
//!
//! Ephemeral, process-lifetime storage of chat turns keyed by a
//! caller-supplied conversation id. History feeds the trailing context window
//! sent to providers.

pub mod log;
pub mod store;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use log::ConversationLog;
pub use store::{ConversationLease, ConversationStore};

/// Number of stored turns sent upstream with each request (five exchanges)
pub const CONTEXT_WINDOW_TURNS: usize = 10;

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

/// One immutable message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
    /// ISO-8601 creation time
    pub timestamp: String,
}

impl ConversationTurn {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }
}
