//! Conversation endpoints
//!
//! Read, list and clear the in-memory conversation history.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::{conversation::ConversationTurn, AppState};

/// One conversation's history
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConversationResponse {
    pub conversation_id: String,
    pub messages: Vec<ConversationTurn>,
    pub count: usize,
}

/// Known conversation ids
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConversationListResponse {
    pub conversations: Vec<String>,
    pub count: usize,
}

/// Acknowledgement for a cleared conversation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClearConversationResponse {
    pub message: String,
    pub success: bool,
}

/// Get conversation history (empty for unknown ids)
#[utoipa::path(
    get,
    path = "/api/conversations/{conversation_id}",
    tag = "Conversations",
    params(("conversation_id" = String, Path, description = "Conversation id")),
    responses((status = 200, description = "Conversation history", body = ConversationResponse))
)]
pub async fn get_conversation(
    State(state): State<Arc<AppState>>,
    Path(conversation_id): Path<String>,
) -> Json<ConversationResponse> {
    let messages = state.conversations.history(&conversation_id);

    Json(ConversationResponse {
        count: messages.len(),
        conversation_id,
        messages,
    })
}

/// Clear conversation history
///
/// Succeeds whether or not the conversation existed.
#[utoipa::path(
    delete,
    path = "/api/conversations/{conversation_id}",
    tag = "Conversations",
    params(("conversation_id" = String, Path, description = "Conversation id")),
    responses((status = 200, description = "Conversation cleared", body = ClearConversationResponse))
)]
pub async fn clear_conversation(
    State(state): State<Arc<AppState>>,
    Path(conversation_id): Path<String>,
) -> Json<ClearConversationResponse> {
    let existed = state.conversations.clear(&conversation_id);
    info!(conversation_id = %conversation_id, existed, "Conversation cleared");

    Json(ClearConversationResponse {
        message: "Conversation cleared".to_string(),
        success: true,
    })
}

/// List all conversations
#[utoipa::path(
    get,
    path = "/api/conversations",
    tag = "Conversations",
    responses((status = 200, description = "Known conversation ids", body = ConversationListResponse))
)]
pub async fn list_conversations(
    State(state): State<Arc<AppState>>,
) -> Json<ConversationListResponse> {
    let conversations = state.conversations.list_ids();

    Json(ConversationListResponse {
        count: conversations.len(),
        conversations,
    })
}
