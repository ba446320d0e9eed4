//! OpenAPI specification for the gateway API
//!
//! Aggregates all endpoints and schemas into a single OpenAPI document.

use utoipa::OpenApi;

use crate::{
    chat::{ChatRequest, ChatResult},
    conversation::{ConversationTurn, TurnRole},
    error::ErrorResponse,
    registry::Provider,
    routes::{
        conversations::{ClearConversationResponse, ConversationListResponse, ConversationResponse},
        health::{HealthResponse, HealthStatus},
        models::{ModelInfo, ModelsResponse},
    },
};

/// OpenAPI specification for the Switchboard API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Switchboard API",
        version = "1.0.0",
        description = "Multi-provider chat gateway with in-memory conversation history"
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::models::list_models,
        crate::routes::chat::chat,
        crate::routes::conversations::get_conversation,
        crate::routes::conversations::clear_conversation,
        crate::routes::conversations::list_conversations,
    ),
    components(
        schemas(
            // Models
            Provider,
            ModelInfo,
            ModelsResponse,
            // Chat
            ChatRequest,
            ChatResult,
            // Conversations
            TurnRole,
            ConversationTurn,
            ConversationResponse,
            ConversationListResponse,
            ClearConversationResponse,
            // Health
            HealthStatus,
            HealthResponse,
            // Error
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Models", description = "Model registry"),
        (name = "Chat", description = "Chat endpoint"),
        (name = "Conversations", description = "Conversation history")
    )
)]
pub struct ApiDoc;
