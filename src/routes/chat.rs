//! Chat endpoint
//!
//! Accepts a message for any registered model and returns the uniform chat
//! result. Upstream failures still produce a 200 with `success: false`.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

use crate::{
    chat::{ChatRequest, ChatResult},
    error::{AppError, AppResult},
    routes::metrics::record_chat,
    AppState,
};

/// Send a chat message
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "Chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Chat result (check `success`)", body = ChatResult),
        (status = 400, description = "Missing or empty message", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal error", body = crate::error::ErrorResponse)
    )
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResult>> {
    let Json(request) = payload
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e.body_text())))?;

    let start = Instant::now();
    let result = state.chat.chat(&request).await?;

    let outcome = if !result.success {
        "error"
    } else if state.chat.is_mock(&result.model) {
        "mock"
    } else {
        "success"
    };
    record_chat(outcome, &result.model, start.elapsed().as_secs_f64());

    info!(
        model = %result.model,
        outcome = outcome,
        duration_ms = start.elapsed().as_millis() as u64,
        "Chat request completed"
    );

    Ok(Json(result))
}
