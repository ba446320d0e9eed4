//! HTTP routes for Switchboard
//!
//! This module defines all HTTP endpoints exposed by the gateway.

pub mod chat;
pub mod conversations;
pub mod health;
pub mod metrics;
pub mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{docs::ApiDoc, AppState};

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/models", get(models::list_models))
        .route("/api/chat", post(chat::chat))
        .route("/api/conversations", get(conversations::list_conversations))
        .route(
            "/api/conversations/:conversation_id",
            get(conversations::get_conversation).delete(conversations::clear_conversation),
        );

    let operational_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .route("/api/openapi.json", get(openapi_json));

    Router::new()
        .merge(api_routes)
        .merge(operational_routes)
        // Global middleware (applied to all routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// OpenAPI document for the HTTP surface
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
