//! Health check endpoint
//!
//! `/api/health` reports liveness together with which models are registered
//! and which of them have credentials.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::AppState;

/// Health status enum
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: String,
    /// Every registered model id, in registration order
    pub available_models: Vec<String>,
    /// Model ids with a usable API key
    pub configured_models: Vec<String>,
    pub total_models: usize,
    pub configured_count: usize,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let available_models: Vec<String> = state
        .registry
        .all_model_ids()
        .into_iter()
        .map(str::to_string)
        .collect();
    let configured_models: Vec<String> = state
        .credentials
        .configured_ids(&state.registry)
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(HealthResponse {
        status: HealthStatus::Healthy,
        timestamp: chrono::Utc::now().to_rfc3339(),
        total_models: available_models.len(),
        configured_count: configured_models.len(),
        available_models,
        configured_models,
    })
}
