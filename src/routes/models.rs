//! Models endpoint
//!
//! Lists every registered model with its configuration status.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{ser::SerializeMap, Serialize, Serializer};
use utoipa::ToSchema;

use crate::{registry::Provider, AppState};

/// Model information
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModelInfo {
    /// Display name
    pub name: String,
    pub provider: Provider,
    /// Whether an API key is available (otherwise the model answers in mock mode)
    pub configured: bool,
    /// Environment variable the API key is read from
    pub api_key_env: String,
}

/// Models keyed by id, serialized as a JSON object in registration order
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog(pub Vec<(String, ModelInfo)>);

impl Serialize for ModelCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, info) in &self.0 {
            map.serialize_entry(id, info)?;
        }
        map.end()
    }
}

/// Models list response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModelsResponse {
    #[schema(value_type = std::collections::HashMap<String, ModelInfo>)]
    pub models: ModelCatalog,
    pub default_model: String,
}

/// List available models
#[utoipa::path(
    get,
    path = "/api/models",
    tag = "Models",
    responses((status = 200, description = "Registered models", body = ModelsResponse))
)]
pub async fn list_models(State(state): State<Arc<AppState>>) -> Json<ModelsResponse> {
    let models = state
        .registry
        .descriptors()
        .map(|descriptor| {
            (
                descriptor.id.clone(),
                ModelInfo {
                    name: descriptor.display_name.clone(),
                    provider: descriptor.provider,
                    configured: state.credentials.is_configured(&descriptor.id),
                    api_key_env: descriptor.credential_env_name.clone(),
                },
            )
        })
        .collect();

    Json(ModelsResponse {
        models: ModelCatalog(models),
        default_model: state.registry.default_model().to_string(),
    })
}
