//! Model registry
//!
//! Static table of every model the gateway can route to, together with the
//! provider metadata needed to call it. The table is compiled into the binary;
//! the only startup-time adjustment is an optional per-provider base URL
//! override coming from configuration.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Model used when a request omits `model` or names an unknown one
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const DEFAULT_MAX_TOKENS: u32 = 4000;
const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Errors raised while assembling the registry
///
/// These indicate a defect in the compiled table or in startup configuration
/// and abort the process instead of being handled per request.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("Duplicate model id in registry: {0}")]
    DuplicateModel(String),

    #[error("Model {model} has invalid max_tokens {max_tokens}")]
    InvalidMaxTokens { model: String, max_tokens: u32 },

    #[error("Model {model} has temperature {temperature} outside [0, 2]")]
    InvalidTemperature { model: String, temperature: f64 },

    #[error("Default model {0} is not registered")]
    MissingDefaultModel(String),

    #[error("Invalid base URL override for {provider}: {url}")]
    InvalidBaseUrl { provider: Provider, url: String },
}

/// Provider family a model belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAI,
    Anthropic,
    Google,
    Replicate,
    Mistral,
}

impl Provider {
    /// All provider families, in the order they appear in the table
    pub const ALL: [Provider; 5] = [
        Provider::OpenAI,
        Provider::Anthropic,
        Provider::Google,
        Provider::Replicate,
        Provider::Mistral,
    ];

    /// Lowercase tag used in API responses and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Google => "google",
            Provider::Replicate => "replicate",
            Provider::Mistral => "mistral",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one callable model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    /// Unique model identifier, also sent upstream as the model name
    pub id: String,
    /// Human readable name returned to callers
    pub display_name: String,
    pub provider: Provider,
    pub api_base: String,
    pub endpoint_path: String,
    /// Environment variable holding the credential for this model
    pub credential_env_name: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl ModelDescriptor {
    fn builtin(
        id: &str,
        display_name: &str,
        provider: Provider,
        api_base: &str,
        endpoint_path: &str,
        credential_env_name: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            provider,
            api_base: api_base.to_string(),
            endpoint_path: endpoint_path.to_string(),
            credential_env_name: credential_env_name.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Full upstream URL (base + endpoint, without query string)
    pub fn url(&self) -> String {
        format!("{}{}", self.api_base, self.endpoint_path)
    }
}

fn builtin_descriptors() -> Vec<ModelDescriptor> {
    use Provider::*;

    const OPENAI_BASE: &str = "https://api.openai.com/v1";
    const ANTHROPIC_BASE: &str = "https://api.anthropic.com";
    const GOOGLE_BASE: &str = "https://generativelanguage.googleapis.com";
    const REPLICATE_BASE: &str = "https://api.replicate.com/v1";
    const MISTRAL_BASE: &str = "https://api.mistral.ai/v1";

    vec![
        ModelDescriptor::builtin("gpt-4", "GPT-4 (OpenAI)", OpenAI, OPENAI_BASE, "/chat/completions", "OPENAI_API_KEY"),
        ModelDescriptor::builtin("gpt-3.5-turbo", "GPT-3.5 Turbo (OpenAI)", OpenAI, OPENAI_BASE, "/chat/completions", "OPENAI_API_KEY"),
        ModelDescriptor::builtin("gpt-4-turbo", "GPT-4 Turbo (OpenAI)", OpenAI, OPENAI_BASE, "/chat/completions", "OPENAI_API_KEY"),
        ModelDescriptor::builtin("claude-3-sonnet", "Claude 3 Sonnet (Anthropic)", Anthropic, ANTHROPIC_BASE, "/v1/messages", "ANTHROPIC_API_KEY"),
        ModelDescriptor::builtin("claude-3-haiku", "Claude 3 Haiku (Anthropic)", Anthropic, ANTHROPIC_BASE, "/v1/messages", "ANTHROPIC_API_KEY"),
        ModelDescriptor::builtin("claude-3-opus", "Claude 3 Opus (Anthropic)", Anthropic, ANTHROPIC_BASE, "/v1/messages", "ANTHROPIC_API_KEY"),
        ModelDescriptor::builtin("gemini-pro", "Gemini Pro (Google)", Google, GOOGLE_BASE, "/v1beta/models/gemini-pro:generateContent", "GOOGLE_API_KEY"),
        ModelDescriptor::builtin("gemini-pro-vision", "Gemini Pro Vision (Google)", Google, GOOGLE_BASE, "/v1beta/models/gemini-pro-vision:generateContent", "GOOGLE_API_KEY"),
        ModelDescriptor::builtin("llama-2-70b", "Llama 2 70B (Meta)", Replicate, REPLICATE_BASE, "/predictions", "REPLICATE_API_KEY"),
        ModelDescriptor::builtin("mistral-7b", "Mistral 7B (Mistral AI)", Mistral, MISTRAL_BASE, "/chat/completions", "MISTRAL_API_KEY"),
        ModelDescriptor::builtin("mistral-large", "Mistral Large (Mistral AI)", Mistral, MISTRAL_BASE, "/chat/completions", "MISTRAL_API_KEY"),
    ]
}

/// Registry of known models, in registration order
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: Vec<ModelDescriptor>,
    index: HashMap<String, usize>,
    default_model: String,
}

impl ModelRegistry {
    /// Build the registry from the compiled-in table
    pub fn builtin() -> Result<Self, ConfigurationError> {
        Self::from_descriptors(builtin_descriptors(), DEFAULT_MODEL)
    }

    /// Build the compiled-in table with some provider families pointed at
    /// another base URL
    pub fn builtin_with_overrides(
        overrides: &HashMap<Provider, String>,
    ) -> Result<Self, ConfigurationError> {
        let mut descriptors = builtin_descriptors();

        for (provider, url) in overrides {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigurationError::InvalidBaseUrl {
                    provider: *provider,
                    url: url.clone(),
                });
            }
            let base = url.trim_end_matches('/');
            for descriptor in descriptors.iter_mut().filter(|d| d.provider == *provider) {
                descriptor.api_base = base.to_string();
            }
        }

        Self::from_descriptors(descriptors, DEFAULT_MODEL)
    }

    /// Build a registry from an explicit table, validating every entry
    pub fn from_descriptors(
        models: Vec<ModelDescriptor>,
        default_model: &str,
    ) -> Result<Self, ConfigurationError> {
        let mut seen = HashSet::new();
        let mut index = HashMap::with_capacity(models.len());

        for (position, model) in models.iter().enumerate() {
            if !seen.insert(model.id.clone()) {
                return Err(ConfigurationError::DuplicateModel(model.id.clone()));
            }
            if model.max_tokens == 0 {
                return Err(ConfigurationError::InvalidMaxTokens {
                    model: model.id.clone(),
                    max_tokens: model.max_tokens,
                });
            }
            if !(0.0..=2.0).contains(&model.temperature) {
                return Err(ConfigurationError::InvalidTemperature {
                    model: model.id.clone(),
                    temperature: model.temperature,
                });
            }
            index.insert(model.id.clone(), position);
        }

        if !index.contains_key(default_model) {
            return Err(ConfigurationError::MissingDefaultModel(
                default_model.to_string(),
            ));
        }

        Ok(Self {
            models,
            index,
            default_model: default_model.to_string(),
        })
    }

    /// Look up a model by id
    pub fn describe(&self, model_id: &str) -> Option<&ModelDescriptor> {
        self.index.get(model_id).map(|&i| &self.models[i])
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Resolve a requested model, substituting the default for absent or
    /// unknown ids
    pub fn resolve(&self, requested: Option<&str>) -> &ModelDescriptor {
        requested
            .and_then(|id| self.describe(id))
            .unwrap_or_else(|| &self.models[self.index[&self.default_model]])
    }

    /// Model ids in registration order
    pub fn all_model_ids(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.id.as_str()).collect()
    }

    /// Descriptors in registration order
    pub fn descriptors(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
