//! Credential loading
//!
//! Resolves, once at startup, which models have a usable API key. Models
//! without a key are served by the mock responder.

use std::collections::HashMap;
use std::fmt;

use tracing::{info, warn};

use crate::registry::ModelRegistry;

/// Resolved credentials, keyed by model id
///
/// Read-only after construction. The `Debug` output lists model ids only.
#[derive(Clone, Default)]
pub struct CredentialSet {
    keys: HashMap<String, String>,
}

impl CredentialSet {
    /// Load credentials for every registered model from the process environment
    pub fn from_env(registry: &ModelRegistry) -> Self {
        Self::load_all(registry, |name| std::env::var(name).ok())
    }

    /// Load credentials using `lookup` to read each model's variable
    ///
    /// A model is configured only when its variable resolves to a value that is
    /// non-empty after trimming.
    pub fn load_all<F>(registry: &ModelRegistry, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut keys = HashMap::new();

        for descriptor in registry.descriptors() {
            let env_name = descriptor.credential_env_name.as_str();
            match lookup(env_name).filter(|v| !v.trim().is_empty()) {
                Some(key) => {
                    info!(model = %descriptor.id, env = %env_name, "API key loaded");
                    keys.insert(descriptor.id.clone(), key.trim().to_string());
                }
                None => {
                    warn!(model = %descriptor.id, env = %env_name, "No API key found");
                }
            }
        }

        Self { keys }
    }

    pub fn is_configured(&self, model_id: &str) -> bool {
        self.keys.contains_key(model_id)
    }

    /// Secret for `model_id`, if configured
    pub fn get(&self, model_id: &str) -> Option<&str> {
        self.keys.get(model_id).map(String::as_str)
    }

    /// Configured model ids in registry order
    pub fn configured_ids<'a>(&self, registry: &'a ModelRegistry) -> Vec<&'a str> {
        registry
            .all_model_ids()
            .into_iter()
            .filter(|id| self.is_configured(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.keys.keys().collect();
        ids.sort();
        f.debug_struct("CredentialSet")
            .field("configured", &ids)
            .finish()
    }
}
