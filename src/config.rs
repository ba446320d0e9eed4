//! Configuration management for Switchboard
//!
//! Configuration is loaded from environment variables. Provider API keys are
//! not part of this struct; they are resolved per model by
//! [`CredentialSet`](crate::credentials::CredentialSet).

use std::collections::HashMap;
use std::env;

use anyhow::{bail, Context, Result};

use crate::registry::Provider;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Upper bound on a single provider call (in seconds)
    pub upstream_timeout_seconds: u64,

    /// Base URL overrides per provider family (e.g. for a corporate proxy)
    pub api_base_overrides: HashMap<Provider, String>,

    /// Verbose logging (development only)
    pub debug_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            upstream_timeout_seconds: 60,
            api_base_overrides: HashMap::new(),
            debug_enabled: false,
        }
    }
}

/// Environment variable overriding a provider family's base URL
pub fn base_url_env(provider: Provider) -> &'static str {
    match provider {
        Provider::OpenAI => "OPENAI_API_URL",
        Provider::Anthropic => "ANTHROPIC_API_URL",
        Provider::Google => "GOOGLE_API_URL",
        Provider::Replicate => "REPLICATE_API_URL",
        Provider::Mistral => "MISTRAL_API_URL",
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_overrides = Provider::ALL
            .iter()
            .filter_map(|&provider| {
                lookup(base_url_env(provider))
                    .filter(|url| !url.trim().is_empty())
                    .map(|url| (provider, url.trim().to_string()))
            })
            .collect();

        let debug_enabled = lookup("SWITCHBOARD_DEBUG")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false)
            || lookup("APP_ENV").is_some_and(|v| v == "development");

        let upstream_timeout_seconds: u64 = lookup("UPSTREAM_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "60".to_string())
            .parse()
            .context("Invalid UPSTREAM_TIMEOUT_SECONDS")?;
        if upstream_timeout_seconds == 0 {
            bail!("Invalid UPSTREAM_TIMEOUT_SECONDS: must be at least 1");
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse()
                .context("Invalid PORT")?,

            upstream_timeout_seconds,

            api_base_overrides,
            debug_enabled,
        })
    }
}
