//! Provider adapters
//!
//! Each provider family speaks its own wire protocol. A [`ProviderAdapter`]
//! turns a [`ProviderCall`] into the provider's HTTP request and pulls the
//! reply text back out of the provider's response envelope. The
//! [`ProviderClient`] performs the actual HTTP exchange.

pub mod anthropic;
pub mod client;
pub mod google;
pub mod openai;
pub mod replicate;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::conversation::{ConversationTurn, CONTEXT_WINDOW_TURNS};
use crate::registry::{ModelDescriptor, Provider};

pub use anthropic::AnthropicAdapter;
pub use client::ProviderClient;
pub use google::GoogleAdapter;
pub use openai::OpenAiCompatibleAdapter;
pub use replicate::ReplicateAdapter;

/// System prompt prepended for chat-completions style providers
pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant integrated into a development environment. You can help with coding, debugging, explaining concepts, and general programming questions. Be concise but thorough in your responses.";

/// Errors from a single upstream call
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} request failed: {message}")]
    Transport { provider: Provider, message: String },

    #[error("{provider} request timed out after {seconds}s")]
    Timeout { provider: Provider, seconds: u64 },

    #[error("{provider} API error {status}: {body}")]
    Status {
        provider: Provider,
        status: u16,
        body: String,
    },

    #[error("Unexpected {provider} response: {message}")]
    MalformedResponse { provider: Provider, message: String },
}

impl ProviderError {
    pub fn malformed(provider: Provider, message: impl Into<String>) -> Self {
        ProviderError::MalformedResponse {
            provider,
            message: message.into(),
        }
    }

    /// HTTP status returned upstream, if the call got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Everything an adapter needs to call one model
#[derive(Clone, Copy)]
pub struct ProviderCall<'a> {
    pub descriptor: &'a ModelDescriptor,
    pub credential: &'a str,
    pub message: &'a str,
    /// Trailing context window, never longer than [`CONTEXT_WINDOW_TURNS`]
    pub history: &'a [ConversationTurn],
}

impl<'a> ProviderCall<'a> {
    /// Build a call, keeping only the trailing context window of `history`
    pub fn new(
        descriptor: &'a ModelDescriptor,
        credential: &'a str,
        message: &'a str,
        history: &'a [ConversationTurn],
    ) -> Self {
        let start = history.len().saturating_sub(CONTEXT_WINDOW_TURNS);
        Self {
            descriptor,
            credential,
            message,
            history: &history[start..],
        }
    }
}

/// Provider-specific HTTP request, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub url: String,
    /// Query parameters, percent-encoded when the request is sent
    pub query: Vec<(&'static str, String)>,
    pub headers: Vec<(&'static str, String)>,
    pub body: serde_json::Value,
}

impl UpstreamRequest {
    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body,
        }
    }

    pub fn query(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, value.into()));
        self
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Translation between the internal call and one provider's wire format
pub trait ProviderAdapter: Send + Sync {
    /// Build the HTTP request for `call`
    fn build_request(&self, call: &ProviderCall<'_>) -> UpstreamRequest;

    /// Extract the reply text from a successful response body
    fn parse_reply(&self, provider: Provider, body: &str) -> Result<String, ProviderError>;
}

static OPENAI_COMPATIBLE: OpenAiCompatibleAdapter = OpenAiCompatibleAdapter;
static ANTHROPIC: AnthropicAdapter = AnthropicAdapter;
static GOOGLE: GoogleAdapter = GoogleAdapter;
static REPLICATE: ReplicateAdapter = ReplicateAdapter;

/// Adapter for a provider family
pub fn adapter_for(provider: Provider) -> &'static dyn ProviderAdapter {
    match provider {
        Provider::OpenAI | Provider::Mistral => &OPENAI_COMPATIBLE,
        Provider::Anthropic => &ANTHROPIC,
        Provider::Google => &GOOGLE,
        Provider::Replicate => &REPLICATE,
    }
}

/// Something that can produce a reply for a model
///
/// The production implementation is [`ProviderClient`]; tests substitute
/// recording or failing implementations.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Name for logging
    fn name(&self) -> &'static str;

    /// Send `call` upstream and return the reply text
    async fn complete(&self, call: ProviderCall<'_>) -> Result<String, ProviderError>;
}

/// Role/content message list shared by the chat-style adapters
pub(crate) fn chat_messages(call: &ProviderCall<'_>) -> Vec<serde_json::Value> {
    let mut messages: Vec<serde_json::Value> = call
        .history
        .iter()
        .map(|turn| serde_json::json!({ "role": turn.role.as_str(), "content": turn.content }))
        .collect();
    messages.push(serde_json::json!({ "role": "user", "content": call.message }));
    messages
}

pub(crate) fn decode<T: DeserializeOwned>(provider: Provider, body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::malformed(provider, e.to_string()))
}
