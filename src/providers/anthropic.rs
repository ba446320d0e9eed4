//! Anthropic messages adapter
//!
//! No system preamble: only the context window and the new user turn are
//! sent. Authentication uses `x-api-key` plus a pinned `anthropic-version`.

use serde::Deserialize;
use serde_json::json;

use super::{chat_messages, decode, ProviderAdapter, ProviderCall, ProviderError, UpstreamRequest};
use crate::registry::Provider;

/// API version header sent with every request
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicAdapter;

#[derive(Debug, Deserialize)]
struct MessagesEnvelope {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

impl ProviderAdapter for AnthropicAdapter {
    fn build_request(&self, call: &ProviderCall<'_>) -> UpstreamRequest {
        let body = json!({
            "model": call.descriptor.id,
            "messages": chat_messages(call),
            "max_tokens": call.descriptor.max_tokens,
            "temperature": call.descriptor.temperature,
        });

        UpstreamRequest::post(call.descriptor.url(), body)
            .header("x-api-key", call.credential)
            .header("anthropic-version", ANTHROPIC_VERSION)
    }

    fn parse_reply(&self, provider: Provider, body: &str) -> Result<String, ProviderError> {
        let envelope: MessagesEnvelope = decode(provider, body)?;
        envelope
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| ProviderError::malformed(provider, "missing content[0].text"))
    }
}
