//! Chat-completions adapter
//!
//! Serves OpenAI and Mistral, which share one wire format: a system prompt,
//! the context window and the new user turn as a `messages` array, with a
//! Bearer token. The reply lives at `choices[0].message.content`.

use serde::Deserialize;
use serde_json::json;

use super::{chat_messages, decode, ProviderAdapter, ProviderCall, ProviderError, UpstreamRequest, SYSTEM_PROMPT};
use crate::registry::Provider;

#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiCompatibleAdapter;

#[derive(Debug, Deserialize)]
struct ChatCompletionEnvelope {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ProviderAdapter for OpenAiCompatibleAdapter {
    fn build_request(&self, call: &ProviderCall<'_>) -> UpstreamRequest {
        let mut messages = vec![json!({ "role": "system", "content": SYSTEM_PROMPT })];
        messages.extend(chat_messages(call));

        let body = json!({
            "model": call.descriptor.id,
            "messages": messages,
            "max_tokens": call.descriptor.max_tokens,
            "temperature": call.descriptor.temperature,
        });

        UpstreamRequest::post(call.descriptor.url(), body)
            .header("Authorization", format!("Bearer {}", call.credential))
    }

    fn parse_reply(&self, provider: Provider, body: &str) -> Result<String, ProviderError> {
        let envelope: ChatCompletionEnvelope = decode(provider, body)?;
        envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::malformed(provider, "missing choices[0].message.content"))
    }
}
