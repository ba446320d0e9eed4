//! Replicate adapter (Llama)
//!
//! Replicate takes a single flattened prompt rather than a message list, and
//! runs a pinned model version.

use serde::Deserialize;
use serde_json::json;

use super::{decode, ProviderAdapter, ProviderCall, ProviderError, UpstreamRequest};
use crate::conversation::TurnRole;
use crate::registry::Provider;

/// Pinned model version sent with every prediction
pub const LLAMA_VERSION: &str =
    "meta/llama-2-70b-chat:02e509c789964a7ea8736978a43525956ef40397be9033abf9fd2badfe68c9e3";

const PROMPT_PREAMBLE: &str =
    "You are a helpful AI assistant integrated into a development environment.\n\n";

#[derive(Debug, Clone, Copy, Default)]
pub struct ReplicateAdapter;

#[derive(Debug, Deserialize)]
struct PredictionEnvelope {
    #[serde(default)]
    output: Option<Vec<String>>,
}

/// Flatten the context window and the new message into one prompt
pub fn build_prompt(call: &ProviderCall<'_>) -> String {
    let mut prompt = String::from(PROMPT_PREAMBLE);

    for turn in call.history {
        let speaker = match turn.role {
            TurnRole::User => "User",
            TurnRole::Assistant => "Assistant",
        };
        prompt.push_str(&format!("{}: {}\n", speaker, turn.content));
    }

    prompt.push_str(&format!("User: {}\nAssistant:", call.message));
    prompt
}

impl ProviderAdapter for ReplicateAdapter {
    fn build_request(&self, call: &ProviderCall<'_>) -> UpstreamRequest {
        let body = json!({
            "version": LLAMA_VERSION,
            "input": {
                "prompt": build_prompt(call),
                "max_tokens": call.descriptor.max_tokens,
                "temperature": call.descriptor.temperature,
            }
        });

        UpstreamRequest::post(call.descriptor.url(), body)
            .header("Authorization", format!("Token {}", call.credential))
    }

    fn parse_reply(&self, provider: Provider, body: &str) -> Result<String, ProviderError> {
        let envelope: PredictionEnvelope = decode(provider, body)?;
        envelope
            .output
            .and_then(|output| output.into_iter().next())
            .ok_or_else(|| ProviderError::malformed(provider, "missing output[0]"))
    }
}
