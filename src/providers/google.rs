//! Google Gemini adapter
//!
//! Turns are sent as `contents` entries of `{role, parts: [{text}]}` and the
//! API key travels in the `key` query parameter rather than a header.

use serde::Deserialize;
use serde_json::json;

use super::{decode, ProviderAdapter, ProviderCall, ProviderError, UpstreamRequest};
use crate::registry::Provider;

#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleAdapter;

#[derive(Debug, Deserialize)]
struct GenerateContentEnvelope {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

fn content_entry(role: &str, text: &str) -> serde_json::Value {
    json!({ "role": role, "parts": [{ "text": text }] })
}

impl ProviderAdapter for GoogleAdapter {
    fn build_request(&self, call: &ProviderCall<'_>) -> UpstreamRequest {
        let mut contents: Vec<serde_json::Value> = call
            .history
            .iter()
            .map(|turn| content_entry(turn.role.as_str(), &turn.content))
            .collect();
        contents.push(content_entry("user", call.message));

        let body = json!({
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": call.descriptor.max_tokens,
                "temperature": call.descriptor.temperature,
            }
        });

        UpstreamRequest::post(call.descriptor.url(), body).query("key", call.credential)
    }

    fn parse_reply(&self, provider: Provider, body: &str) -> Result<String, ProviderError> {
        let envelope: GenerateContentEnvelope = decode(provider, body)?;
        envelope
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| {
                ProviderError::malformed(provider, "missing candidates[0].content.parts[0].text")
            })
    }
}
