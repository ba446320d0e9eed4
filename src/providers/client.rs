//! HTTP client for provider calls
//!
//! Sends the request an adapter builds, enforces the upstream timeout and maps
//! every failure into a [`ProviderError`].

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, instrument};

use super::{adapter_for, AiProvider, ProviderCall, ProviderError};
use crate::registry::Provider;

/// Provider client backed by `reqwest`
pub struct ProviderClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl ProviderClient {
    /// Create a client; `timeout` bounds each upstream call
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    fn transport_error(&self, provider: Provider, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            return ProviderError::Timeout {
                provider,
                seconds: self.timeout.as_secs(),
            };
        }
        // The URL may carry a credential in its query string
        ProviderError::Transport {
            provider,
            message: err.without_url().to_string(),
        }
    }
}

#[async_trait]
impl AiProvider for ProviderClient {
    fn name(&self) -> &'static str {
        "http"
    }

    #[instrument(
        skip(self, call),
        fields(model = %call.descriptor.id, provider = %call.descriptor.provider, history = call.history.len())
    )]
    async fn complete(&self, call: ProviderCall<'_>) -> Result<String, ProviderError> {
        let provider = call.descriptor.provider;
        let adapter = adapter_for(provider);
        let request = adapter.build_request(&call);

        debug!(url = %call.descriptor.url(), "Sending request to provider");

        let mut builder = self
            .client
            .post(&request.url)
            .timeout(self.timeout)
            .json(&request.body);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.transport_error(provider, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(provider, e))?;

        debug!(status = %status, body_len = body.len(), "Received response from provider");

        if !status.is_success() {
            error!(status = %status, body = %body, "Provider request failed");
            return Err(ProviderError::Status {
                provider,
                status: status.as_u16(),
                body,
            });
        }

        adapter.parse_reply(provider, &body).map_err(|e| {
            error!(error = %e, "Failed to parse provider response");
            e
        })
    }
}
