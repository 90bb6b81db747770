//! Azure OpenAI chat completion provider.
//!
//! Targets `{endpoint}/openai/deployments/{deployment}/chat/completions`
//! with the `api-key` header. All wire types are private to this module;
//! callers pass turns and generation parameters and get the reply text.
//! Error statuses are mapped to [`ProviderError`] classes by
//! [`classify_failure`].

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::catalog::GenerationParams;
use crate::llm::ProviderError;
use crate::memory::Turn;

/// Adapter for one Azure OpenAI deployment.
///
/// Constructed once at startup, then cheaply cloned because
/// `reqwest::Client` is an `Arc` internally.
#[derive(Debug, Clone)]
pub struct AzureOpenAiProvider {
    client: Client,
    url: String,
    deployment: String,
    api_key: String,
}

impl AzureOpenAiProvider {
    /// Build a provider for `deployment` on the resource at `endpoint`.
    ///
    /// `timeout_seconds = None` leaves reqwest's default (no overall timeout).
    pub fn new(
        endpoint: &str,
        api_version: &str,
        deployment: String,
        timeout_seconds: Option<u64>,
        api_key: String,
    ) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))?;

        let url = completions_url(endpoint, &deployment, api_version);
        Ok(Self { client, url, deployment, api_key })
    }

    /// One round-trip: the whole conversation goes up, one reply comes back.
    pub async fn complete(
        &self,
        messages: &[Turn],
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        let payload = ChatCompletionRequest {
            model: &self.deployment,
            messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            frequency_penalty: params.frequency_penalty,
            presence_penalty: params.presence_penalty,
        };

        debug!(
            deployment = %self.deployment,
            messages = messages.len(),
            temperature = params.temperature,
            max_tokens = params.max_tokens,
            "sending completion request"
        );
        if tracing::enabled!(tracing::Level::TRACE) {
            let json = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
            trace!(payload = %json, "full completion request payload");
        }

        let response = self
            .client
            .post(&self.url)
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.url, error = %e, "completion request failed (transport)");
                ProviderError::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read error body>".to_string());
            let err = classify_failure(status, &body);
            error!(%status, error = %err, "completion request returned HTTP error");
            return Err(err);
        }

        let parsed = response.json::<ChatCompletionResponse>().await.map_err(|e| {
            error!(error = %e, "failed to deserialize completion response");
            ProviderError::Request(format!("failed to parse response body: {e}"))
        })?;

        debug!(choices = parsed.choices.len(), "received completion response");

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ProviderError::Request("missing content in response".into()))
    }
}

/// Full chat-completions URL for a deployment.
pub fn completions_url(endpoint: &str, deployment: &str, api_version: &str) -> String {
    format!(
        "{}/openai/deployments/{deployment}/chat/completions?api-version={api_version}",
        endpoint.trim_end_matches('/')
    )
}

/// Map a non-success upstream response to a [`ProviderError`] class.
///
/// 401/403 are credential failures, 429 is rate limiting, and every other
/// status is a generic API error carrying the upstream message.
pub fn classify_failure(status: StatusCode, body: &str) -> ProviderError {
    let detail = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) => {
            let code = env
                .error
                .code
                .map(|v| match v {
                    serde_json::Value::String(s) => format!(" [code={s}]"),
                    other => format!(" [code={other}]"),
                })
                .unwrap_or_default();
            format!("HTTP {status}{code}: {}", env.error.message)
        }
        Err(_) if body.trim().is_empty() => format!("HTTP {status}"),
        Err(_) => format!("HTTP {status}: {}", body.trim()),
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Auth(detail),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimit(detail),
        _ => ProviderError::Api(detail),
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// Error envelope used by OpenAI and Azure OpenAI.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<serde_json::Value>,
}
