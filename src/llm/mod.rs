//! LLM provider abstraction.
//!
//! `LlmProvider` is an enum over concrete provider implementations.
//! Add a new variant + module in `providers/` for each additional backend.
//!
//! Provider instances are shared immutable capabilities: clone them freely.

pub mod providers;

use thiserror::Error;

use crate::catalog::GenerationParams;
use crate::memory::Turn;

// ── Error ─────────────────────────────────────────────────────────────────────

/// Failure classes of a completion call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    /// Upstream rejected the credentials.
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("rate limit exceeded: {0}")]
    RateLimit(String),
    /// Any other error status reported by the upstream API.
    #[error("{0}")]
    Api(String),
    /// Transport failure or a reply that could not be understood.
    #[error("provider request failed: {0}")]
    Request(String),
}

// ── Provider enum ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum LlmProvider {
    Dummy(providers::dummy::DummyProvider),
    Azure(providers::azure_openai::AzureOpenAiProvider),
}

impl LlmProvider {
    /// Send the full ordered conversation and return the assistant's reply.
    pub async fn complete(
        &self,
        messages: &[Turn],
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        match self {
            LlmProvider::Dummy(p) => p.complete(messages, params).await,
            LlmProvider::Azure(p) => p.complete(messages, params).await,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::Dummy(_) => "dummy",
            LlmProvider::Azure(_) => "azure",
        }
    }
}
