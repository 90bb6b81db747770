//! Dummy LLM provider: echoes the last user turn back prefixed with `[echo]`.
//!
//! Used for credential-free local runs and for driving the full request path
//! in tests. Every request is recorded so callers can inspect the messages and
//! generation parameters that would have gone upstream.

use std::sync::{Arc, Mutex};

use crate::catalog::GenerationParams;
use crate::llm::ProviderError;
use crate::memory::{Role, Turn};

/// One request as seen by the dummy provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub messages: Vec<Turn>,
    pub params: GenerationParams,
}

#[derive(Debug, Clone, Default)]
pub struct DummyProvider {
    reply: Option<String>,
    failure: Option<ProviderError>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl DummyProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request with `reply` instead of echoing.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self { reply: Some(reply.into()), ..Self::default() }
    }

    /// Fail every request with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self { failure: Some(error), ..Self::default() }
    }

    /// Requests received so far, oldest first. Shared between clones.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub async fn complete(
        &self,
        messages: &[Turn],
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall { messages: messages.to_vec(), params: *params });
        }

        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        if let Some(reply) = &self.reply {
            return Ok(reply.clone());
        }

        let last_user = messages
            .iter()
            .rev()
            .find(|t| t.role == Role::User)
            .map(|t| t.content.as_str())
            .unwrap_or("");
        Ok(format!("[echo] {last_user}"))
    }
}
