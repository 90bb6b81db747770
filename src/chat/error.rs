//! Errors surfaced to HTTP callers, with their status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::llm::ProviderError;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("No message provided")]
    Validation,

    #[error("Invalid JSON body: {0}")]
    MalformedBody(String),

    #[error("Authentication failed. Please check your Azure OpenAI credentials.")]
    UpstreamAuth,

    #[error("Rate limit exceeded. Please try again later.")]
    UpstreamRateLimit,

    #[error("API error: {0}")]
    UpstreamApi(String),

    /// Unclassified failure on the chat path; detail is logged, not returned.
    #[error("An unexpected error occurred. Please try again.")]
    Unexpected(String),

    /// Internal fault on a route without an upstream; the raw text is returned.
    #[error("{0}")]
    Internal(String),
}

impl ChatError {
    pub fn status(&self) -> StatusCode {
        match self {
            ChatError::Validation | ChatError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ChatError::UpstreamAuth => StatusCode::UNAUTHORIZED,
            ChatError::UpstreamRateLimit => StatusCode::TOO_MANY_REQUESTS,
            ChatError::UpstreamApi(_) | ChatError::Unexpected(_) | ChatError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ProviderError> for ChatError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Auth(_) => ChatError::UpstreamAuth,
            ProviderError::RateLimit(_) => ChatError::UpstreamRateLimit,
            ProviderError::Api(detail) => ChatError::UpstreamApi(detail),
            other @ (ProviderError::Request(_) | ProviderError::UnknownProvider(_)) => {
                ChatError::Unexpected(other.to_string())
            }
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
