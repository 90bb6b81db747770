//! Route handlers.
//!
//! Bodies are read as raw bytes so an empty body counts as `{}` regardless
//! of content type; anything else must be valid JSON for the route.

use axum::{
    Json,
    body::Bytes,
    extract::State,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{error, warn};

use crate::catalog::{Mode, Personality};
use crate::chat::ChatError;
use crate::memory::Preference;

use super::AppState;
use super::identity::Client;

const LIVENESS_TEXT: &str = "Enhanced Azure AI Chatbot Backend is running!";

// ── Request types ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub(super) struct ChatBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    personality: Option<String>,
}

#[derive(Deserialize, Default)]
pub(super) struct PreferenceBody {
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    personality: Option<String>,
}

fn preference_from(mode: Option<String>, personality: Option<String>) -> Preference {
    Preference::new(
        mode.unwrap_or_else(|| Mode::DEFAULT_KEY.to_string()),
        personality.unwrap_or_else(|| Personality::DEFAULT_KEY.to_string()),
    )
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ChatError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| ChatError::MalformedBody(e.to_string()))
}

fn internal(e: impl std::fmt::Display) -> ChatError {
    error!(error = %e, "request failed");
    ChatError::Internal(e.to_string())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// GET /
pub(super) async fn root() -> &'static str {
    LIVENESS_TEXT
}

/// POST /chat
pub(super) async fn chat(
    State(state): State<AppState>,
    Client(client): Client,
    body: Bytes,
) -> Result<Json<Value>, ChatError> {
    let req = parse_body::<ChatBody>(&body)
        .inspect_err(|e| warn!(%client, error = %e, "rejected chat body"))?;
    let message = req.message.unwrap_or_default();
    let preference = preference_from(req.mode, req.personality);

    state
        .chat
        .chat(&client, &message, preference)
        .await
        .map(|reply| Json(json!({ "response": reply })))
        .inspect_err(|e| match e {
            ChatError::Validation => warn!(%client, "chat rejected: no message"),
            // Debug keeps the detail that Unexpected hides from the caller.
            other => error!(%client, error = ?other, "chat failed"),
        })
}

/// POST /clear
pub(super) async fn clear(
    State(state): State<AppState>,
    Client(client): Client,
) -> Result<Json<Value>, ChatError> {
    state.chat.clear(&client).map_err(internal)?;
    Ok(Json(json!({ "message": "Conversation cleared successfully" })))
}

/// POST /set_preferences
pub(super) async fn set_preferences(
    State(state): State<AppState>,
    Client(client): Client,
    body: Bytes,
) -> Result<Json<Value>, ChatError> {
    let req: PreferenceBody = parse_body(&body)?;
    state
        .chat
        .set_preferences(&client, preference_from(req.mode, req.personality))
        .map_err(internal)?;
    Ok(Json(json!({ "message": "Preferences updated successfully" })))
}

/// GET /get_preferences
pub(super) async fn get_preferences(
    State(state): State<AppState>,
    Client(client): Client,
) -> Result<Json<Preference>, ChatError> {
    state.chat.preferences(&client).map(Json).map_err(internal)
}

/// GET /modes
pub(super) async fn modes() -> Json<Value> {
    Json(json!({
        "modes": Mode::keys(),
        "personalities": Personality::keys(),
    }))
}

/// GET /health
pub(super) async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "azure_openai_configured": state.credentials_configured,
        "features": {
            "modes": Mode::keys(),
            "personalities": Personality::keys(),
        },
    }))
}
