//! Chat service: the request-handling core behind the HTTP routes.
//!
//! Per chat message:
//! 1. Reject an empty message before touching any state
//! 2. Record the requested mode/personality as the client's preference
//! 3. Compose the system prompt and fetch (or reset) the conversation
//! 4. Append the user turn
//! 5. Call the provider with the whole conversation and the mode's parameters
//! 6. Append the assistant turn and return the reply
//!
//! The store is consulted between steps, not locked across them, so two
//! concurrent messages from one client may interleave.

pub mod error;

use std::sync::Arc;

use tracing::info;

use crate::catalog::Mode;
use crate::error::AppError;
use crate::llm::LlmProvider;
use crate::memory::{ClientId, ConversationStore, Preference, Turn};
use crate::prompt;

pub use error::ChatError;

pub struct ChatService {
    store: Arc<dyn ConversationStore>,
    provider: LlmProvider,
}

impl ChatService {
    pub fn new(store: Arc<dyn ConversationStore>, provider: LlmProvider) -> Self {
        Self { store, provider }
    }

    /// Handle one chat message and return the assistant's reply.
    pub async fn chat(
        &self,
        client: &ClientId,
        message: &str,
        preference: Preference,
    ) -> Result<String, ChatError> {
        if message.is_empty() {
            return Err(ChatError::Validation);
        }

        let mode = Mode::resolve(&preference.mode);
        let system_prompt = prompt::compose(&preference.mode, &preference.personality);

        info!(
            client = %client,
            mode = %preference.mode,
            personality = %preference.personality,
            "processing chat message"
        );

        self.store.put_preference(client, preference).map_err(unexpected)?;
        self.store.get_or_reset(client, &system_prompt).map_err(unexpected)?;
        let conversation = self
            .store
            .append_turn(client, Turn::user(message))
            .map_err(unexpected)?;

        let reply = self
            .provider
            .complete(conversation.turns(), &mode.params())
            .await?;

        self.store
            .append_turn(client, Turn::assistant(reply.clone()))
            .map_err(unexpected)?;

        info!(client = %client, "response generated");
        Ok(reply)
    }

    /// Forget the client's conversation and preference.
    pub fn clear(&self, client: &ClientId) -> Result<(), AppError> {
        self.store.clear(client)
    }

    /// Overwrite the preference and drop the conversation so the next
    /// message starts under the new system prompt.
    pub fn set_preferences(&self, client: &ClientId, preference: Preference) -> Result<(), AppError> {
        self.store.put_preference(client, preference)?;
        self.store.delete_conversation(client)?;
        Ok(())
    }

    /// Stored preference, or the catalog defaults for an unknown client.
    pub fn preferences(&self, client: &ClientId) -> Result<Preference, AppError> {
        Ok(self.store.preference(client)?.unwrap_or_default())
    }
}

fn unexpected(e: AppError) -> ChatError {
    ChatError::Unexpected(e.to_string())
}
