//! Store trait: the seam between request handling and conversation state.
//!
//! Implementations provide keyed get/put/delete for conversations and
//! preferences. The conversation rules (reset on prompt change, capped
//! append, clear) are provided methods built on those primitives, so a
//! backend only decides where the data lives.
//!
//! Each primitive is atomic on its own; sequences of calls are not. Two
//! requests for the same client may interleave between calls.

use crate::error::AppError;

use super::types::{ClientId, Conversation, Preference, Turn};

pub trait ConversationStore: Send + Sync {
    /// Unique type name for this store (e.g. `"tmp"`).
    fn store_type(&self) -> &str;

    // ── Conversations ─────────────────────────────────────────────────

    fn conversation(&self, client: &ClientId) -> Result<Option<Conversation>, AppError>;

    fn put_conversation(&self, client: &ClientId, conversation: Conversation) -> Result<(), AppError>;

    /// Returns `true` if a conversation existed.
    fn delete_conversation(&self, client: &ClientId) -> Result<bool, AppError>;

    // ── Preferences ───────────────────────────────────────────────────

    fn preference(&self, client: &ClientId) -> Result<Option<Preference>, AppError>;

    fn put_preference(&self, client: &ClientId, preference: Preference) -> Result<(), AppError>;

    /// Returns `true` if a preference existed.
    fn delete_preference(&self, client: &ClientId) -> Result<bool, AppError>;

    // ── Conversation rules ────────────────────────────────────────────

    /// Return the client's conversation, replacing it with a fresh one when
    /// none exists or its system turn differs from `system_prompt`.
    fn get_or_reset(&self, client: &ClientId, system_prompt: &str) -> Result<Conversation, AppError> {
        if let Some(existing) = self.conversation(client)? {
            if existing.system_prompt() == system_prompt {
                return Ok(existing);
            }
        }
        let fresh = Conversation::new(system_prompt);
        self.put_conversation(client, fresh.clone())?;
        Ok(fresh)
    }

    /// Append `turn` to the client's conversation and return the result.
    /// Fails if the client has no conversation.
    fn append_turn(&self, client: &ClientId, turn: Turn) -> Result<Conversation, AppError> {
        let mut conversation = self
            .conversation(client)?
            .ok_or_else(|| AppError::Store(format!("no conversation for client '{client}'")))?;
        conversation.push(turn);
        self.put_conversation(client, conversation.clone())?;
        Ok(conversation)
    }

    /// Remove conversation and preference. Clearing an unknown client is a no-op.
    fn clear(&self, client: &ClientId) -> Result<(), AppError> {
        self.delete_conversation(client)?;
        self.delete_preference(client)?;
        Ok(())
    }
}
