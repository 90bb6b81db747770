//! Per-client conversation state.
//!
//! - **types**: turns, conversations, preferences, client identity.
//! - **store**: [`ConversationStore`] trait and the conversation rules.
//! - **stores**: backends (`tmp`: in-process, lost on restart).

pub mod store;
pub mod stores;
pub mod types;

pub use store::ConversationStore;
pub use types::{ClientId, Conversation, MAX_TURNS, Preference, Role, Turn};
