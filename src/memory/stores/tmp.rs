//! `tmp` store: ephemeral in-memory conversation store.
//!
//! All data lives in process memory and is discarded when the process exits.
//! Conversations and preferences are kept in separate maps keyed by client.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::AppError;
use super::super::store::ConversationStore;
use super::super::types::{ClientId, Conversation, Preference};

#[derive(Default)]
struct Maps {
    conversations: HashMap<ClientId, Conversation>,
    preferences: HashMap<ClientId, Preference>,
}

pub struct TmpStore {
    data: Mutex<Maps>,
}

impl TmpStore {
    pub fn new() -> Self {
        Self { data: Mutex::new(Maps::default()) }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Maps>, AppError> {
        self.data
            .lock()
            .map_err(|_| AppError::Store("tmp store lock poisoned".into()))
    }
}

impl Default for TmpStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationStore for TmpStore {
    fn store_type(&self) -> &str {
        "tmp"
    }

    fn conversation(&self, client: &ClientId) -> Result<Option<Conversation>, AppError> {
        Ok(self.lock()?.conversations.get(client).cloned())
    }

    fn put_conversation(&self, client: &ClientId, conversation: Conversation) -> Result<(), AppError> {
        self.lock()?.conversations.insert(client.clone(), conversation);
        Ok(())
    }

    fn delete_conversation(&self, client: &ClientId) -> Result<bool, AppError> {
        Ok(self.lock()?.conversations.remove(client).is_some())
    }

    fn preference(&self, client: &ClientId) -> Result<Option<Preference>, AppError> {
        Ok(self.lock()?.preferences.get(client).cloned())
    }

    fn put_preference(&self, client: &ClientId, preference: Preference) -> Result<(), AppError> {
        self.lock()?.preferences.insert(client.clone(), preference);
        Ok(())
    }

    fn delete_preference(&self, client: &ClientId) -> Result<bool, AppError> {
        Ok(self.lock()?.preferences.remove(client).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::types::{MAX_TURNS, Turn};

    #[test]
    fn get_or_reset_creates_then_reuses() {
        let store = TmpStore::new();
        let id = ClientId::from("10.0.0.1");

        let first = store.get_or_reset(&id, "sys-a").unwrap();
        assert_eq!(first.len(), 1);

        store.append_turn(&id, Turn::user("hello")).unwrap();
        let again = store.get_or_reset(&id, "sys-a").unwrap();
        assert_eq!(again.len(), 2);
    }

    #[test]
    fn get_or_reset_discards_history_on_prompt_change() {
        let store = TmpStore::new();
        let id = ClientId::from("10.0.0.1");

        store.get_or_reset(&id, "sys-a").unwrap();
        store.append_turn(&id, Turn::user("hello")).unwrap();
        store.append_turn(&id, Turn::assistant("hi")).unwrap();

        let reset = store.get_or_reset(&id, "sys-b").unwrap();
        assert_eq!(reset.turns(), &[Turn::system("sys-b")]);
        assert_eq!(store.conversation(&id).unwrap().unwrap().len(), 1);

        // Switching back does not restore the earlier history.
        let back = store.get_or_reset(&id, "sys-a").unwrap();
        assert_eq!(back.len(), 1);
    }

    #[test]
    fn append_truncates_to_cap() {
        let store = TmpStore::new();
        let id = ClientId::from("c");
        store.get_or_reset(&id, "sys").unwrap();
        for i in 0..30 {
            store.append_turn(&id, Turn::user(format!("u{i}"))).unwrap();
        }
        let c = store.conversation(&id).unwrap().unwrap();
        assert_eq!(c.len(), MAX_TURNS);
        assert_eq!(c.turns()[0], Turn::system("sys"));
        assert_eq!(c.turns()[1].content, "u16");
        assert_eq!(c.turns()[MAX_TURNS - 1].content, "u29");
    }

    #[test]
    fn append_without_conversation_errors() {
        let store = TmpStore::new();
        let err = store.append_turn(&ClientId::from("ghost"), Turn::user("x")).unwrap_err();
        assert!(err.to_string().contains("no conversation"));
    }

    #[test]
    fn clear_removes_both_and_is_idempotent() {
        let store = TmpStore::new();
        let id = ClientId::from("c");
        store.put_preference(&id, Preference::new("story", "stoic")).unwrap();
        store.get_or_reset(&id, "sys").unwrap();

        store.clear(&id).unwrap();
        assert!(store.conversation(&id).unwrap().is_none());
        assert!(store.preference(&id).unwrap().is_none());

        store.clear(&id).unwrap();
        store.clear(&ClientId::from("never-seen")).unwrap();
    }

    #[test]
    fn clients_are_independent() {
        let store = TmpStore::new();
        let a = ClientId::from("a");
        let b = ClientId::from("b");
        store.put_preference(&a, Preference::new("debate", "humorous")).unwrap();
        store.get_or_reset(&a, "sys").unwrap();

        assert!(store.preference(&b).unwrap().is_none());
        assert!(store.conversation(&b).unwrap().is_none());
        store.clear(&b).unwrap();
        assert!(store.preference(&a).unwrap().is_some());
    }

    #[test]
    fn delete_reports_presence() {
        let store = TmpStore::new();
        let id = ClientId::from("c");
        assert!(!store.delete_conversation(&id).unwrap());
        store.get_or_reset(&id, "sys").unwrap();
        assert!(store.delete_conversation(&id).unwrap());
    }

    #[test]
    fn store_type_is_tmp() {
        assert_eq!(TmpStore::new().store_type(), "tmp");
    }
}
