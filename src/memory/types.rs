//! Value types held by conversation stores.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{Mode, Personality};

/// Maximum turns kept per conversation: the system turn plus 14 exchanges.
pub const MAX_TURNS: usize = 15;

/// Identity a conversation is keyed by. Derived from the caller's network
/// address in production, so it is not a stable user identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    pub const FALLBACK: &'static str = "default";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// The client's last requested mode and personality.
///
/// Keys are kept exactly as the client sent them; unknown values are resolved
/// to catalog defaults only when a prompt is composed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub mode: String,
    pub personality: String,
}

impl Preference {
    pub fn new(mode: impl Into<String>, personality: impl Into<String>) -> Self {
        Self { mode: mode.into(), personality: personality.into() }
    }
}

impl Default for Preference {
    fn default() -> Self {
        Self::new(Mode::DEFAULT_KEY, Personality::DEFAULT_KEY)
    }
}

/// Ordered chat history that always starts with exactly one system turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self { turns: vec![Turn::system(system_prompt)] }
    }

    pub fn system_prompt(&self) -> &str {
        &self.turns[0].content
    }

    /// Append `turn`, then drop the oldest non-system turns beyond [`MAX_TURNS`].
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
        if self.turns.len() > MAX_TURNS {
            let excess = self.turns.len() - MAX_TURNS;
            self.turns.drain(1..=excess);
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always `false`: the system turn is never removed.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
