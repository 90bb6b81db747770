//! System-prompt composition.
//!
//! The prompt is the mode template, followed by a `Personality:` paragraph
//! when the personality contributes a fragment. Unknown keys degrade to the
//! `general` template and an empty fragment.

use crate::catalog::{Mode, Personality};

const SEPARATOR: &str = "\n\n";

/// Compose the system prompt for raw `mode` / `personality` keys.
pub fn compose(mode: &str, personality: &str) -> String {
    let template = Mode::resolve(mode).template();
    let fragment = Personality::from_key(personality)
        .map(Personality::fragment)
        .unwrap_or("");

    if fragment.is_empty() {
        template.to_string()
    } else {
        format!("{template}{SEPARATOR}Personality: {fragment}")
    }
}
