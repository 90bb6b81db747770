//! Static catalog of conversation modes and personalities.
//!
//! Each mode carries its instruction template and generation parameters;
//! each personality carries an instruction fragment (empty for `neutral`).
//! Both tables are data, so adding an entry means adding one row.

use serde::Serialize;

/// Sampling parameters sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl GenerationParams {
    const fn tuned(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
            top_p: 0.9,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

// ── Modes ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    General,
    Story,
    Learning,
    Interview,
    Debate,
}

struct ModeEntry {
    mode: Mode,
    key: &'static str,
    template: &'static str,
    params: GenerationParams,
}

static MODES: [ModeEntry; 5] = [
    ModeEntry {
        mode: Mode::General,
        key: "general",
        template: "You are a helpful AI assistant. Be concise and friendly in your responses.",
        params: GenerationParams::tuned(0.7, 500),
    },
    ModeEntry {
        mode: Mode::Story,
        key: "story",
        template: "You are a creative storytelling AI. Help users create engaging stories, provide plot ideas, develop characters, and guide narrative development. Ask questions to understand what kind of story they want to create and collaborate with them.",
        params: GenerationParams::tuned(0.9, 700),
    },
    ModeEntry {
        mode: Mode::Learning,
        key: "learning",
        template: "You are an educational AI tutor. Help users learn new concepts by breaking them down into digestible parts. Use examples, analogies, and interactive questions to reinforce learning. Adapt your teaching style to the user's level.",
        params: GenerationParams::tuned(0.5, 600),
    },
    ModeEntry {
        mode: Mode::Interview,
        key: "interview",
        template: "You are an interview preparation AI. Help users practice for job interviews by asking relevant questions, providing feedback on answers, and offering tips. Ask about the position they're applying for to customize the experience.",
        params: GenerationParams::tuned(0.6, 400),
    },
    ModeEntry {
        mode: Mode::Debate,
        key: "debate",
        template: "You are a debate partner AI. Engage in structured debates on various topics. Present counterarguments, ask probing questions, and help users strengthen their reasoning skills. Always remain respectful and constructive.",
        params: GenerationParams::tuned(0.8, 500),
    },
];

impl Mode {
    pub const DEFAULT_KEY: &'static str = "general";

    fn entry(self) -> &'static ModeEntry {
        // Table rows are declared in enum order.
        &MODES[self as usize]
    }

    /// Exact, case-sensitive key lookup.
    pub fn from_key(key: &str) -> Option<Mode> {
        MODES.iter().find(|e| e.key == key).map(|e| e.mode)
    }

    /// Lookup that falls back to [`Mode::General`] for unknown keys.
    pub fn resolve(key: &str) -> Mode {
        Self::from_key(key).unwrap_or(Mode::General)
    }

    pub fn key(self) -> &'static str {
        self.entry().key
    }

    pub fn template(self) -> &'static str {
        self.entry().template
    }

    pub fn params(self) -> GenerationParams {
        self.entry().params
    }

    pub fn all() -> impl Iterator<Item = Mode> {
        MODES.iter().map(|e| e.mode)
    }

    /// Mode keys in catalog order.
    pub fn keys() -> Vec<&'static str> {
        MODES.iter().map(|e| e.key).collect()
    }
}

// ── Personalities ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Personality {
    Neutral,
    Humorous,
    Stoic,
    Friendly,
    Professional,
}

struct PersonalityEntry {
    personality: Personality,
    key: &'static str,
    fragment: &'static str,
}

static PERSONALITIES: [PersonalityEntry; 5] = [
    PersonalityEntry {
        personality: Personality::Neutral,
        key: "neutral",
        fragment: "",
    },
    PersonalityEntry {
        personality: Personality::Humorous,
        key: "humorous",
        fragment: "Add a touch of humor to your responses when appropriate. Use witty remarks, puns, and light-hearted observations while maintaining helpfulness.",
    },
    PersonalityEntry {
        personality: Personality::Stoic,
        key: "stoic",
        fragment: "Respond with stoic wisdom and philosophy. Be calm, rational, and focus on what can be controlled. Reference stoic principles when relevant and maintain a composed, thoughtful demeanor.",
    },
    PersonalityEntry {
        personality: Personality::Friendly,
        key: "friendly",
        fragment: "Be extra warm, enthusiastic, and encouraging. Use positive language, show genuine interest in the user's topics, and maintain an upbeat, supportive tone.",
    },
    PersonalityEntry {
        personality: Personality::Professional,
        key: "professional",
        fragment: "Maintain a formal, business-like tone. Be precise, structured, and professional in all interactions while remaining helpful and clear.",
    },
];

impl Personality {
    pub const DEFAULT_KEY: &'static str = "neutral";

    fn entry(self) -> &'static PersonalityEntry {
        &PERSONALITIES[self as usize]
    }

    pub fn from_key(key: &str) -> Option<Personality> {
        PERSONALITIES.iter().find(|e| e.key == key).map(|e| e.personality)
    }

    pub fn key(self) -> &'static str {
        self.entry().key
    }

    /// Instruction fragment; empty for [`Personality::Neutral`].
    pub fn fragment(self) -> &'static str {
        self.entry().fragment
    }

    pub fn all() -> impl Iterator<Item = Personality> {
        PERSONALITIES.iter().map(|e| e.personality)
    }

    pub fn keys() -> Vec<&'static str> {
        PERSONALITIES.iter().map(|e| e.key).collect()
    }
}
