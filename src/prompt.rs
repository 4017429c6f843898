//! Prompt assembly

use serde::Serialize;

use crate::consts::MAX_CONTENT_CHARS;

/// Label line preceding file content in the user message
pub(crate) const CONTENT_LABEL: &str = "File content (truncated):";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Role {
    System,
    User,
}

impl Role {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct PromptMessage {
    pub(crate) role: Role,
    pub(crate) content: String,
}

/// The two-message prompt plus how much content made it in
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Prompt {
    pub(crate) messages: [PromptMessage; 2],
    /// Length of the truncated content, in characters
    pub(crate) content_chars: usize,
}

/// First `max` characters of `s`, cut on a char boundary
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

pub(crate) fn assemble(system_persona: &str, conventions: &str, content: &str) -> Prompt {
    let truncated = truncate_chars(content, MAX_CONTENT_CHARS);
    let content_chars = truncated.chars().count();

    let system_text = format!("{}\n\n{}", system_persona.trim(), conventions.trim());
    let user_text = format!("{CONTENT_LABEL}\n{}", truncated.trim());

    Prompt {
        messages: [
            PromptMessage {
                role: Role::System,
                content: system_text,
            },
            PromptMessage {
                role: Role::User,
                content: user_text,
            },
        ],
        content_chars,
    }
}
