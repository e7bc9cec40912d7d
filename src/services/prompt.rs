// src/services/prompt.rs
use thiserror::Error;

use crate::message::{Role, Turn};

/// Number of trailing history turns carried into a prompt.
pub const HISTORY_WINDOW: usize = 4;

/// Per-turn character budget for history content.
pub const TURN_CHAR_LIMIT: usize = 300;

pub const SYSTEM_PROMPT: &str = "You are an expert Chemical Engineering tutor.

FORMATTING:
- Use LaTeX for math: $inline$ or $$display$$
- Use markdown: **bold**, lists, code blocks
- Always include units

TEACHING:
- Be clear, accurate, and concise
- Provide step-by-step explanations for complex topics
- Give numerical examples when helpful
- For simple questions, answer directly

THINKING (OPTIONAL):
- For complex multi-step problems, you MAY briefly show reasoning in <thinking> tags
- Keep thinking SHORT and focused on key steps
- For simple questions, skip thinking and answer directly

RESTRICTIONS:
- ONLY Chemical Engineering topics
- If asked other topics: \"I specialize in Chemical Engineering topics!\"

Maintain high accuracy while being efficient.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("history turn {0} has no role")]
    MissingRole(usize),

    #[error("history turn {0} has no content")]
    MissingContent(usize),
}

fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "Student",
        Role::Assistant => "Tutor",
    }
}

/// First `limit` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn render_turn(index: usize, turn: &Turn) -> Result<String, PromptError> {
    let role = turn.role.as_deref().ok_or(PromptError::MissingRole(index))?;
    let content = turn
        .content
        .as_deref()
        .ok_or(PromptError::MissingContent(index))?;

    Ok(format!(
        "{}: {}",
        speaker(Role::from_tag(role)),
        truncate_chars(content, TURN_CHAR_LIMIT)
    ))
}

/// Assemble the prompt sent to the backend for `message`.
///
/// Without history the message goes through untouched. Otherwise the last
/// [`HISTORY_WINDOW`] turns are rendered as `Speaker: text` blocks, each
/// clipped to [`TURN_CHAR_LIMIT`] characters, ahead of the new message.
/// Only turns inside the window must carry both a role and content.
pub fn build_prompt(message: &str, history: &[Turn]) -> Result<String, PromptError> {
    if history.is_empty() {
        return Ok(message.to_string());
    }

    let start = history.len().saturating_sub(HISTORY_WINDOW);
    let context = history[start..]
        .iter()
        .enumerate()
        .map(|(offset, turn)| render_turn(start + offset, turn))
        .collect::<Result<Vec<_>, _>>()?
        .join("\n\n");

    Ok(format!("Recent context:\n{}\n\nStudent: {}", context, message))
}
