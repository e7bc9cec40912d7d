use thiserror::Error;

use crate::message::Turn;
use crate::services::ollama::{BackendError, OllamaClient};
use crate::services::prompt::{PromptError, SYSTEM_PROMPT, build_prompt, truncate_chars};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Relay one student message (plus recent history) to the tutor model.
pub async fn generate_reply(
    client: &OllamaClient,
    message: &str,
    history: &[Turn],
) -> Result<String, GenerationError> {
    tracing::info!("Message: {}...", truncate_chars(message, 100));

    let prompt = match build_prompt(message, history) {
        Ok(prompt) => prompt,
        Err(err) => {
            tracing::error!("Error: {}", err);
            return Err(err.into());
        }
    };
    tracing::debug!(
        history_turns = history.len(),
        prompt_chars = prompt.chars().count(),
        "Sending request to Ollama"
    );

    match client.generate(&prompt, SYSTEM_PROMPT).await {
        Ok(reply) => {
            tracing::info!("Response generated ({} chars)", reply.chars().count());
            Ok(reply)
        }
        Err(err) => {
            tracing::error!("Ollama failed: {}", err);
            Err(err.into())
        }
    }
}
