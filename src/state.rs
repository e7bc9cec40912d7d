// src/state.rs
use std::sync::Arc;

use crate::config::RelayConfig;
use crate::services::ollama::OllamaClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub backend: OllamaClient,
}

impl AppState {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            backend: OllamaClient::new(config),
        }
    }
}
