// src/services/ollama.rs
//! Client for the Ollama REST API: `/api/generate` and `/api/tags`.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::RelayConfig;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request to backend failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("backend returned status {0}")]
    Status(StatusCode),

    #[error("backend reply could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("backend returned an empty response")]
    EmptyResponse,
}

/// Fixed sampling parameters sent with every generate call.
#[derive(Debug, Clone, Serialize)]
pub struct SamplingOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub num_ctx: u32,
    pub num_predict: u32,
    pub top_k: u32,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            temperature: 0.6,
            top_p: 0.9,
            num_ctx: 6144,
            num_predict: 1536,
            top_k: 40,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub system: &'a str,
    pub stream: bool,
    pub options: SamplingOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Clone, Debug)]
pub struct OllamaClient {
    http: Client,
    base_url: String,
    model: String,
    generate_timeout: Duration,
    health_timeout: Duration,
}

impl OllamaClient {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.ollama_base_url.clone(),
            model: config.model.clone(),
            generate_timeout: config.generate_timeout,
            health_timeout: config.health_timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One non-streaming generate call. No retries.
    pub async fn generate(&self, prompt: &str, system: &str) -> Result<String, BackendError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
            options: SamplingOptions::default(),
        };

        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .timeout(self.generate_timeout)
            .json(&body)
            .send()
            .await
            .map_err(BackendError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }

        let reply: GenerateResponse = response.json().await.map_err(BackendError::Decode)?;
        if reply.response.is_empty() {
            return Err(BackendError::EmptyResponse);
        }

        Ok(reply.response)
    }

    /// Reachability check against the model listing endpoint.
    pub async fn status(&self) -> Result<(), BackendError> {
        let response = self
            .http
            .get(format!("{}/api/tags", self.base_url))
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(BackendError::Transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(BackendError::Status(status))
        }
    }
}
