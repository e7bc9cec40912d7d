// src/config.rs
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL_NAME: &str = "chemeng-tutor";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5001";
pub const DEFAULT_GENERATE_TIMEOUT_SECS: u64 = 150;
pub const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 5;

/// Settings for the relay and the Ollama backend it forwards to.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub ollama_base_url: String,
    pub model: String,
    pub bind_addr: SocketAddr,
    pub generate_timeout: Duration,
    pub health_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            ollama_base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            model: DEFAULT_MODEL_NAME.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5001)),
            generate_timeout: Duration::from_secs(DEFAULT_GENERATE_TIMEOUT_SECS),
            health_timeout: Duration::from_secs(DEFAULT_HEALTH_TIMEOUT_SECS),
        }
    }
}

impl RelayConfig {
    /// Defaults, overridden by the environment (and a `.env` file if one exists).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, overridden by whatever `get` returns for each setting key.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = read_var(&get, "OLLAMA_BASE_URL") {
            config.ollama_base_url = url;
        }
        if let Some(model) = read_var(&get, "TUTOR_MODEL") {
            config.model = model;
        }
        if let Some(addr) = parse_var::<SocketAddr>(&get, "RELAY_BIND_ADDR")? {
            config.bind_addr = addr;
        }
        if let Some(secs) = parse_var::<u64>(&get, "RELAY_GENERATE_TIMEOUT_SECS")? {
            config.generate_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&get, "RELAY_HEALTH_TIMEOUT_SECS")? {
            config.health_timeout = Duration::from_secs(secs);
        }

        Ok(config.normalized())
    }

    /// Point the relay at another backend, keeping the other defaults.
    pub fn with_backend(base_url: impl Into<String>) -> Self {
        Self {
            ollama_base_url: base_url.into(),
            ..Default::default()
        }
        .normalized()
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.ollama_base_url.trim_end_matches('/').len();
        self.ollama_base_url.truncate(trimmed);
        self
    }
}

fn read_var(get: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    read_var(get, key)
        .map(|raw| {
            raw.parse::<T>()
                .with_context(|| format!("invalid value for {key}: {raw:?}"))
        })
        .transpose()
}
