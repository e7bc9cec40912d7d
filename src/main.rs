use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tutor_relay::{config::RelayConfig, routes, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tutor_relay=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RelayConfig::from_env().context("failed to load relay configuration")?;
    let state = Arc::new(AppState::new(&config));

    let app = routes::create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("Chemical Engineering tutor relay");
    tracing::info!("Model: {}", config.model);
    tracing::info!("Backend: {}", config.ollama_base_url);
    tracing::info!("Server: http://{}", config.bind_addr);
    tracing::info!("  POST /api/chat - Ask the tutor");
    tracing::info!("  GET  /health   - Backend status");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
