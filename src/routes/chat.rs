use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, HealthResponse},
    services::{chatbot::generate_reply, ollama::BackendError},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload?;

    let trimmed = payload.message.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Empty message".to_string()));
    }

    let response = generate_reply(&state.backend, trimmed, &payload.history).await?;

    Ok(Json(ChatResponse {
        response,
        model: state.backend.model().to_string(),
    }))
}

pub async fn health_handler(
    State(state): State<SharedState>,
) -> (StatusCode, Json<HealthResponse>) {
    match state.backend.status().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse::healthy(state.backend.model())),
        ),
        Err(BackendError::Status(status)) => {
            tracing::warn!("Ollama status check returned {}", status);
            (StatusCode::SERVICE_UNAVAILABLE, Json(HealthResponse::unhealthy()))
        }
        Err(err) => {
            tracing::warn!("Ollama unreachable: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::error(err.to_string())),
            )
        }
    }
}
