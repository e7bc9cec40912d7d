// In-process stand-in for an Ollama server.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tutor_relay::config::RelayConfig;
use tutor_relay::state::AppState;

pub enum Generate {
    Reply(&'static str),
    Fail(StatusCode),
    Stall(Duration),
    NotJson,
}

#[derive(Clone, Copy)]
pub enum Tags {
    Status(StatusCode),
    Stall(Duration),
}

#[derive(Clone)]
struct MockState {
    generate: Arc<Generate>,
    tags: Tags,
    received: Arc<Mutex<Vec<Value>>>,
}

pub struct MockBackend {
    pub url: String,
    received: Arc<Mutex<Vec<Value>>>,
}

impl MockBackend {
    pub fn generate_calls(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }

    /// Relay config aimed at this backend, with short timeouts.
    pub fn config(&self) -> RelayConfig {
        RelayConfig {
            generate_timeout: Duration::from_millis(300),
            health_timeout: Duration::from_millis(300),
            ..RelayConfig::with_backend(&self.url)
        }
    }

    pub fn state(&self) -> Arc<AppState> {
        Arc::new(AppState::new(&self.config()))
    }
}

async fn generate_handler(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    state.received.lock().unwrap().push(body);

    match &*state.generate {
        Generate::Reply(text) => Json(json!({
            "model": "chemeng-tutor",
            "response": text,
            "done": true
        }))
        .into_response(),
        Generate::Fail(status) => (*status, "backend exploded").into_response(),
        Generate::Stall(delay) => {
            tokio::time::sleep(*delay).await;
            Json(json!({"response": "too late"})).into_response()
        }
        Generate::NotJson => (StatusCode::OK, "<html>oops</html>").into_response(),
    }
}

async fn tags_handler(State(state): State<MockState>) -> Response {
    match state.tags {
        Tags::Status(status) => (status, Json(json!({"models": []}))).into_response(),
        Tags::Stall(delay) => {
            tokio::time::sleep(delay).await;
            Json(json!({"models": []})).into_response()
        }
    }
}

pub async fn spawn_backend(generate: Generate, tags: StatusCode) -> MockBackend {
    spawn_backend_with_tags(generate, Tags::Status(tags)).await
}

pub async fn spawn_backend_with_tags(generate: Generate, tags: Tags) -> MockBackend {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        generate: Arc::new(generate),
        tags,
        received: received.clone(),
    };

    let app = Router::new()
        .route("/api/generate", post(generate_handler))
        .route("/api/tags", get(tags_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend {
        url: format!("http://{}", addr),
        received,
    }
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
