pub mod chatbot;
pub mod ollama;
pub mod prompt;
