//! AI engine for relay.
//!
//! Provides a Gemini API client and conversation sessions:
//! - Multi-turn chat with message history
//! - Token usage accounting
//! - A provider seam (`AiClient`) so callers can mock the backend

pub mod gemini;
pub mod session;

use async_trait::async_trait;

pub use gemini::{GeminiClient, GeminiConfig};
pub use session::Session;

#[async_trait]
pub trait AiClient: Send + Sync {
    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError>;
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone)]
pub struct AiResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
}
