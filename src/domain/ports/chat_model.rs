//! Chat Model Port
//!
//! Defines the interface for sending a prompt to a hosted language model.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Failure talking to the language model.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("no API key configured")]
    MissingCredentials,
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode completion: {0}")]
    Decode(String),
}

/// Outbound port for a single-turn chat completion.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send one system instruction plus one user message, return the reply text.
    async fn complete(&self, system: &str, user: &str) -> Result<String, ChatError>;
}
