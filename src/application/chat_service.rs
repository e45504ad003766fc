//! Chat Service - terminal chat use case
//!
//! Validates a raw request body and forwards the message, together with a
//! fixed system instruction, to the configured chat model.

use crate::domain::ports::ChatModel;
use crate::error::ApiError;
use std::sync::Arc;

/// Longest accepted message, counted in characters after trimming.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Longest echo of an unparsable body in the error response.
pub const MAX_ECHO_CHARS: usize = 200;

/// Instruction sent ahead of every visitor message.
pub const SYSTEM_PROMPT: &str = "You are the terminal assistant on a personal portfolio site. \
Answer questions about the owner's projects, services and skills in a concise, friendly tone. \
Keep replies short enough to read in a terminal window.";

/// Extract and validate the `message` field from a JSON request body.
///
/// Returns the trimmed message.
pub fn validate_message(body: &[u8]) -> Result<String, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|_| ApiError::InvalidJson {
        received: String::from_utf8_lossy(body)
            .chars()
            .take(MAX_ECHO_CHARS)
            .collect(),
    })?;

    let message = value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or(ApiError::MissingMessage)?;

    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ApiError::MessageTooLong);
    }

    Ok(message.to_string())
}

/// Sends visitor messages to the chat model.
pub struct ChatService {
    model: Arc<dyn ChatModel>,
    system_prompt: String,
}

impl ChatService {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            system_prompt: SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Validate `body` and return the model's reply.
    pub async fn reply(&self, body: &[u8]) -> Result<String, ApiError> {
        let message = validate_message(body)?;
        tracing::debug!("forwarding chat message ({} chars)", message.chars().count());

        let reply = self.model.complete(&self.system_prompt, &message).await?;
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ChatError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ===== Mock Implementations =====

    struct MockModel {
        reply: Result<String, fn() -> ChatError>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl MockModel {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: fn() -> ChatError) -> Self {
            Self {
                reply: Err(err),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatModel for MockModel {
        async fn complete(&self, system: &str, user: &str) -> Result<String, ChatError> {
            self.seen
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn body(message: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({ "message": message })).unwrap()
    }

    #[test]
    fn test_validate_trims_message() {
        assert_eq!(validate_message(&body("  hello  ")).unwrap(), "hello");
    }

    #[test]
    fn test_validate_invalid_json_echoes_body() {
        match validate_message(b"not json") {
            Err(ApiError::InvalidJson { received }) => assert_eq!(received, "not json"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_validate_invalid_json_echo_is_truncated() {
        let raw = "x".repeat(1_000);
        match validate_message(raw.as_bytes()) {
            Err(ApiError::InvalidJson { received }) => {
                assert_eq!(received.chars().count(), MAX_ECHO_CHARS)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_validate_missing_field() {
        assert!(matches!(
            validate_message(b"{}"),
            Err(ApiError::MissingMessage)
        ));
        assert!(matches!(
            validate_message(b"{\"message\": 42}"),
            Err(ApiError::MissingMessage)
        ));
    }

    #[test]
    fn test_validate_empty_and_whitespace() {
        assert!(matches!(validate_message(&body("")), Err(ApiError::MissingMessage)));
        assert!(matches!(
            validate_message(&body(" \t\n ")),
            Err(ApiError::MissingMessage)
        ));
    }

    #[test]
    fn test_validate_length_boundary() {
        let exact = "a".repeat(MAX_MESSAGE_CHARS);
        assert_eq!(validate_message(&body(&exact)).unwrap(), exact);

        let over = "a".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(matches!(
            validate_message(&body(&over)),
            Err(ApiError::MessageTooLong)
        ));
    }

    #[test]
    fn test_validate_counts_characters_not_bytes() {
        // 500 two-byte characters is still within the limit
        let accented = "é".repeat(MAX_MESSAGE_CHARS);
        assert!(validate_message(&body(&accented)).is_ok());
    }

    #[test]
    fn test_validate_length_measured_after_trim() {
        let padded = format!("   {}   ", "a".repeat(MAX_MESSAGE_CHARS));
        assert!(validate_message(&body(&padded)).is_ok());
    }

    #[tokio::test]
    async fn test_reply_forwards_system_and_user() {
        let model = Arc::new(MockModel::replying("hi there"));
        let service = ChatService::new(model.clone());

        let reply = service.reply(&body("hello")).await.unwrap();
        assert_eq!(reply, "hi there");

        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, SYSTEM_PROMPT);
        assert_eq!(seen[0].1, "hello");
    }

    #[tokio::test]
    async fn test_reply_with_custom_prompt() {
        let model = Arc::new(MockModel::replying("ok"));
        let service = ChatService::new(model.clone()).with_system_prompt("be brief");

        service.reply(&body("hello")).await.unwrap();
        assert_eq!(model.seen.lock().unwrap()[0].0, "be brief");
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_model() {
        let model = Arc::new(MockModel::replying("unused"));
        let service = ChatService::new(model.clone());

        assert!(service.reply(b"not json").await.is_err());
        assert!(service.reply(&body("   ")).await.is_err());
        assert!(model.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_model_failure_maps_to_upstream() {
        let model = Arc::new(MockModel::failing(|| {
            ChatError::Transport("connection refused".to_string())
        }));
        let service = ChatService::new(model);

        match service.reply(&body("hello")).await {
            Err(ApiError::Upstream(detail)) => assert!(detail.contains("connection refused")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
