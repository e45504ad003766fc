//! HTTP-facing errors.
//!
//! Every variant renders as a JSON body with an `error` field; some carry
//! extra diagnostic fields.

use crate::domain::ports::ChatError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body was not JSON; `received` echoes a truncated copy
    #[error("Invalid JSON")]
    InvalidJson { received: String },

    #[error("Missing 'message' field")]
    MissingMessage,

    #[error("Message too long")]
    MessageTooLong,

    #[error("OpenAI request failed")]
    Upstream(String),

    #[error("OpenAI request timed out")]
    UpstreamTimeout(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson { .. } | ApiError::MissingMessage | ApiError::MessageTooLong => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        if let ChatError::Timeout(_) = err {
            return ApiError::UpstreamTimeout(err.to_string());
        }
        ApiError::Upstream(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();

        let body = match self {
            ApiError::InvalidJson { received } => json!({
                "error": error,
                "received": received,
            }),
            ApiError::Upstream(detail) | ApiError::UpstreamTimeout(detail) => {
                tracing::error!("{}: {}", error, detail);
                json!({
                    "error": error,
                    "detail": detail,
                })
            }
            ApiError::MissingMessage | ApiError::MessageTooLong => json!({ "error": error }),
        };

        (status, Json(body)).into_response()
    }
}
