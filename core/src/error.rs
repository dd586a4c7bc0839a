//! Error types for the blog API client.
//!
//! # Design
//! The three kinds a caller acts on are `Transport`, `NotFound` and
//! `Validation`. 5xx responses count as transport failures since nothing
//! about the request itself was wrong. Statuses the API never documents
//! land in `UnexpectedStatus` with the raw body for debugging.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed, or the server failed with a 5xx.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server returned 404 for the addressed post.
    #[error("post not found")]
    NotFound,

    /// The server rejected the payload (400/422).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A non-2xx status the API does not document.
    #[error("unexpected HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Classify a non-2xx response.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            404 => ApiError::NotFound,
            400 | 422 => ApiError::Validation(server_message(body)),
            500..=599 => ApiError::Transport(format!("HTTP {status}: {body}")),
            _ => ApiError::UnexpectedStatus {
                status,
                body: body.to_string(),
            },
        }
    }
}

/// Pull `message` out of a `{"message": ...}` error body, falling back to the
/// raw text.
fn server_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
