//! Client error types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Message forwarded to the error callback when no response was received
pub const UNKNOWN_CONNECTION_ERROR: &str = "Unknown error connecting to the server";

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport error, no response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the credentials (HTTP 401)
    #[error("Authentication required")]
    Unauthorized,

    /// The server answered with a failure status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Response body does not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status carried by the failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is an authentication failure
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if no response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(e) if e.status().is_none())
    }
}

/// Extract a human readable message from a failed response body.
///
/// Looks for `error_message`, then `message` in a JSON body, then falls back
/// to the raw text and finally to the status reason phrase.
pub(crate) fn error_message_from_body(body: &[u8], status: u16) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        for field in ["error_message", "message"] {
            if let Some(msg) = value.get(field).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown error")
        .to_string()
}
