//! Transport response structures

use serde::{Deserialize, Serialize};

/// Standard failure body returned by every authentication endpoint
///
/// The `error` field carries a stable machine code for client handling;
/// `message` is the human-readable text. `attempts_left` and `locked` are
/// only present on credential failures where the lockout counter moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,

    /// Stable error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Login attempts remaining before lockout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts_left: Option<u32>,

    /// Whether this failure engaged the account lock
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
            attempts_left: None,
            locked: None,
        }
    }

    /// Attach the remaining-attempts counter
    pub fn with_attempts_left(mut self, attempts_left: u32) -> Self {
        self.attempts_left = Some(attempts_left);
        self
    }

    /// Mark the response as having engaged the account lock
    pub fn with_locked(mut self) -> Self {
        self.locked = Some(true);
        self
    }
}
