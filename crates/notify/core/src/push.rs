//! Outbound push types.

use crate::MessageData;

/// A message the relay hands to the push provider.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OutboundPush {
    /// Device push token.
    pub token: String,
    pub title: String,
    pub body: String,
    /// Data part forwarded to the device.
    pub data: MessageData,
}

impl OutboundPush {
    /// Create a push that deep-links to the history screen.
    pub fn new(
        token: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            title: title.into(),
            body: body.into(),
            data: MessageData::history_route(),
        }
    }
}

/// Result of a push attempt.
#[derive(Debug, Clone)]
pub struct PushResult {
    /// Provider message ID (if successful).
    pub message_id: Option<String>,
    /// Error (if failed).
    pub error: Option<String>,
}

impl PushResult {
    /// Create a successful push result.
    pub fn success(message_id: impl Into<String>) -> Self {
        Self {
            message_id: Some(message_id.into()),
            error: None,
        }
    }

    /// Create a failed push result.
    pub fn failure(error: impl std::fmt::Display) -> Self {
        Self {
            message_id: None,
            error: Some(error.to_string()),
        }
    }

    /// Check if push was successful.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
