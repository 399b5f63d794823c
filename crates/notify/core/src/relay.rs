//! Relay wire types for `POST /send-notification`.

use crate::MessageData;

/// Path of the relay send endpoint.
pub const SEND_NOTIFICATION_PATH: &str = "/send-notification";

/// Send request body.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SendNotificationRequest {
    pub token: String,
    pub title: String,
    pub body: String,
    /// Accepted for compatibility; the relay always routes to history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<MessageData>,
}

/// Send response body.
///
/// `200 {success: true, response}` or `400 {success: false, error}`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SendNotificationResponse {
    pub success: bool,
    /// Provider message ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendNotificationResponse {
    /// Successful send.
    pub fn ok(response: impl Into<String>) -> Self {
        Self {
            success: true,
            response: Some(response.into()),
            error: None,
        }
    }

    /// Failed send.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            response: None,
            error: Some(error.into()),
        }
    }
}
