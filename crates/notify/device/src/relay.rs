//! Client for the send relay.

use notify_core::{
    MessageData, SEND_NOTIFICATION_PATH, SendNotificationRequest, SendNotificationResponse,
};

/// Why a send did not go through.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// Title or body was empty. Nothing was sent.
    #[error("Title and Body are required")]
    MissingField,
    /// The relay refused the send. Carries the relay's message verbatim.
    #[error("{0}")]
    Relay(String),
    /// The relay could not be reached.
    #[error("failed to reach relay: {0}")]
    Transport(#[from] reqwest::Error),
}

/// A send accepted by the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// Provider message ID returned by the relay.
    pub response: String,
}

/// Sends notifications through the relay.
#[derive(Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    send_url: String,
}

impl RelayClient {
    /// Create a client for the relay at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            send_url: format!(
                "{}{}",
                base_url.trim_end_matches('/'),
                SEND_NOTIFICATION_PATH
            ),
        }
    }

    /// Ask the relay to push `title`/`body` to the device holding `token`.
    ///
    /// No retries. History and badge are never touched by a send.
    pub async fn send(
        &self,
        token: &str,
        title: &str,
        body: &str,
    ) -> Result<SendReceipt, SendError> {
        if title.is_empty() || body.is_empty() {
            return Err(SendError::MissingField);
        }

        let request = SendNotificationRequest {
            token: token.to_owned(),
            title: title.to_owned(),
            body: body.to_owned(),
            data: Some(MessageData::history_route()),
        };

        let response = self
            .client
            .post(&self.send_url)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<SendNotificationResponse>(&text) {
            Ok(reply) if status.is_success() && reply.success => {
                tracing::info!(status = %status, "notification sent");
                Ok(SendReceipt {
                    response: reply.response.unwrap_or_default(),
                })
            }
            Ok(SendNotificationResponse {
                error: Some(error), ..
            }) => {
                tracing::warn!(status = %status, error = %error, "relay refused send");
                Err(SendError::Relay(error))
            }
            _ => {
                tracing::warn!(status = %status, "unexpected relay response");
                Err(SendError::Relay(format!("relay returned {status}")))
            }
        }
    }
}
