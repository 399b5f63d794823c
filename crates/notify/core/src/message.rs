//! Delivery payloads from the push transport.

use crate::{NotificationRecord, Screen};

/// A message delivered by the push transport.
///
/// Mirrors the provider payload: `{ notification: {title, body}, data: {screen?} }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RemoteMessage {
    /// Display part. Data-only messages have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationContent>,
    /// Key-value data part.
    #[serde(default)]
    pub data: MessageData,
}

/// Title and body of a delivered notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NotificationContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Data attached to a delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MessageData {
    /// Routing hint naming the screen to open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen: Option<String>,
}

impl MessageData {
    /// Data that routes to the history screen.
    pub fn history_route() -> Self {
        Self {
            screen: Some(crate::HISTORY_ROUTE.to_string()),
        }
    }
}

impl RemoteMessage {
    /// Create a message with a display part and no data.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            notification: Some(NotificationContent {
                title: title.into(),
                body: body.into(),
            }),
            data: MessageData::default(),
        }
    }

    /// Set the routing hint.
    pub fn with_screen(mut self, screen: impl Into<String>) -> Self {
        self.data.screen = Some(screen.into());
        self
    }

    /// Parse a payload from JSON.
    pub fn from_json(raw: &str) -> color_eyre::eyre::Result<Self> {
        use color_eyre::eyre::WrapErr as _;

        serde_json::from_str(raw).wrap_err("failed to parse remote message")
    }

    /// The routing hint carried in the data part.
    pub fn routing_hint(&self) -> Option<&str> {
        self.data.screen.as_deref()
    }

    /// Screen this payload deep-links to, if any.
    pub fn target_screen(&self) -> Option<Screen> {
        Screen::from_routing_hint(self.routing_hint())
    }

    /// History record for this delivery. Missing display parts become empty strings.
    pub fn to_record(&self) -> NotificationRecord {
        match &self.notification {
            Some(n) => NotificationRecord::new(n.title.clone(), n.body.clone()),
            None => NotificationRecord::new("", ""),
        }
    }
}
