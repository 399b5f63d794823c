//! Notification history records.

/// A received notification as kept in the history.
///
/// Records carry no identifier; their position in the history is the only
/// handle. Two records with the same content are still distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NotificationRecord {
    pub title: String,
    pub body: String,
}

impl NotificationRecord {
    /// Create a new record.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Parse a serialized history (a JSON array of records).
pub fn parse_history(raw: &str) -> color_eyre::eyre::Result<Vec<NotificationRecord>> {
    use color_eyre::eyre::WrapErr as _;

    serde_json::from_str(raw).wrap_err("stored history is not a valid record list")
}

/// Serialize a history in storage order.
pub fn serialize_history(records: &[NotificationRecord]) -> color_eyre::eyre::Result<String> {
    use color_eyre::eyre::WrapErr as _;

    serde_json::to_string(records).wrap_err("failed to serialize history")
}
