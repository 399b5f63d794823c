//! Notification history persisted under a single key.
//!
//! The stored list is in append order (oldest first). Screens show it newest
//! first, so every index that comes from a screen is a display index and has
//! to be translated before it touches storage.

use color_eyre::eyre::WrapErr as _;
use notify_core::{NotificationRecord, parse_history, serialize_history};

use crate::KeyValueStore;

/// Storage key holding the serialized history.
pub const HISTORY_KEY: &str = "notifications";

/// Translate a display index (newest first) to a storage index (oldest first).
pub fn storage_index(display_index: usize, len: usize) -> Option<usize> {
    (display_index < len).then(|| len - 1 - display_index)
}

/// Reverse a storage-ordered history into display order.
pub fn display_order(mut records: Vec<NotificationRecord>) -> Vec<NotificationRecord> {
    records.reverse();
    records
}

/// Read-modify-write access to the persisted history.
///
/// Each mutation reads the whole list, changes it, and writes it back. Two
/// mutations interleaved at their awaits can therefore overwrite each other;
/// callers that run mutations concurrently must serialize them.
pub struct HistoryStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// History under the default key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, HISTORY_KEY)
    }

    /// History under a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Load the history in storage order. Nothing persisted yet is an empty list.
    pub async fn load(&self) -> color_eyre::eyre::Result<Vec<NotificationRecord>> {
        let raw = self
            .store
            .get_item(&self.key)
            .await
            .wrap_err("failed to read history")?;

        match raw {
            Some(raw) => parse_history(&raw),
            None => Ok(Vec::new()),
        }
    }

    /// Load the history newest first.
    pub async fn load_display(&self) -> color_eyre::eyre::Result<Vec<NotificationRecord>> {
        Ok(display_order(self.load().await?))
    }

    /// Append a record and return the new history length.
    pub async fn append(&self, record: NotificationRecord) -> color_eyre::eyre::Result<usize> {
        let mut history = self.load().await?;
        history.push(record);
        self.save(&history).await?;

        Ok(history.len())
    }

    /// Remove the record at `display_index` and return the remaining history newest first.
    pub async fn delete_at(
        &self,
        display_index: usize,
    ) -> color_eyre::eyre::Result<Vec<NotificationRecord>> {
        let mut history = self.load().await?;

        let Some(index) = storage_index(display_index, history.len()) else {
            color_eyre::eyre::bail!(
                "no notification at position {} (history has {})",
                display_index,
                history.len()
            );
        };

        history.remove(index);
        self.save(&history).await?;

        Ok(display_order(history))
    }

    /// Remove every record. The key is removed rather than set to an empty list.
    pub async fn clear(&self) -> color_eyre::eyre::Result<()> {
        self.store
            .remove_item(&self.key)
            .await
            .wrap_err("failed to clear history")
    }

    async fn save(&self, history: &[NotificationRecord]) -> color_eyre::eyre::Result<()> {
        let raw = serialize_history(history)?;
        self.store
            .set_item(&self.key, &raw)
            .await
            .wrap_err("failed to write history")
    }
}
