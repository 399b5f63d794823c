//! Notification history with its badge count.

use notify_core::NotificationRecord;
use notify_storage::{HistoryStore, KeyValueStore};
use tokio::sync::Mutex;

use crate::BadgeCounter;

/// The device's notification history and the badge derived from it.
///
/// All history mutations go through here. Each one runs under a single
/// writer lock, so concurrent deliveries cannot overwrite each other's
/// read-modify-write, and each one leaves the badge equal to the history
/// length.
pub struct Inbox<S> {
    history: HistoryStore<S>,
    badge: BadgeCounter,
    writer: Mutex<()>,
}

impl<S: KeyValueStore> Inbox<S> {
    /// Open the inbox, rebuilding the badge from the persisted history.
    ///
    /// An unreadable history starts the badge at zero.
    pub async fn open(store: S) -> Self {
        let history = HistoryStore::new(store);

        let count = match history.load().await {
            Ok(records) => records.len(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load history, badge starts at 0");
                0
            }
        };
        tracing::info!(count, "inbox opened");

        Self {
            history,
            badge: BadgeCounter::new(count),
            writer: Mutex::new(()),
        }
    }

    /// Append a received notification. Returns the new count.
    pub async fn record(&self, record: NotificationRecord) -> color_eyre::eyre::Result<usize> {
        let _writer = self.writer.lock().await;

        let count = self.history.append(record).await?;
        self.badge.set(count);

        Ok(count)
    }

    /// Delete the notification at `display_index` (newest first).
    ///
    /// Returns the remaining history newest first.
    pub async fn delete_at(
        &self,
        display_index: usize,
    ) -> color_eyre::eyre::Result<Vec<NotificationRecord>> {
        let _writer = self.writer.lock().await;

        let remaining = self.history.delete_at(display_index).await?;
        self.badge.set(remaining.len());
        tracing::info!(display_index, count = remaining.len(), "notification deleted");

        Ok(remaining)
    }

    /// Delete every notification.
    pub async fn clear(&self) -> color_eyre::eyre::Result<()> {
        let _writer = self.writer.lock().await;

        self.history.clear().await?;
        self.badge.set(0);
        tracing::info!("history cleared");

        Ok(())
    }

    /// History newest first, as the history screen shows it.
    ///
    /// Showing the history also resynchronizes the badge with it.
    pub async fn history(&self) -> color_eyre::eyre::Result<Vec<NotificationRecord>> {
        let _writer = self.writer.lock().await;

        let records = self.history.load_display().await?;
        self.badge.set(records.len());

        Ok(records)
    }

    /// History in storage order (oldest first).
    pub async fn stored(&self) -> color_eyre::eyre::Result<Vec<NotificationRecord>> {
        self.history.load().await
    }

    /// The badge counter.
    pub fn badge(&self) -> &BadgeCounter {
        &self.badge
    }

    /// Current badge count.
    pub fn badge_count(&self) -> usize {
        self.badge.get()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use notify_storage::{HISTORY_KEY, KeyValueStore as _, MemoryStorage};

    use super::*;

    fn rec(title: &str, body: &str) -> NotificationRecord {
        NotificationRecord::new(title, body)
    }

    #[tokio::test]
    async fn test_badge_rebuilt_from_persisted_history() {
        let storage = MemoryStorage::new();
        storage
            .set_item(HISTORY_KEY, r#"[{"title":"A","body":"a"},{"title":"B","body":"b"}]"#)
            .await
            .unwrap();

        let inbox = Inbox::open(storage).await;
        assert_eq!(inbox.badge_count(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_history_opens_at_zero() {
        let storage = MemoryStorage::new();
        storage.set_item(HISTORY_KEY, "[").await.unwrap();

        let inbox = Inbox::open(storage).await;
        assert_eq!(inbox.badge_count(), 0);
    }

    #[tokio::test]
    async fn test_badge_tracks_every_mutation() {
        let inbox = Inbox::open(MemoryStorage::new()).await;

        for (i, t) in ["A", "B", "C"].iter().enumerate() {
            inbox.record(rec(t, "")).await.unwrap();
            assert_eq!(inbox.badge_count(), i + 1);
            assert_eq!(inbox.badge_count(), inbox.stored().await.unwrap().len());
        }

        let remaining = inbox.delete_at(0).await.unwrap();
        assert_eq!(remaining, vec![rec("B", ""), rec("A", "")]);
        assert_eq!(inbox.badge_count(), 2);

        inbox.clear().await.unwrap();
        assert_eq!(inbox.badge_count(), 0);
        assert!(inbox.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_badge() {
        let storage = MemoryStorage::new();
        let inbox = Inbox::open(storage.clone()).await;
        inbox.record(rec("A", "a")).await.unwrap();

        assert!(inbox.delete_at(5).await.is_err());
        assert_eq!(inbox.badge_count(), 1);

        storage.set_fail_writes(true);
        assert!(inbox.clear().await.is_err());
        assert_eq!(inbox.badge_count(), 1);
        assert_eq!(inbox.stored().await.unwrap(), vec![rec("A", "a")]);
    }

    #[tokio::test]
    async fn test_concurrent_records_are_not_lost() {
        let inbox = Arc::new(Inbox::open(MemoryStorage::new()).await);

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..20 {
            let inbox = inbox.clone();
            tasks.spawn(async move { inbox.record(rec(&i.to_string(), "")).await });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }

        assert_eq!(inbox.stored().await.unwrap().len(), 20);
        assert_eq!(inbox.badge_count(), 20);
    }
}
