//! Intake of deliveries from the push transport.
//!
//! The transport hands each message over on exactly one channel:
//!
//! - **foreground**: the app is on screen. The user sees an alert and the
//!   message is recorded in the history.
//! - **opened**: the user tapped a system notification while the app was in
//!   the background. Only the routing hint is followed; nothing is recorded.
//! - **launched**: the app process was started by tapping a system
//!   notification. The routing hint is followed once at startup.

use std::sync::Arc;

use notify_core::RemoteMessage;
use notify_storage::KeyValueStore;
use tokio::sync::mpsc;

use crate::{Alerter, Inbox, Navigator};

/// A message on the channel it arrived on.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "channel", content = "message", rename_all = "lowercase")]
pub enum Delivery {
    Foreground(RemoteMessage),
    Opened(RemoteMessage),
    Launched(RemoteMessage),
}

impl Delivery {
    /// Channel name for logging.
    pub fn channel(&self) -> &'static str {
        match self {
            Self::Foreground(_) => "foreground",
            Self::Opened(_) => "opened",
            Self::Launched(_) => "launched",
        }
    }
}

/// Turns deliveries into history records, alerts and navigation.
pub struct IntakePipeline<S, A> {
    inbox: Arc<Inbox<S>>,
    navigator: Navigator,
    alerter: A,
}

impl<S, A> IntakePipeline<S, A>
where
    S: KeyValueStore,
    A: Alerter,
{
    /// Create a pipeline.
    pub fn new(inbox: Arc<Inbox<S>>, navigator: Navigator, alerter: A) -> Self {
        Self {
            inbox,
            navigator,
            alerter,
        }
    }

    /// Handle one delivery.
    pub async fn handle(&self, delivery: Delivery) {
        tracing::debug!(channel = delivery.channel(), "delivery received");

        match delivery {
            Delivery::Foreground(message) => self.on_foreground(&message).await,
            Delivery::Opened(message) => {
                self.on_opened(&message);
            }
            Delivery::Launched(message) => {
                self.on_launch(Some(&message));
            }
        }
    }

    /// Foreground delivery: alert, then record, then update the badge.
    ///
    /// A store failure is logged and swallowed. The alert has already been
    /// shown at that point and the transport needs no acknowledgement.
    pub async fn on_foreground(&self, message: &RemoteMessage) {
        let record = message.to_record();
        self.alerter.alert(&record.title, &record.body);

        match self.inbox.record(record).await {
            Ok(count) => tracing::info!(count, "notification recorded"),
            Err(e) => tracing::warn!(error = %e, "failed to record notification"),
        }
    }

    /// Background-reopen delivery: follow the routing hint only.
    ///
    /// The message is not added to the history.
    pub fn on_opened(&self, message: &RemoteMessage) -> bool {
        self.navigator.follow(message)
    }

    /// Cold-start delivery: inspect the launch payload, if the app was
    /// launched from a notification.
    pub fn on_launch(&self, message: Option<&RemoteMessage>) -> bool {
        match message {
            Some(message) => self.navigator.follow(message),
            None => false,
        }
    }

    /// Process deliveries in arrival order until the transport hangs up.
    pub async fn run(&self, mut deliveries: mpsc::Receiver<Delivery>) {
        while let Some(delivery) = deliveries.recv().await {
            self.handle(delivery).await;
        }
        tracing::debug!("delivery channel closed");
    }

    /// The inbox deliveries are recorded in.
    pub fn inbox(&self) -> &Arc<Inbox<S>> {
        &self.inbox
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use notify_core::{NotificationRecord, Screen};
    use notify_storage::{HISTORY_KEY, KeyValueStore as _, MemoryStorage};

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingAlerter {
        shown: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl Alerter for RecordingAlerter {
        fn alert(&self, title: &str, body: &str) {
            self.shown
                .lock()
                .unwrap()
                .push((title.to_owned(), body.to_owned()));
        }
    }

    async fn pipeline(
        storage: MemoryStorage,
    ) -> (IntakePipeline<MemoryStorage, RecordingAlerter>, RecordingAlerter) {
        let alerter = RecordingAlerter::default();
        let inbox = Arc::new(Inbox::open(storage).await);
        (
            IntakePipeline::new(inbox, Navigator::new(), alerter.clone()),
            alerter,
        )
    }

    #[tokio::test]
    async fn test_foreground_then_delete_scenario() {
        let storage = MemoryStorage::new();
        storage
            .set_item(HISTORY_KEY, r#"[{"title":"A","body":"a"}]"#)
            .await
            .unwrap();
        let (pipeline, alerter) = pipeline(storage).await;
        let inbox = pipeline.inbox().clone();
        assert_eq!(inbox.badge_count(), 1);

        pipeline.on_foreground(&RemoteMessage::new("B", "b")).await;

        let a = NotificationRecord::new("A", "a");
        let b = NotificationRecord::new("B", "b");
        assert_eq!(*alerter.shown.lock().unwrap(), vec![("B".to_string(), "b".to_string())]);
        assert_eq!(inbox.stored().await.unwrap(), vec![a.clone(), b.clone()]);
        assert_eq!(inbox.badge_count(), 2);
        assert_eq!(inbox.history().await.unwrap(), vec![b.clone(), a.clone()]);

        let remaining = inbox.delete_at(0).await.unwrap();
        assert_eq!(remaining, vec![a.clone()]);
        assert_eq!(inbox.stored().await.unwrap(), vec![a]);
        assert_eq!(inbox.badge_count(), 1);
    }

    #[tokio::test]
    async fn test_foreground_store_failure_still_alerts() {
        let storage = MemoryStorage::new();
        storage.set_fail_writes(true);
        let (pipeline, alerter) = pipeline(storage).await;

        pipeline.on_foreground(&RemoteMessage::new("B", "b")).await;

        assert_eq!(alerter.shown.lock().unwrap().len(), 1);
        assert_eq!(pipeline.inbox().badge_count(), 0);
        assert!(pipeline.inbox().stored().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_opened_routes_without_recording() {
        let (pipeline, alerter) = pipeline(MemoryStorage::new()).await;
        let navigator = pipeline.navigator.clone();

        pipeline
            .handle(Delivery::Opened(RemoteMessage::new("B", "b")))
            .await;
        assert_eq!(navigator.current(), Screen::Home);

        let routed = RemoteMessage::new("B", "b").with_screen("Notification");
        pipeline.handle(Delivery::Opened(routed)).await;
        assert_eq!(navigator.current(), Screen::History);

        assert!(alerter.shown.lock().unwrap().is_empty());
        assert_eq!(pipeline.inbox().badge_count(), 0);
        assert!(pipeline.inbox().stored().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cold_start_routes() {
        let (pipeline, _) = pipeline(MemoryStorage::new()).await;

        assert!(!pipeline.on_launch(None));
        assert_eq!(pipeline.navigator.current(), Screen::Home);

        let launch = RemoteMessage::from_json(r#"{"data":{"screen":"Notification"}}"#).unwrap();
        assert!(pipeline.on_launch(Some(&launch)));
        assert_eq!(pipeline.navigator.current(), Screen::History);
    }

    #[tokio::test]
    async fn test_run_processes_in_arrival_order() {
        let (pipeline, alerter) = pipeline(MemoryStorage::new()).await;
        let (tx, rx) = mpsc::channel(8);

        for title in ["1", "2", "3"] {
            tx.send(Delivery::Foreground(RemoteMessage::new(title, "")))
                .await
                .unwrap();
        }
        tx.send(Delivery::Launched(RemoteMessage::default().with_screen("Notification")))
            .await
            .unwrap();
        drop(tx);

        pipeline.run(rx).await;

        let titles: Vec<String> = pipeline
            .inbox()
            .stored()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, ["1", "2", "3"]);
        assert_eq!(alerter.shown.lock().unwrap().len(), 3);
        assert_eq!(pipeline.navigator.current(), Screen::History);
    }

    #[test]
    fn test_delivery_wire_format() {
        let delivery: Delivery = serde_json::from_str(
            r#"{"channel":"opened","message":{"data":{"screen":"Notification"}}}"#,
        )
        .unwrap();

        assert_eq!(delivery.channel(), "opened");
        assert_eq!(
            delivery,
            Delivery::Opened(RemoteMessage::default().with_screen("Notification"))
        );
    }
}
