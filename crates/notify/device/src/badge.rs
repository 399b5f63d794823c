//! Badge counter.

use tokio::sync::watch;

/// Total number of recorded notifications, as shown on the history affordance.
///
/// This is a cached copy of the history length, not an unread count. It is
/// only written by [`crate::Inbox`], which owns every history mutation.
pub struct BadgeCounter {
    count: watch::Sender<usize>,
}

impl BadgeCounter {
    /// Create a counter starting at `count`.
    pub fn new(count: usize) -> Self {
        let (count, _) = watch::channel(count);
        Self { count }
    }

    /// Current count.
    pub fn get(&self) -> usize {
        *self.count.borrow()
    }

    /// Overwrite the count. Consumers that went away are ignored.
    pub(crate) fn set(&self, count: usize) {
        let previous = self.count.send_replace(count);
        if previous != count {
            tracing::debug!(previous, count, "badge updated");
        }
    }

    /// Watch for count changes.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.count.subscribe()
    }

    /// Text for the history affordance.
    pub fn label(&self) -> String {
        format!("Notifications ({})", self.get())
    }
}

impl Default for BadgeCounter {
    fn default() -> Self {
        Self::new(0)
    }
}
