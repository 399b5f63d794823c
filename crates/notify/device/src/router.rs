//! Screen navigation.
//!
//! Deliveries that open the app can arrive before any screen exists, so the
//! navigator is reachable through a process-wide handle. It is installed once
//! and lives for the rest of the process.

use std::sync::{Arc, OnceLock};

use notify_core::{RemoteMessage, Screen};
use tokio::sync::watch;

/// The screen currently shown and the parameters it was opened with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    pub screen: Screen,
    pub params: Option<serde_json::Value>,
}

/// Handle to the navigation state. Clones share the same state.
#[derive(Clone)]
pub struct Navigator {
    route: Arc<watch::Sender<Route>>,
}

impl Navigator {
    /// Create a navigator on the home screen.
    pub fn new() -> Self {
        let (route, _) = watch::channel(Route::default());
        Self {
            route: Arc::new(route),
        }
    }

    /// Screen currently shown.
    pub fn current(&self) -> Screen {
        self.route.borrow().screen
    }

    /// Current route including parameters.
    pub fn route(&self) -> Route {
        self.route.borrow().clone()
    }

    /// Show `screen`.
    pub fn navigate(&self, screen: Screen, params: Option<serde_json::Value>) {
        let previous = self.route.send_replace(Route { screen, params });
        tracing::info!(from = %previous.screen, to = %screen, "navigated");
    }

    /// Follow the routing hint of an opening delivery.
    ///
    /// Returns whether the payload routed. Payloads without the history hint
    /// leave the current screen alone.
    pub fn follow(&self, message: &RemoteMessage) -> bool {
        match message.target_screen() {
            Some(screen) => {
                self.navigate(screen, None);
                true
            }
            None => {
                tracing::debug!(hint = ?message.routing_hint(), "delivery carries no route");
                false
            }
        }
    }

    /// Watch for route changes.
    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.route.subscribe()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

static NAVIGATOR: OnceLock<Navigator> = OnceLock::new();

/// Install the process-wide navigator, or return the one already installed.
pub fn install() -> Navigator {
    NAVIGATOR.get_or_init(Navigator::new).clone()
}

/// Navigate through the process-wide navigator.
///
/// Before [`install`] this does nothing.
pub fn navigate(screen: Screen, params: Option<serde_json::Value>) {
    match NAVIGATOR.get() {
        Some(navigator) => navigator.navigate(screen, params),
        None => tracing::warn!(screen = %screen, "navigation before router install ignored"),
    }
}
