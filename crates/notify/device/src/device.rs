//! The device: everything the two screens talk to.

use std::sync::Arc;

use notify_core::{NotificationRecord, RemoteMessage, Screen};
use notify_push::{TokenRegistry, TokenSource};
use notify_storage::KeyValueStore;

use crate::{
    Alerter, Inbox, IntakePipeline, Navigator, RelayClient, SendError, SendReceipt, router,
};

/// A started device.
pub struct Device<S, T> {
    inbox: Arc<Inbox<S>>,
    navigator: Navigator,
    tokens: TokenRegistry<T>,
    relay: RelayClient,
}

impl<S, T> Device<S, T>
where
    S: KeyValueStore,
    T: TokenSource,
{
    /// Start the device on the process-wide navigator.
    ///
    /// `launch` is the payload of the notification that launched the process,
    /// if any.
    pub async fn start(
        store: S,
        tokens: T,
        relay: RelayClient,
        launch: Option<&RemoteMessage>,
    ) -> Self {
        Self::start_with(router::install(), store, tokens, relay, launch).await
    }

    /// Start the device on a given navigator.
    pub async fn start_with(
        navigator: Navigator,
        store: S,
        tokens: T,
        relay: RelayClient,
        launch: Option<&RemoteMessage>,
    ) -> Self {
        let inbox = Arc::new(Inbox::open(store).await);

        // Cold start: no screen has subscribed yet, so route before anything else
        let routed = launch.is_some_and(|message| navigator.follow(message));
        if routed {
            tracing::info!("launched into history from notification");
        }

        let tokens = TokenRegistry::new(tokens);
        let token = tokens.current_token().await;
        tracing::info!(has_token = !token.is_empty(), "device started");

        Self {
            inbox,
            navigator,
            tokens,
            relay,
        }
    }

    /// Pipeline for deliveries from the push transport.
    pub fn intake<A: Alerter>(&self, alerter: A) -> IntakePipeline<S, A> {
        IntakePipeline::new(self.inbox.clone(), self.navigator.clone(), alerter)
    }

    /// Send form: push `title`/`body` to this device through the relay.
    pub async fn send(&self, title: &str, body: &str) -> Result<SendReceipt, SendError> {
        let token = self.tokens.cached().await;
        self.relay.send(&token, title, body).await
    }

    /// Adopt a token the transport rotated; later sends use it.
    pub async fn refresh_token(&self, token: impl Into<String>) {
        self.tokens.refresh(token).await;
    }

    /// Badge affordance: open the history screen.
    pub fn open_history(&self) {
        self.navigator.navigate(Screen::History, None);
    }

    /// History screen contents, newest first.
    pub async fn history(&self) -> color_eyre::eyre::Result<Vec<NotificationRecord>> {
        self.inbox.history().await
    }

    /// History screen: delete the card at `display_index`.
    pub async fn delete(
        &self,
        display_index: usize,
    ) -> color_eyre::eyre::Result<Vec<NotificationRecord>> {
        self.inbox.delete_at(display_index).await
    }

    /// History screen: clear all.
    pub async fn clear(&self) -> color_eyre::eyre::Result<()> {
        self.inbox.clear().await
    }

    /// The device's inbox.
    pub fn inbox(&self) -> &Arc<Inbox<S>> {
        &self.inbox
    }

    /// The device's navigator.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// The device's push-token registry.
    pub fn tokens(&self) -> &TokenRegistry<T> {
        &self.tokens
    }
}
