//! Push traits.

use notify_core::{OutboundPush, PushResult};

/// Low-level push notification sender.
#[trait_variant::make(Send)]
pub trait Pusher: Send + Sync {
    /// Push a notification to one device.
    async fn push(&self, message: &OutboundPush) -> PushResult;
}

/// Platform side of push-token issuance.
#[trait_variant::make(Send)]
pub trait TokenSource: Send + Sync {
    /// Ask the platform for permission to deliver notifications.
    async fn request_permission(&self) -> bool;

    /// Issue (or return the cached) push token.
    async fn token(&self) -> color_eyre::eyre::Result<String>;
}
