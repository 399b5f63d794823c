//! Notify HTTP Layer
//!
//! Axum handlers for the send relay.

mod handlers;

pub use handlers::*;

use axum::Router;

/// Create the relay router.
pub fn relay_router<P>(pusher: P) -> Router
where
    P: notify_push::Pusher + Clone + 'static,
{
    use axum::routing::post;
    use tower_http::trace::TraceLayer;

    Router::new()
        .route(
            notify_core::SEND_NOTIFICATION_PATH,
            post(handlers::send_notification::<P>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(pusher)
}
