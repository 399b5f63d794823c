//! Relay handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use notify_core::{OutboundPush, SendNotificationRequest, SendNotificationResponse};
use notify_push::Pusher;

/// Forward a send request to the push provider.
///
/// Any provider failure is reported as `400` with the provider's message.
pub async fn send_notification<P>(
    State(pusher): State<P>,
    Json(request): Json<SendNotificationRequest>,
) -> impl IntoResponse
where
    P: Pusher,
{
    tracing::info!(title = %request.title, token_len = request.token.len(), "send requested");

    // Every relayed push deep-links to the history screen
    let message = OutboundPush::new(request.token, request.title, request.body);
    let result = pusher.push(&message).await;

    if let Some(error) = result.error {
        tracing::error!(error = %error, "failed to send notification");
        return (
            StatusCode::BAD_REQUEST,
            Json(SendNotificationResponse::failed(error)),
        );
    }

    let message_id = result.message_id.unwrap_or_default();
    tracing::info!(message_id = %message_id, "notification sent");

    (
        StatusCode::OK,
        Json(SendNotificationResponse::ok(message_id)),
    )
}
