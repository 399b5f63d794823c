//! Firebase Cloud Messaging (HTTP v1) push implementation.

use color_eyre::eyre::WrapErr as _;
use notify_core::{MessageData, OutboundPush, PushResult};

use crate::Pusher;

/// Production FCM endpoint.
pub const FCM_ENDPOINT: &str = "https://fcm.googleapis.com";

/// FCM pusher using a bearer access token.
#[derive(Clone)]
pub struct FcmPusher {
    client: reqwest::Client,
    send_url: String,
    access_token: String,
}

impl FcmPusher {
    /// Create a pusher for a Firebase project.
    pub fn new(project_id: &str, access_token: impl Into<String>) -> Self {
        Self::with_endpoint(FCM_ENDPOINT, project_id, access_token)
    }

    /// Create a pusher against a different FCM-compatible endpoint.
    pub fn with_endpoint(endpoint: &str, project_id: &str, access_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            send_url: format!(
                "{}/v1/projects/{}/messages:send",
                endpoint.trim_end_matches('/'),
                project_id
            ),
            access_token: access_token.into(),
        }
    }

    async fn send(&self, message: &OutboundPush) -> color_eyre::eyre::Result<String> {
        let request = FcmRequest {
            message: FcmMessage {
                token: &message.token,
                notification: FcmNotification {
                    title: &message.title,
                    body: &message.body,
                },
                data: &message.data,
            },
        };

        let response = self
            .client
            .post(&self.send_url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .wrap_err("failed to reach push provider")?;

        let status = response.status();
        if status.is_success() {
            let sent: FcmResponse = response
                .json()
                .await
                .wrap_err("invalid push provider response")?;
            return Ok(sent.name);
        }

        // Surface the provider's own message when it sends one
        let text = response.text().await.unwrap_or_default();
        let error = serde_json::from_str::<FcmErrorBody>(&text)
            .map(|body| body.error.message)
            .unwrap_or_else(|_| format!("push provider returned {status}"));

        Err(color_eyre::eyre::eyre!(error))
    }
}

impl Pusher for FcmPusher {
    async fn push(&self, message: &OutboundPush) -> PushResult {
        match self.send(message).await {
            Ok(name) => {
                tracing::info!(message_id = %name, "push sent");
                PushResult::success(name)
            }
            Err(e) => {
                tracing::warn!(error = %e, "push failed");
                PushResult::failure(e)
            }
        }
    }
}

#[derive(serde::Serialize)]
struct FcmRequest<'a> {
    message: FcmMessage<'a>,
}

#[derive(serde::Serialize)]
struct FcmMessage<'a> {
    token: &'a str,
    notification: FcmNotification<'a>,
    data: &'a MessageData,
}

#[derive(serde::Serialize)]
struct FcmNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(serde::Deserialize)]
struct FcmResponse {
    name: String,
}

#[derive(serde::Deserialize)]
struct FcmErrorBody {
    error: FcmError,
}

#[derive(serde::Deserialize)]
struct FcmError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::http::{HeaderMap, StatusCode, Uri};

    async fn fake_fcm(
        uri: Uri,
        headers: HeaderMap,
        Json(body): Json<serde_json::Value>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        assert_eq!(uri.path(), "/v1/projects/demo/messages:send");

        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some("Bearer secret");
        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"error": {"code": 401, "message": "bad credentials"}})),
            );
        }

        let message = &body["message"];
        if message["token"] == "" {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": {"code": 400, "message": "The registration token is not a valid FCM registration token"}
                })),
            );
        }

        assert_eq!(message["data"]["screen"], "Notification");
        assert_eq!(message["notification"]["title"], "Hi");
        (
            StatusCode::OK,
            Json(serde_json::json!({"name": "projects/demo/messages/42"})),
        )
    }

    async fn serve_fake_fcm() -> String {
        let app = axum::Router::new().fallback(fake_fcm);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_push_success() {
        let endpoint = serve_fake_fcm().await;
        let pusher = FcmPusher::with_endpoint(&endpoint, "demo", "secret");

        let result = pusher.push(&OutboundPush::new("device-token", "Hi", "there")).await;
        assert!(result.is_success());
        assert_eq!(result.message_id.as_deref(), Some("projects/demo/messages/42"));
    }

    #[tokio::test]
    async fn test_push_surfaces_provider_error() {
        let endpoint = serve_fake_fcm().await;
        let pusher = FcmPusher::with_endpoint(&endpoint, "demo", "secret");

        let result = pusher.push(&OutboundPush::new("", "Hi", "there")).await;
        assert!(!result.is_success());
        assert_eq!(
            result.error.as_deref(),
            Some("The registration token is not a valid FCM registration token")
        );

        let pusher = FcmPusher::with_endpoint(&endpoint, "demo", "wrong");
        let result = pusher.push(&OutboundPush::new("device-token", "Hi", "there")).await;
        assert_eq!(result.error.as_deref(), Some("bad credentials"));
    }

    #[tokio::test]
    async fn test_push_unreachable_provider() {
        let pusher = FcmPusher::with_endpoint("http://127.0.0.1:9", "demo", "secret");
        let result = pusher.push(&OutboundPush::new("device-token", "Hi", "there")).await;
        assert_eq!(result.error.as_deref(), Some("failed to reach push provider"));
    }
}
