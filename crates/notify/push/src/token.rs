//! Device push-token registry.

use tokio::sync::RwLock;

use crate::TokenSource;

/// Holds the device's current push token.
///
/// The token lives only in memory; it is fetched again on every cold start.
pub struct TokenRegistry<T> {
    source: T,
    current: RwLock<String>,
}

impl<T: TokenSource> TokenRegistry<T> {
    /// Create a registry with no token yet.
    pub fn new(source: T) -> Self {
        Self {
            source,
            current: RwLock::new(String::new()),
        }
    }

    /// Request delivery permission and resolve the current token.
    ///
    /// A denied permission or a transport failure resolves to an empty token;
    /// sends made with it fail at the relay.
    pub async fn current_token(&self) -> String {
        let token = if self.source.request_permission().await {
            match self.source.token().await {
                Ok(token) => token,
                Err(e) => {
                    tracing::warn!(error = %e, "push token unavailable");
                    String::new()
                }
            }
        } else {
            tracing::warn!("notification permission denied");
            String::new()
        };

        *self.current.write().await = token.clone();
        token
    }

    /// Replace the token after the transport rotated it.
    pub async fn refresh(&self, token: impl Into<String>) {
        let token = token.into();
        tracing::info!(len = token.len(), "push token refreshed");
        *self.current.write().await = token;
    }

    /// Last resolved token without asking the platform again.
    pub async fn cached(&self) -> String {
        self.current.read().await.clone()
    }
}

/// Token source with a preconfigured token and permission answer.
#[derive(Debug, Clone)]
pub struct FixedTokenSource {
    token: Option<String>,
    permitted: bool,
}

impl FixedTokenSource {
    /// Permission granted, `token` issued.
    pub fn granted(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            permitted: true,
        }
    }

    /// Permission denied.
    pub fn denied() -> Self {
        Self {
            token: None,
            permitted: false,
        }
    }

    /// Permission granted but the transport never issues a token.
    pub fn unavailable() -> Self {
        Self {
            token: None,
            permitted: true,
        }
    }
}

impl TokenSource for FixedTokenSource {
    async fn request_permission(&self) -> bool {
        self.permitted
    }

    async fn token(&self) -> color_eyre::eyre::Result<String> {
        self.token
            .clone()
            .ok_or_else(|| color_eyre::eyre::eyre!("no push token issued"))
    }
}
