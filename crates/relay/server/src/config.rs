//! Relay configuration from the environment.

use std::net::SocketAddr;

use color_eyre::eyre::WrapErr as _;

/// Relay settings.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Listen address (`RELAY_ADDR`, default `0.0.0.0:4000`).
    pub addr: SocketAddr,
    /// Firebase project (`FCM_PROJECT_ID`).
    pub fcm_project_id: String,
    /// OAuth2 access token for the FCM API (`FCM_ACCESS_TOKEN`).
    pub fcm_access_token: String,
    /// FCM endpoint (`FCM_ENDPOINT`).
    pub fcm_endpoint: String,
}

impl RelayConfig {
    pub fn from_env() -> color_eyre::eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> color_eyre::eyre::Result<Self> {
        let require = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| color_eyre::eyre::eyre!("{key} must be set"))
        };

        let addr = match lookup("RELAY_ADDR") {
            Some(addr) => addr
                .parse()
                .wrap_err_with(|| format!("invalid RELAY_ADDR {addr:?}"))?,
            None => SocketAddr::from(([0, 0, 0, 0], 4000)),
        };

        Ok(Self {
            addr,
            fcm_project_id: require("FCM_PROJECT_ID")?,
            fcm_access_token: require("FCM_ACCESS_TOKEN")?,
            fcm_endpoint: lookup("FCM_ENDPOINT")
                .unwrap_or_else(|| notify_push::FCM_ENDPOINT.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> color_eyre::eyre::Result<RelayConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RelayConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("FCM_PROJECT_ID", "demo"), ("FCM_ACCESS_TOKEN", "ya29")]).unwrap();
        assert_eq!(config.addr.port(), 4000);
        assert_eq!(config.fcm_endpoint, "https://fcm.googleapis.com");
    }

    #[test]
    fn test_missing_credentials() {
        let err = config(&[("FCM_PROJECT_ID", "demo")]).unwrap_err();
        assert_eq!(err.to_string(), "FCM_ACCESS_TOKEN must be set");
    }

    #[test]
    fn test_bad_addr() {
        let result = config(&[
            ("FCM_PROJECT_ID", "demo"),
            ("FCM_ACCESS_TOKEN", "ya29"),
            ("RELAY_ADDR", "nowhere"),
        ]);
        assert!(result.is_err());
    }
}
