//! Device configuration from the environment.

/// Default relay address.
pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:4000";

/// Default history database.
pub const DEFAULT_DATABASE_URL: &str = "notify-device.db";

/// Device settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Base URL of the send relay (`RELAY_URL`).
    pub relay_url: String,
    /// SQLite database holding the history (`DATABASE_URL`).
    pub database_url: String,
    /// Push token issued to this device (`DEVICE_TOKEN`). Unset means the
    /// transport never issued one.
    pub device_token: Option<String>,
}

impl DeviceConfig {
    /// Read settings from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            relay_url: lookup("RELAY_URL").unwrap_or_else(|| DEFAULT_RELAY_URL.to_string()),
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            device_token: lookup("DEVICE_TOKEN").filter(|token| !token.is_empty()),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
