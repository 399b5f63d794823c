//! Storage traits.

/// Durable string key-value storage.
///
/// An absent key and a key that was removed are indistinguishable.
#[trait_variant::make(Send)]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get_item(&self, key: &str) -> color_eyre::eyre::Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> color_eyre::eyre::Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove_item(&self, key: &str) -> color_eyre::eyre::Result<()>;
}
