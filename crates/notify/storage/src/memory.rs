//! In-memory storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::traits::*;

/// Process-local storage, shared between clones.
///
/// Writes can be made to fail on demand so callers can exercise their
/// store-failure paths.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set_item`/`remove_item` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        match self.items() {
            Ok(items) => items.contains_key(key),
            Err(e) => {
                tracing::warn!(key, error = %e, "cannot inspect storage");
                false
            }
        }
    }

    fn check_writable(&self) -> color_eyre::eyre::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            color_eyre::eyre::bail!("storage is read-only");
        }
        Ok(())
    }

    fn items(&self) -> color_eyre::eyre::Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| color_eyre::eyre::eyre!("storage lock poisoned"))
    }
}

impl KeyValueStore for MemoryStorage {
    async fn get_item(&self, key: &str) -> color_eyre::eyre::Result<Option<String>> {
        Ok(self.items()?.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> color_eyre::eyre::Result<()> {
        self.check_writable()?;
        self.items()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> color_eyre::eyre::Result<()> {
        self.check_writable()?;
        self.items()?.remove(key);
        Ok(())
    }
}
