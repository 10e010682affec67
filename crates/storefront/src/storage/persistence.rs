//! Typed JSON persistence over a [`KeyValueStorage`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::KeyValueStorage;

/// Reads and writes whole JSON values under storage keys.
///
/// Nothing here returns an error. A failed write is logged and dropped; a
/// failed or unreadable read is logged, the offending key is cleared, and the
/// caller's default comes back instead.
#[derive(Debug, Clone)]
pub struct Persistence<S> {
    storage: S,
}

impl<S: KeyValueStorage> Persistence<S> {
    /// Wrap a storage backend.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The underlying backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Serialize `value` and store it under `key`, replacing the old value.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let text = match serde_json::to_string(value) {
            Ok(text) => text,
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize value, not saved");
                return;
            }
        };

        match self.storage.set_item(key, &text) {
            Ok(()) => debug!(key, bytes = text.len(), "Saved"),
            Err(e) => warn!(key, error = %e, "Failed to save to storage"),
        }
    }

    /// Load the value under `key`, or `default` if it is missing or unusable.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.load_optional(key).unwrap_or(default)
    }

    /// Load the value under `key`.
    ///
    /// Returns `None` when the key was never written, when the backend fails,
    /// or when the stored text does not deserialize into `T`. In the last two
    /// cases the key is cleared so the next read starts clean.
    pub fn load_optional<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let text = match self.storage.get_item(key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read from storage");
                self.clear(key);
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Discarding unreadable stored value");
                self.clear(key);
                None
            }
        }
    }

    /// Remove `key`, logging any failure.
    pub fn clear(&self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            warn!(key, error = %e, "Failed to clear storage key");
        }
    }
}
