//! On-device keyed text storage.
//!
//! The storefront keeps all of its data in a small key/value area, the way a
//! browser keeps `localStorage`. [`KeyValueStorage`] is the raw text boundary;
//! [`Persistence`] layers typed JSON on top and absorbs every failure so the
//! rest of the crate never has to handle a storage error.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - shared in-process map with an optional byte quota
//! - [`FileStorage`] - one file per key inside a data directory

mod file;
mod memory;
mod persistence;

use std::fmt;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use persistence::Persistence;

/// Storage keys used by the storefront.
pub mod keys {
    /// Key for the product catalog.
    pub const PRODUCTS: &str = "muebles_key";

    /// Key for the shopping cart lines.
    pub const CART: &str = "carrito_key";

    /// Key for the signed-in staff session.
    pub const SESSION: &str = "nordora_user_session";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the value would exceed the backend's capacity.
    #[error("storage quota exceeded writing {key}: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Total bytes the area would hold after the write.
        needed: usize,
        /// Configured capacity in bytes.
        quota: usize,
    },

    /// The key cannot be represented by this backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// The backend cannot be used at all (disabled, poisoned, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Underlying filesystem error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A keyed text store.
///
/// All methods take `&self`; backends use interior mutability so handles can
/// be shared between the store and the auth service.
pub trait KeyValueStorage: fmt::Debug {
    /// Read the text stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is refused or fails.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Succeeds if the key did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
