//! Integration tests for Nordora.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nordora-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart scenarios through the store
//! - `catalog_admin` - Stock edits and their effect on carts
//! - `persistence` - Durable storage, corrupt data and quota failures
//! - `subscribers` - Notification order, isolation and unsubscribe
//! - `auth_sessions` - Staff sign-in against a real account directory
//!
//! This library holds the fixtures shared by those tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use nordora_core::{Price, Product, ProductId};
use tempfile::TempDir;

/// A fresh data directory, removed when the returned guard drops.
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn data_dir() -> TempDir {
    tempfile::Builder::new().prefix("nordora-it-").tempdir().unwrap()
}

/// A valid product with the given id and price in cents.
///
/// # Panics
///
/// Panics if `cents` is negative.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn product(id: i32, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        image: format!("mueble-{id}.jpg"),
        name: format!("Mueble {id}"),
        dimensions: "100 x 50 x 75 cm".to_string(),
        price: Price::from_cents(cents).unwrap(),
    }
}

/// A price from whole cents.
///
/// # Panics
///
/// Panics if `cents` is negative.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn euros(cents: i64) -> Price {
    Price::from_cents(cents).unwrap()
}
