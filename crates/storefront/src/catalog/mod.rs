//! Product catalog backed by device storage.
//!
//! The catalog is the authoritative product list. The first read on a device
//! with nothing stored seeds the list from [`seed::products`] and persists it,
//! so every later read (and every id computed from it) sees the same data.
//!
//! Catalog edits are made through [`crate::store::Store`]; this type only
//! loads, looks up and saves whole lists.

pub mod seed;

use std::collections::HashSet;

use nordora_core::{Product, ProductId};
use tracing::{info, warn};

use crate::storage::{KeyValueStorage, Persistence, keys};

/// Read/write access to the stored product list.
pub struct Catalog<'a, S> {
    persistence: &'a Persistence<S>,
}

impl<'a, S: KeyValueStorage> Catalog<'a, S> {
    /// Create a catalog over `persistence`.
    #[must_use]
    pub const fn new(persistence: &'a Persistence<S>) -> Self {
        Self { persistence }
    }

    /// Every product, seeding the stored list if none exists yet.
    ///
    /// A stored empty list is returned as-is; only a missing (or unreadable)
    /// list triggers seeding. A stored list that breaks the id rules is
    /// cleaned up with [`normalize`] and written back.
    #[must_use]
    pub fn all(&self) -> Vec<Product> {
        if let Some(stored) = self.persistence.load_optional::<Vec<Product>>(keys::PRODUCTS) {
            let stored_count = stored.len();
            let products = normalize(stored);
            if products.len() != stored_count {
                warn!(
                    dropped = stored_count - products.len(),
                    "Stored products had invalid or repeated ids"
                );
                self.save(&products);
            }
            info!(count = products.len(), "Loaded products from storage");
            return products;
        }

        let products = seed::products();
        info!(count = products.len(), "No stored products, seeding catalog");
        self.save(&products);
        products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn by_id(&self, id: ProductId) -> Option<Product> {
        self.all().into_iter().find(|p| p.id == id)
    }

    /// Replace the stored list with `products`.
    pub fn save(&self, products: &[Product]) {
        self.persistence.save(keys::PRODUCTS, products);
    }
}

/// Restore the catalog id rules on a stored list.
///
/// Products with a non-positive id are dropped and, if an id repeats, only
/// its first product is kept.
#[must_use]
pub fn normalize(products: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::new();
    products
        .into_iter()
        .filter(|p| p.id.as_i32() > 0 && seen.insert(p.id))
        .collect()
}

/// The id a new product appended to `products` receives.
///
/// `None` once the largest id leaves no room above it.
#[must_use]
pub fn next_id(products: &[Product]) -> Option<ProductId> {
    ProductId::next_after(products.iter().map(|p| p.id))
}
