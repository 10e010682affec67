//! Shopping cart.
//!
//! A [`Cart`] holds at most one [`CartLine`] per product id, each with a
//! quantity of at least one. It is a plain value: the store clones it,
//! applies a change and persists the result, so nothing here touches storage.

use nordora_core::{CartLine, Price, Product, ProductId};
use serde::{Deserialize, Deserializer, Serialize};

/// Lines in a shopper's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from stored lines, restoring the cart invariants.
    ///
    /// Lines with a zero quantity are dropped and, if a product id repeats,
    /// only its first line is kept.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity > 0 && !cart.contains(line.id()) {
                cart.lines.push(line);
            }
        }
        cart
    }

    /// Add `product` with a quantity of one.
    ///
    /// The line keeps a copy of the product as it is now. Returns `false`,
    /// leaving the cart unchanged, if the product is already in the cart.
    pub fn add_item(&mut self, product: &Product) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.lines.push(CartLine::new(product.clone()));
        true
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id() != id);
        self.lines.len() < before
    }

    /// Set the quantity of the line for `id`.
    ///
    /// A quantity of zero or less removes the line. Returns whether a line
    /// for `id` existed.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        match self.lines.iter_mut().find(|line| line.id() == id) {
            Some(line) => {
                line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                true
            }
            None => false,
        }
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines, in the order they were added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Whether a line for `id` exists.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.line(id).is_some()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<CartLine>::deserialize(deserializer).map(Self::from_lines)
    }
}
