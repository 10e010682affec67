//! Cart line type.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// One product in a cart, with how many units were requested.
///
/// The product is a snapshot taken when the line was created. Later catalog
/// edits (price, name) do not reach lines already in a cart.
///
/// Serialized as the product's fields plus `cantidad`, the shape the cart has
/// always been stored in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Copy of the product at the time it was added.
    #[serde(flatten)]
    pub product: Product,
    /// Units requested; at least 1.
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

impl CartLine {
    /// A new line for `product` with a quantity of one.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// Id of the product on this line.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}
