//! Actions accepted by the store.

use nordora_core::{Product, ProductDraft, ProductId};

/// A request to change store state.
///
/// Every interaction the presentation layer can raise maps to exactly one
/// variant, each with a fixed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A product was selected for the cart.
    AddToCart(ProductId),
    /// Removal of a cart line was requested.
    RemoveFromCart(ProductId),
    /// A new quantity was entered for a cart line. Zero or less removes it.
    SetQuantity {
        /// Product whose line changes.
        id: ProductId,
        /// Requested quantity.
        quantity: i64,
    },
    /// The whole cart should be emptied.
    ClearCart,
    /// The stock form submitted a new product.
    AddProduct {
        /// Submitted fields.
        draft: ProductDraft,
        /// Explicit id; the next free id is used when absent.
        id: Option<ProductId>,
    },
    /// The stock form saved changes to an existing product.
    UpdateProduct(Product),
    /// A product was deleted from stock.
    DeleteProduct(ProductId),
    /// The product list was (re)read from storage.
    ProductsLoaded(Vec<Product>),
}

impl Action {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddToCart(_) => "cart/add",
            Self::RemoveFromCart(_) => "cart/remove",
            Self::SetQuantity { .. } => "cart/set_quantity",
            Self::ClearCart => "cart/clear",
            Self::AddProduct { .. } => "products/add",
            Self::UpdateProduct(_) => "products/update",
            Self::DeleteProduct(_) => "products/delete",
            Self::ProductsLoaded(_) => "products/loaded",
        }
    }
}
