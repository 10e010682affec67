//! Store state and selectors.

use nordora_core::{CartLine, Price, Product, ProductId};

use crate::cart::Cart;

/// Everything the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    pub(crate) products: Vec<Product>,
    pub(crate) cart: CartState,
}

/// Cart lines with their total.
///
/// The total is computed whenever the lines change, inside the same
/// transition, so it can never disagree with the lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    cart: Cart,
    total: Price,
}

impl CartState {
    /// Wrap `cart`, computing its total.
    #[must_use]
    pub fn new(cart: Cart) -> Self {
        let total = cart.total();
        Self { cart, total }
    }

    /// The cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of price times quantity over the lines.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }
}

impl State {
    /// Build a state from a product list and a cart.
    #[must_use]
    pub fn new(products: Vec<Product>, cart: Cart) -> Self {
        Self {
            products,
            cart: CartState::new(cart),
        }
    }

    /// The product list.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The cart slice.
    #[must_use]
    pub const fn cart(&self) -> &CartState {
        &self.cart
    }

    /// The cart lines.
    #[must_use]
    pub fn cart_lines(&self) -> &[CartLine] {
        self.cart.cart().lines()
    }

    /// The cart total.
    #[must_use]
    pub const fn cart_total(&self) -> Price {
        self.cart.total()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn cart_line_count(&self) -> usize {
        self.cart.cart().line_count()
    }

    /// Units across all cart lines.
    #[must_use]
    pub fn cart_quantity(&self) -> u64 {
        self.cart.cart().total_quantity()
    }

    /// Whether `id` has a cart line.
    #[must_use]
    pub fn is_in_cart(&self, id: ProductId) -> bool {
        self.cart.cart().contains(id)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}
