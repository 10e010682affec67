//! Pure state transitions.
//!
//! [`reduce`] never touches storage or subscribers. It builds a new state
//! from the previous one and the action, or explains why it refused.

use nordora_core::{Product, ProductId};

use super::action::Action;
use super::notice::Rejection;
use super::state::{CartState, State};
use crate::cart::Cart;
use crate::catalog;

/// What an applied action changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Cart lines changed.
    Cart,
    /// A product was appended to the catalog.
    ProductAdded(ProductId),
    /// A catalog product was replaced.
    ProductUpdated(ProductId),
    /// A product was removed from the catalog.
    ProductDeleted(ProductId),
    /// The catalog was replaced wholesale.
    ProductsLoaded,
}

impl Change {
    /// Whether the product list must be persisted.
    #[must_use]
    pub const fn touches_products(self) -> bool {
        !self.touches_cart()
    }

    /// Whether the cart lines must be persisted.
    #[must_use]
    pub const fn touches_cart(self) -> bool {
        matches!(self, Self::Cart)
    }
}

/// Result of a successful [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The state after the action.
    pub state: State,
    /// Which part of the state changed.
    pub change: Change,
}

/// Compute the state that follows `action`.
///
/// Catalog edits only change the product list; cart lines keep the product
/// snapshot they were created with.
///
/// # Errors
///
/// Returns a [`Rejection`] when the action cannot apply; `state` is then
/// the current state unchanged.
pub fn reduce(state: &State, action: &Action) -> Result<Transition, Rejection> {
    match action {
        Action::AddToCart(id) => {
            let product = state
                .product_by_id(*id)
                .ok_or(Rejection::ProductNotFound(*id))?;
            let mut cart = state.cart.cart().clone();
            if !cart.add_item(product) {
                return Err(Rejection::AlreadyInCart(*id));
            }
            Ok(with_cart(state, cart))
        }

        Action::RemoveFromCart(id) => {
            let mut cart = state.cart.cart().clone();
            if !cart.remove_item(*id) {
                return Err(Rejection::NotInCart(*id));
            }
            Ok(with_cart(state, cart))
        }

        Action::SetQuantity { id, quantity } => {
            let mut cart = state.cart.cart().clone();
            if !cart.set_quantity(*id, *quantity) {
                return Err(Rejection::NotInCart(*id));
            }
            Ok(with_cart(state, cart))
        }

        Action::ClearCart => {
            let mut cart = state.cart.cart().clone();
            cart.clear();
            Ok(with_cart(state, cart))
        }

        Action::AddProduct { draft, id } => {
            draft.validate()?;
            let id = match id {
                Some(id) if state.product_by_id(*id).is_some() => {
                    return Err(Rejection::DuplicateProductId(*id));
                }
                Some(id) => *id,
                None => catalog::next_id(&state.products).ok_or(Rejection::IdSpaceExhausted)?,
            };
            let product = draft.clone().with_id(id);
            product.validate()?;

            let mut products = state.products.clone();
            products.push(product);
            Ok(with_products(state, products, Change::ProductAdded(id)))
        }

        Action::UpdateProduct(product) => {
            product.validate()?;
            let mut products = state.products.clone();
            let slot = products
                .iter_mut()
                .find(|p| p.id == product.id)
                .ok_or(Rejection::ProductNotFound(product.id))?;
            *slot = product.clone();
            Ok(with_products(
                state,
                products,
                Change::ProductUpdated(product.id),
            ))
        }

        Action::DeleteProduct(id) => {
            if state.product_by_id(*id).is_none() {
                return Err(Rejection::ProductNotFound(*id));
            }
            let mut products = state.products.clone();
            products.retain(|p| p.id != *id);
            Ok(with_products(state, products, Change::ProductDeleted(*id)))
        }

        Action::ProductsLoaded(products) => Ok(with_products(
            state,
            products.clone(),
            Change::ProductsLoaded,
        )),
    }
}

fn with_cart(state: &State, cart: Cart) -> Transition {
    Transition {
        state: State {
            products: state.products.clone(),
            cart: CartState::new(cart),
        },
        change: Change::Cart,
    }
}

fn with_products(state: &State, products: Vec<Product>, change: Change) -> Transition {
    Transition {
        state: State {
            products,
            cart: state.cart.clone(),
        },
        change,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nordora_core::{Price, ProductDraft};

    use super::*;

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            image: format!("p{id}.jpg"),
            name: format!("Product {id}"),
            dimensions: "10 x 10 cm".to_string(),
            price: Price::from_cents(cents).unwrap(),
        }
    }

    fn state() -> State {
        State::new(vec![product(5, 2000), product(7, 3000)], Cart::new())
    }

    fn apply(state: &State, action: Action) -> State {
        reduce(state, &action).unwrap().state
    }

    // =========================================================================
    // Cart actions
    // =========================================================================

    #[test]
    fn test_add_to_cart_recomputes_total() {
        let next = apply(&state(), Action::AddToCart(ProductId::new(5)));
        assert_eq!(next.cart_line_count(), 1);
        assert_eq!(next.cart_total(), Price::from_cents(2000).unwrap());
    }

    #[test]
    fn test_add_unknown_product_rejected() {
        let err = reduce(&state(), &Action::AddToCart(ProductId::new(99))).unwrap_err();
        assert_eq!(err, Rejection::ProductNotFound(ProductId::new(99)));
    }

    #[test]
    fn test_add_twice_rejected() {
        let once = apply(&state(), Action::AddToCart(ProductId::new(5)));
        let err = reduce(&once, &Action::AddToCart(ProductId::new(5))).unwrap_err();
        assert_eq!(err, Rejection::AlreadyInCart(ProductId::new(5)));
    }

    #[test]
    fn test_reduce_does_not_mutate_input() {
        let before = state();
        let snapshot = before.clone();
        let _ = reduce(&before, &Action::AddToCart(ProductId::new(5)));
        assert_eq!(before, snapshot);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let added = apply(&state(), Action::AddToCart(ProductId::new(5)));
        let next = apply(
            &added,
            Action::SetQuantity {
                id: ProductId::new(5),
                quantity: 0,
            },
        );
        assert_eq!(next.cart_line_count(), 0);
        assert_eq!(next.cart_total(), Price::ZERO);
    }

    #[test]
    fn test_set_quantity_missing_line_rejected() {
        let err = reduce(
            &state(),
            &Action::SetQuantity {
                id: ProductId::new(5),
                quantity: 2,
            },
        )
        .unwrap_err();
        assert_eq!(err, Rejection::NotInCart(ProductId::new(5)));
    }

    #[test]
    fn test_remove_missing_line_rejected() {
        let err = reduce(&state(), &Action::RemoveFromCart(ProductId::new(5))).unwrap_err();
        assert_eq!(err, Rejection::NotInCart(ProductId::new(5)));
    }

    #[test]
    fn test_clear_cart() {
        let added = apply(&state(), Action::AddToCart(ProductId::new(7)));
        let transition = reduce(&added, &Action::ClearCart).unwrap();
        assert_eq!(transition.change, Change::Cart);
        assert_eq!(transition.state.cart_line_count(), 0);
        assert_eq!(transition.state.cart_total(), Price::ZERO);
    }

    // =========================================================================
    // Catalog actions
    // =========================================================================

    #[test]
    fn test_add_product_assigns_next_id() {
        let draft = ProductDraft::new("mesa.jpg", "Mesa", "90 cm", Price::from_cents(5000).unwrap());
        let transition = reduce(&state(), &Action::AddProduct { draft, id: None }).unwrap();
        assert_eq!(transition.change, Change::ProductAdded(ProductId::new(8)));
        assert!(transition.state.product_by_id(ProductId::new(8)).is_some());
    }

    #[test]
    fn test_add_product_with_taken_id_rejected() {
        let draft = ProductDraft::new("mesa.jpg", "Mesa", "90 cm", Price::from_cents(5000).unwrap());
        let err = reduce(
            &state(),
            &Action::AddProduct {
                draft,
                id: Some(ProductId::new(7)),
            },
        )
        .unwrap_err();
        assert_eq!(err, Rejection::DuplicateProductId(ProductId::new(7)));
    }

    #[test]
    fn test_add_product_after_max_id_rejected() {
        let full = State::new(vec![product(i32::MAX, 2000)], Cart::new());
        let draft = ProductDraft::new("mesa.jpg", "Mesa", "90 cm", Price::from_cents(5000).unwrap());
        let err = reduce(&full, &Action::AddProduct { draft, id: None }).unwrap_err();
        assert_eq!(err, Rejection::IdSpaceExhausted);
    }

    #[test]
    fn test_add_invalid_product_rejected_before_change() {
        let draft = ProductDraft::new("", "", "", Price::ZERO);
        let err = reduce(&state(), &Action::AddProduct { draft, id: None }).unwrap_err();
        assert!(matches!(err, Rejection::Invalid(ref e) if e.messages().len() == 4));
    }

    #[test]
    fn test_update_product_leaves_cart_snapshot() {
        let added = apply(&state(), Action::AddToCart(ProductId::new(5)));
        let mut changed = product(5, 9900);
        changed.name = "New name".to_string();

        let next = apply(&added, Action::UpdateProduct(changed));
        assert_eq!(
            next.product_by_id(ProductId::new(5)).unwrap().price,
            Price::from_cents(9900).unwrap()
        );
        assert_eq!(next.cart_lines()[0].product.name, "Product 5");
        assert_eq!(next.cart_total(), Price::from_cents(2000).unwrap());
    }

    #[test]
    fn test_update_unknown_product_rejected() {
        let err = reduce(&state(), &Action::UpdateProduct(product(50, 100))).unwrap_err();
        assert_eq!(err, Rejection::ProductNotFound(ProductId::new(50)));
    }

    #[test]
    fn test_delete_product() {
        let transition = reduce(&state(), &Action::DeleteProduct(ProductId::new(7))).unwrap();
        assert_eq!(transition.state.products().len(), 1);
        assert!(transition.change.touches_products());
        assert!(!transition.change.touches_cart());
    }
}
