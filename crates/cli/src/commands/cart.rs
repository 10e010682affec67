//! Cart commands.

use std::io;

use nordora_core::ProductId;
use nordora_storefront::storage::KeyValueStorage;
use nordora_storefront::store::{Action, Store};

use super::views::CartTable;
use super::{CliError, settle};

/// Draw the cart and its total.
pub fn show<S: KeyValueStorage>(store: &mut Store<S>) {
    store.attach_cart_view(CartTable::new(io::stdout()));
}

/// Add a product with quantity one.
pub fn add<S: KeyValueStorage>(store: &mut Store<S>, id: ProductId) -> Result<(), CliError> {
    settle(store.dispatch(Action::AddToCart(id)))?;
    Ok(())
}

/// Remove a product's line.
pub fn remove<S: KeyValueStorage>(store: &mut Store<S>, id: ProductId) -> Result<(), CliError> {
    settle(store.dispatch(Action::RemoveFromCart(id)))?;
    Ok(())
}

/// Set a line's quantity; zero or less removes it.
pub fn set_quantity<S: KeyValueStorage>(
    store: &mut Store<S>,
    id: ProductId,
    quantity: i64,
) -> Result<(), CliError> {
    settle(store.dispatch(Action::SetQuantity { id, quantity }))?;
    Ok(())
}

/// Empty the cart.
pub fn clear<S: KeyValueStorage>(store: &mut Store<S>) -> Result<(), CliError> {
    settle(store.dispatch(Action::ClearCart))?;
    Ok(())
}
