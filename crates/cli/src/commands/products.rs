//! Catalog commands.

use std::io;

use nordora_core::{Price, ProductDraft, ProductId, sanitize_input};
use nordora_storefront::storage::KeyValueStorage;
use nordora_storefront::store::{Action, Change, Rejection, Store};
use tracing::info;

use super::views::ProductTable;
use super::{CliError, settle};

/// Fields given to `products update`; `None` keeps the current value.
#[derive(Debug, Default)]
pub struct ProductFields {
    pub name: Option<String>,
    pub dimensions: Option<String>,
    pub price: Option<Price>,
    pub image: Option<String>,
}

/// Draw the product list.
pub fn list<S: KeyValueStorage>(store: &mut Store<S>) {
    store.attach_product_view(ProductTable::new(io::stdout()));
}

/// Add a product, then show the list.
pub fn add<S: KeyValueStorage>(
    store: &mut Store<S>,
    id: Option<ProductId>,
    draft: ProductDraft,
) -> Result<(), CliError> {
    if let Some(Change::ProductAdded(id)) = settle(store.dispatch(Action::AddProduct { draft, id }))? {
        info!(product = %id, "Product added");
    }
    list(store);
    Ok(())
}

/// Apply `fields` to an existing product, then show the list.
pub fn update<S: KeyValueStorage>(
    store: &mut Store<S>,
    id: ProductId,
    fields: &ProductFields,
) -> Result<(), CliError> {
    let mut product = store
        .state()
        .product_by_id(id)
        .cloned()
        .ok_or_else(|| CliError::Rejected(Rejection::ProductNotFound(id).notice()))?;

    if let Some(name) = &fields.name {
        product.name = sanitize_input(name);
    }
    if let Some(dimensions) = &fields.dimensions {
        product.dimensions = sanitize_input(dimensions);
    }
    if let Some(price) = fields.price {
        product.price = price;
    }
    if let Some(image) = &fields.image {
        product.image = sanitize_input(image);
    }

    settle(store.dispatch(Action::UpdateProduct(product)))?;
    info!(product = %id, "Product updated");
    list(store);
    Ok(())
}

/// Remove a product, then show the list.
pub fn delete<S: KeyValueStorage>(store: &mut Store<S>, id: ProductId) -> Result<(), CliError> {
    settle(store.dispatch(Action::DeleteProduct(id)))?;
    info!(product = %id, "Product deleted");
    list(store);
    Ok(())
}
