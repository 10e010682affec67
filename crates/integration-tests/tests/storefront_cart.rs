//! Cart scenarios driven through the store.
//!
//! Every mutation goes through `Store::dispatch`, so these tests check the
//! in-memory state, the persisted cart and the notifications together.

#![allow(clippy::unwrap_used)]

use std::cell::Cell;
use std::rc::Rc;

use nordora_core::{CartLine, Price, Product, ProductId};
use nordora_integration_tests::{euros, product};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use nordora_storefront::storage::{KeyValueStorage, MemoryStorage, keys};
use nordora_storefront::store::{Action, Rejection, State, Store};

fn store_with(products: &[Product]) -> (Store<MemoryStorage>, MemoryStorage) {
    let storage = MemoryStorage::new();
    storage
        .set_item(keys::PRODUCTS, &serde_json::to_string(products).unwrap())
        .unwrap();
    (Store::open(storage.clone()), storage)
}

fn stored_cart(storage: &MemoryStorage) -> serde_json::Value {
    serde_json::from_str(&storage.get_item(keys::CART).unwrap().unwrap()).unwrap()
}

fn assert_cart_consistent(state: &State) {
    let lines = state.cart_lines();
    let sum: Price = lines.iter().map(CartLine::subtotal).sum();
    assert_eq!(state.cart_total(), sum);
    assert!(lines.iter().all(|l| l.quantity >= 1));
    for (i, line) in lines.iter().enumerate() {
        assert!(
            lines.iter().skip(i + 1).all(|other| other.id() != line.id()),
            "duplicate line for {}",
            line.id()
        );
    }
}

// =============================================================================
// Shopper flows
// =============================================================================

#[test]
fn test_total_follows_add_quantity_remove_clear() {
    let (mut store, storage) = store_with(&[product(5, 2000), product(7, 3000)]);

    store.dispatch(Action::AddToCart(ProductId::new(5))).unwrap();
    store.dispatch(Action::AddToCart(ProductId::new(7))).unwrap();
    assert_eq!(store.state().cart_total(), euros(5000));

    store
        .dispatch(Action::SetQuantity {
            id: ProductId::new(5),
            quantity: 3,
        })
        .unwrap();
    assert_eq!(store.state().cart_total(), euros(9000));
    assert_eq!(stored_cart(&storage)[0]["cantidad"], 3);

    store.dispatch(Action::RemoveFromCart(ProductId::new(7))).unwrap();
    assert_eq!(store.state().cart_total(), euros(6000));
    assert_eq!(stored_cart(&storage).as_array().unwrap().len(), 1);

    store.dispatch(Action::ClearCart).unwrap();
    assert_eq!(store.state().cart_total(), Price::ZERO);
    assert_eq!(stored_cart(&storage), serde_json::json!([]));
}

#[test]
fn test_duplicate_add_changes_nothing() {
    let (mut store, storage) = store_with(&[product(1, 1000)]);
    let renders = Rc::new(Cell::new(0));
    let counter = Rc::clone(&renders);
    store.subscribe(move |_: &State| {
        counter.set(counter.get() + 1);
        Ok(())
    });

    store.dispatch(Action::AddToCart(ProductId::new(1))).unwrap();
    let persisted = storage.get_item(keys::CART).unwrap();
    assert_eq!(renders.get(), 2);

    let err = store.dispatch(Action::AddToCart(ProductId::new(1))).unwrap_err();
    assert_eq!(err, Rejection::AlreadyInCart(ProductId::new(1)));
    assert_eq!(store.state().cart_line_count(), 1);
    assert_eq!(store.state().cart_quantity(), 1);
    assert_eq!(storage.get_item(keys::CART).unwrap(), persisted);
    assert_eq!(renders.get(), 2);
}

#[test]
fn test_unknown_product_is_rejected() {
    let (mut store, storage) = store_with(&[product(1, 1000)]);
    let err = store.dispatch(Action::AddToCart(ProductId::new(42))).unwrap_err();
    assert_eq!(err.notice().message, "Product not found");
    assert_eq!(storage.get_item(keys::CART).unwrap(), None);
}

#[test]
fn test_negative_quantity_removes_line() {
    let (mut store, _) = store_with(&[product(1, 1000), product(2, 500)]);
    store.dispatch(Action::AddToCart(ProductId::new(1))).unwrap();
    store.dispatch(Action::AddToCart(ProductId::new(2))).unwrap();

    store
        .dispatch(Action::SetQuantity {
            id: ProductId::new(1),
            quantity: -1,
        })
        .unwrap();
    assert!(!store.state().is_in_cart(ProductId::new(1)));
    assert_eq!(store.state().cart_total(), euros(500));
}

#[test]
fn test_cart_survives_reopen() {
    let (mut store, storage) = store_with(&[product(3, 12_345)]);
    store.dispatch(Action::AddToCart(ProductId::new(3))).unwrap();
    store
        .dispatch(Action::SetQuantity {
            id: ProductId::new(3),
            quantity: 2,
        })
        .unwrap();
    store.close();

    let reopened = Store::open(storage);
    assert_eq!(reopened.state().cart_quantity(), 2);
    assert_eq!(reopened.state().cart_total(), euros(24_690));
}

// =============================================================================
// Invariants over long sequences
// =============================================================================

#[test]
fn test_cart_invariants_hold_for_mixed_sequence() {
    let products: Vec<Product> = (1..=6).map(|id| product(id, i64::from(id) * 1250)).collect();
    let (mut store, storage) = store_with(&products);
    // Fixed seed: the same sequence on every run.
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..500 {
        let id = ProductId::new(rng.random_range(0..8));
        let action = match rng.random_range(0..5) {
            0 | 1 => Action::AddToCart(id),
            2 => Action::RemoveFromCart(id),
            3 => Action::SetQuantity {
                id,
                quantity: rng.random_range(-1..5),
            },
            _ if rng.random_bool(0.1) => Action::ClearCart,
            _ => Action::AddToCart(id),
        };
        let _ = store.dispatch(action);
        assert_cart_consistent(store.state());
    }

    let reopened = Store::open(storage);
    assert_eq!(reopened.state().cart(), store.state().cart());
}
