//! Notification order, isolation and unsubscribe.

#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;

use nordora_core::{CartLine, Price, Product, ProductId};
use nordora_storefront::storage::{KeyValueStorage, MemoryStorage, keys};
use nordora_storefront::store::{Action, CartView, ListenerError, ProductView, State, Store};

type Log = Rc<RefCell<Vec<String>>>;

fn recorder(log: &Log, name: &'static str) -> impl FnMut(&State) -> Result<(), ListenerError> + 'static {
    let log = Rc::clone(log);
    move |_: &State| {
        log.borrow_mut().push(name.to_string());
        Ok(())
    }
}

fn open() -> Store<MemoryStorage> {
    Store::open(MemoryStorage::new())
}

// =============================================================================
// Registration and order
// =============================================================================

#[test]
fn test_subscribe_renders_immediately() {
    let log: Log = Rc::default();
    let mut store = open();
    store.subscribe(recorder(&log, "a"));
    assert_eq!(*log.borrow(), ["a"]);
}

#[test]
fn test_notified_in_registration_order() {
    let log: Log = Rc::default();
    let mut store = open();
    store.subscribe(recorder(&log, "first"));
    store.subscribe(recorder(&log, "second"));
    store.subscribe(recorder(&log, "third"));
    log.borrow_mut().clear();

    store.dispatch(Action::AddToCart(ProductId::new(1))).unwrap();
    assert_eq!(*log.borrow(), ["first", "second", "third"]);
}

#[test]
fn test_listener_sees_committed_state() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut store = open();
    let sink = Rc::clone(&seen);
    store.subscribe(move |state: &State| {
        sink.borrow_mut().push(state.cart_line_count());
        Ok(())
    });

    store.dispatch(Action::AddToCart(ProductId::new(1))).unwrap();
    store.dispatch(Action::AddToCart(ProductId::new(2))).unwrap();
    store.dispatch(Action::ClearCart).unwrap();
    assert_eq!(*seen.borrow(), [0, 1, 2, 0]);
}

#[test]
fn test_storage_is_written_before_listeners_run() {
    let storage = MemoryStorage::new();
    let mut store = Store::open(storage.clone());
    let stored_lines = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&stored_lines);
    let reader = storage.clone();
    store.subscribe(move |_: &State| {
        let lines = reader
            .get_item(keys::CART)
            .unwrap()
            .map(|text| serde_json::from_str::<Vec<CartLine>>(&text).unwrap().len());
        sink.borrow_mut().push(lines);
        Ok(())
    });

    store.dispatch(Action::AddToCart(ProductId::new(1))).unwrap();
    store.dispatch(Action::AddToCart(ProductId::new(2))).unwrap();
    store.dispatch(Action::ClearCart).unwrap();
    assert_eq!(*stored_lines.borrow(), [None, Some(1), Some(2), Some(0)]);
}

#[test]
fn test_rejected_action_notifies_no_one() {
    let log: Log = Rc::default();
    let mut store = open();
    store.subscribe(recorder(&log, "a"));
    log.borrow_mut().clear();

    assert!(store.dispatch(Action::RemoveFromCart(ProductId::new(1))).is_err());
    assert!(log.borrow().is_empty());
}

// =============================================================================
// Isolation
// =============================================================================

#[test]
fn test_failing_listener_does_not_block_others() {
    let log: Log = Rc::default();
    let mut store = open();
    store.subscribe(recorder(&log, "before"));
    store.subscribe(|_: &State| Err::<(), ListenerError>("render failed".into()));
    store.subscribe(recorder(&log, "after"));
    log.borrow_mut().clear();

    store.dispatch(Action::AddToCart(ProductId::new(1))).unwrap();
    assert_eq!(*log.borrow(), ["before", "after"]);
}

#[test]
fn test_panicking_listener_does_not_block_others() {
    let log: Log = Rc::default();
    let mut store = open();
    store.subscribe(|state: &State| {
        assert_eq!(state.cart_line_count(), 0, "listener blew up");
        Ok(())
    });
    store.subscribe(recorder(&log, "survivor"));
    log.borrow_mut().clear();

    store.dispatch(Action::AddToCart(ProductId::new(1))).unwrap();
    assert_eq!(*log.borrow(), ["survivor"]);
    assert!(store.state().is_in_cart(ProductId::new(1)));
}

// =============================================================================
// Unsubscribe and close
// =============================================================================

#[test]
fn test_unsubscribe_stops_notifications() {
    let log: Log = Rc::default();
    let mut store = open();
    let id = store.subscribe(recorder(&log, "gone"));
    store.subscribe(recorder(&log, "kept"));
    log.borrow_mut().clear();

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.dispatch(Action::AddToCart(ProductId::new(1))).unwrap();
    assert_eq!(*log.borrow(), ["kept"]);
    assert_eq!(store.subscriber_count(), 1);
}

#[test]
fn test_close_releases_listeners() {
    let log: Log = Rc::default();
    let mut store = open();
    store.subscribe(recorder(&log, "a"));
    assert_eq!(Rc::strong_count(&log), 2);

    store.close();
    assert_eq!(Rc::strong_count(&log), 1);
}

// =============================================================================
// Typed views
// =============================================================================

#[derive(Default)]
struct TotalsView {
    totals: Rc<RefCell<Vec<Price>>>,
}

impl CartView for TotalsView {
    fn render(&mut self, lines: &[CartLine], total: Price) -> Result<(), ListenerError> {
        let sum: Price = lines.iter().map(CartLine::subtotal).sum();
        assert_eq!(sum, total);
        self.totals.borrow_mut().push(total);
        Ok(())
    }
}

struct CountView {
    counts: Rc<RefCell<Vec<usize>>>,
}

impl ProductView for CountView {
    fn render(&mut self, products: &[Product]) -> Result<(), ListenerError> {
        self.counts.borrow_mut().push(products.len());
        Ok(())
    }
}

#[test]
fn test_cart_and_product_views() {
    let mut store = open();
    let first_price = store.state().products().first().unwrap().price;

    let view = TotalsView::default();
    let totals = Rc::clone(&view.totals);
    store.attach_cart_view(view);

    let counts = Rc::new(RefCell::new(Vec::new()));
    store.attach_product_view(CountView {
        counts: Rc::clone(&counts),
    });

    store.dispatch(Action::AddToCart(ProductId::new(1))).unwrap();
    store
        .dispatch(Action::SetQuantity {
            id: ProductId::new(1),
            quantity: 2,
        })
        .unwrap();
    store.dispatch(Action::DeleteProduct(ProductId::new(8))).unwrap();

    assert_eq!(
        *totals.borrow(),
        [
            Price::ZERO,
            first_price,
            first_price.times(2),
            first_price.times(2)
        ]
    );
    assert_eq!(*counts.borrow(), [8, 8, 8, 7]);
}
