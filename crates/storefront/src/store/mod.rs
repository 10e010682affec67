//! The storefront store.
//!
//! One [`Store`] owns the product list and the cart. Interactions reach it as
//! [`Action`]s; each dispatch runs, in order and without interruption:
//!
//! 1. [`reduce`] - a pure transition from the old state to the new one
//! 2. persistence - the changed slice is written back in full
//! 3. notification - every subscriber is called with the new state
//!
//! A rejected action changes nothing, writes nothing and notifies no one.
//!
//! The store is created explicitly and handed to whatever needs it; there is
//! no global instance.

mod action;
mod notice;
mod reducer;
mod state;
mod subscribers;

use std::fmt;

use tracing::{debug, info, warn};

pub use action::Action;
pub use notice::{Notice, NoticeLevel, Rejection};
pub use reducer::{Change, Transition, reduce};
pub use state::{CartState, State};
pub use subscribers::{CartView, ListenerError, ProductView, Subscriber, SubscriptionId};

use subscribers::{CartViewSubscriber, ProductViewSubscriber, Subscribers};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::storage::{KeyValueStorage, Persistence, keys};

/// Single source of truth for products and cart.
pub struct Store<S: KeyValueStorage> {
    persistence: Persistence<S>,
    state: State,
    subscribers: Subscribers,
}

impl<S: KeyValueStorage> Store<S> {
    /// Load products (seeding if needed) and the saved cart from `storage`.
    #[must_use]
    pub fn open(storage: S) -> Self {
        let persistence = Persistence::new(storage);
        let products = Catalog::new(&persistence).all();
        let cart: Cart = persistence.load(keys::CART, Cart::new());

        info!(
            products = products.len(),
            cart_lines = cart.line_count(),
            "Store opened"
        );

        Self {
            persistence,
            state: State::new(products, cart),
            subscribers: Subscribers::default(),
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// Apply `action`.
    ///
    /// On success the new state has been persisted and every subscriber has
    /// been called before this returns.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] if the action cannot apply. The state is
    /// left as it was.
    pub fn dispatch(&mut self, action: Action) -> Result<Change, Rejection> {
        let transition = match reduce(&self.state, &action) {
            Ok(transition) => transition,
            Err(rejection) => {
                match rejection.level() {
                    NoticeLevel::Info => {
                        info!(action = action.name(), reason = %rejection, "Action not applied");
                    }
                    NoticeLevel::Error => {
                        warn!(action = action.name(), reason = %rejection, "Action rejected");
                    }
                }
                return Err(rejection);
            }
        };

        self.state = transition.state;
        self.persist(transition.change);
        let failures = self.subscribers.notify(&self.state);

        debug!(
            action = action.name(),
            change = ?transition.change,
            subscribers = self.subscribers.len(),
            failures,
            "Action applied"
        );
        Ok(transition.change)
    }

    /// Re-read the product list from storage and publish it.
    ///
    /// # Errors
    ///
    /// Loading never rejects; the `Result` mirrors [`Store::dispatch`].
    pub fn reload_products(&mut self) -> Result<Change, Rejection> {
        let products = Catalog::new(&self.persistence).all();
        self.dispatch(Action::ProductsLoaded(products))
    }

    /// Register `listener` and call it once with the current state.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&State) -> Result<(), ListenerError> + 'static,
    {
        self.register(Box::new(listener))
    }

    /// Register a cart view; it is rendered immediately and after every change.
    pub fn attach_cart_view<V: CartView + 'static>(&mut self, view: V) -> SubscriptionId {
        self.register(Box::new(CartViewSubscriber(view)))
    }

    /// Register a product view; it is rendered immediately and after every change.
    pub fn attach_product_view<V: ProductView + 'static>(&mut self, view: V) -> SubscriptionId {
        self.register(Box::new(ProductViewSubscriber(view)))
    }

    /// Stop notifying `id`. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.subscribers.remove(id);
        debug!(subscription = %id, removed, "Unsubscribed");
        removed
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Drop every subscriber and release the store.
    pub fn close(mut self) {
        let count = self.subscribers.len();
        self.subscribers.clear();
        info!(subscribers = count, "Store closed");
    }

    fn register(&mut self, subscriber: Box<dyn Subscriber>) -> SubscriptionId {
        let id = self.subscribers.add(subscriber);
        self.subscribers.notify_single(id, &self.state);
        id
    }

    fn persist(&self, change: Change) {
        if change.touches_cart() {
            self.persistence.save(keys::CART, self.state.cart().cart());
        }
        if change.touches_products() {
            Catalog::new(&self.persistence).save(self.state.products());
        }
    }
}

impl<S: KeyValueStorage> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("persistence", &self.persistence)
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
