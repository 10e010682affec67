//! Subscriber registry and the render interfaces built on it.

use std::panic::{AssertUnwindSafe, catch_unwind};

use nordora_core::{CartLine, Price, Product};
use tracing::error;

use super::state::State;

/// Error a subscriber may return; it is logged and otherwise ignored.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Receives the state after every applied action.
pub trait Subscriber {
    /// Called with the new state.
    ///
    /// # Errors
    ///
    /// Any error is logged by the store; other subscribers still run.
    fn on_change(&mut self, state: &State) -> Result<(), ListenerError>;
}

impl<F> Subscriber for F
where
    F: FnMut(&State) -> Result<(), ListenerError>,
{
    fn on_change(&mut self, state: &State) -> Result<(), ListenerError> {
        self(state)
    }
}

/// Something that can display the cart.
pub trait CartView {
    /// Draw the current lines and total.
    ///
    /// # Errors
    ///
    /// Returns an error if the view could not be drawn.
    fn render(&mut self, lines: &[CartLine], total: Price) -> Result<(), ListenerError>;
}

/// Something that can display the product list (shop or stock screen).
pub trait ProductView {
    /// Draw the current products.
    ///
    /// # Errors
    ///
    /// Returns an error if the view could not be drawn.
    fn render(&mut self, products: &[Product]) -> Result<(), ListenerError>;
}

pub(crate) struct CartViewSubscriber<V>(pub(crate) V);

impl<V: CartView> Subscriber for CartViewSubscriber<V> {
    fn on_change(&mut self, state: &State) -> Result<(), ListenerError> {
        self.0.render(state.cart_lines(), state.cart_total())
    }
}

pub(crate) struct ProductViewSubscriber<V>(pub(crate) V);

impl<V: ProductView> Subscriber for ProductViewSubscriber<V> {
    fn on_change(&mut self, state: &State) -> Result<(), ListenerError> {
        self.0.render(state.products())
    }
}

/// Handle returned by subscribing; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subscribers in registration order.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn Subscriber>)>,
}

impl Subscribers {
    pub(crate) fn add(&mut self, subscriber: Box<dyn Subscriber>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, subscriber));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() < before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Call every subscriber in order. Returns how many failed.
    pub(crate) fn notify(&mut self, state: &State) -> usize {
        let mut failures = 0;
        for (id, subscriber) in &mut self.entries {
            if !notify_one(*id, subscriber.as_mut(), state) {
                failures += 1;
            }
        }
        failures
    }

    /// Call only the subscriber `id`. Returns whether it succeeded.
    pub(crate) fn notify_single(&mut self, id: SubscriptionId, state: &State) -> bool {
        self.entries
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .is_some_and(|(_, subscriber)| notify_one(id, subscriber.as_mut(), state))
    }
}

fn notify_one(id: SubscriptionId, subscriber: &mut dyn Subscriber, state: &State) -> bool {
    match catch_unwind(AssertUnwindSafe(|| subscriber.on_change(state))) {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            error!(subscription = %id, error = %e, "Subscriber failed");
            false
        }
        Err(_) => {
            error!(subscription = %id, "Subscriber panicked");
            false
        }
    }
}
