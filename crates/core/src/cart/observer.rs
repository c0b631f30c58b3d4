//! Cart Observer

use std::sync::{Arc, Mutex};

use crate::catalog::ItemId;

/// Change notification emitted after every cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A new line was appended with quantity 1.
    Added {
        /// Item that was added
        item_id: ItemId,
    },

    /// An existing line's quantity was set, possibly to the same value when clamped.
    QuantityChanged {
        /// Item whose line changed
        item_id: ItemId,
        /// Quantity after the change
        quantity: u32,
    },

    /// A line was removed.
    Removed {
        /// Item whose line was removed
        item_id: ItemId,
    },

    /// Every line was removed.
    Cleared,
}

/// Receives cart change notifications so a view can re-render.
///
/// Observers are called synchronously, after the cart has been updated, in the order they were
/// subscribed.
pub trait CartObserver: Send + Sync {
    /// Called once per mutation.
    fn on_cart_event(&mut self, event: &CartEvent);
}

impl<F> CartObserver for F
where
    F: FnMut(&CartEvent) + Send + Sync,
{
    fn on_cart_event(&mut self, event: &CartEvent) {
        self(event);
    }
}

/// Shared log of cart events.
///
/// Clones share the same underlying log, so one clone can be subscribed to a cart while another
/// is kept for reading.
#[derive(Debug, Clone, Default)]
pub struct CartEventLog {
    events: Arc<Mutex<Vec<CartEvent>>>,
}

impl CartEventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the events recorded so far.
    pub fn events(&self) -> Vec<CartEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Removes and returns the events recorded so far.
    pub fn drain(&self) -> Vec<CartEvent> {
        self.events
            .lock()
            .map(|mut events| events.drain(..).collect())
            .unwrap_or_default()
    }
}

impl CartObserver for CartEventLog {
    fn on_cart_event(&mut self, event: &CartEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
