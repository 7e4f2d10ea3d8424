//! In-memory event bus that records everything it publishes.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::AuctionEvent;
use crate::port::{EventBus, EventHandler};

/// Records every published event and fans it out to subscribers in
/// subscription order.
///
/// History and subscribers share one lock so a subscription taken with
/// [`EventBus::subscribe_with_history`] splits the event stream cleanly.
#[derive(Default)]
pub struct InMemoryEventBus {
    state: RwLock<BusState>,
}

#[derive(Default)]
struct BusState {
    history: Vec<AuctionEvent>,
    subscribers: Vec<Arc<dyn EventHandler>>,
}

impl InMemoryEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `event` and deliver it to current subscribers.
    pub fn publish(&self, event: AuctionEvent) {
        let subscribers = {
            let mut state = self.state.write();
            state.history.push(event.clone());
            state.subscribers.clone()
        };
        for subscriber in &subscribers {
            subscriber.handle(&event);
        }
    }

    /// Number of events published so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().history.is_empty()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.read().subscribers.len()
    }
}

impl EventBus for InMemoryEventBus {
    fn history(&self) -> Vec<AuctionEvent> {
        self.state.read().history.clone()
    }

    fn subscribe(&self, handler: Arc<dyn EventHandler>) {
        self.state.write().subscribers.push(handler);
    }

    fn subscribe_with_history(&self, handler: Arc<dyn EventHandler>) -> Vec<AuctionEvent> {
        let mut state = self.state.write();
        state.subscribers.push(handler);
        state.history.clone()
    }
}
