//! Event bus port.
//!
//! The bus belongs to the ad-serving runtime. It records every event it
//! publishes so late subscribers can catch up on what they missed.

use std::sync::Arc;

use crate::domain::AuctionEvent;

/// Receiver of auction lifecycle events.
///
/// Handlers run synchronously on the publisher's call chain and must
/// return without blocking.
pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &AuctionEvent);
}

/// Source of auction lifecycle events.
pub trait EventBus: Send + Sync {
    /// Every event published so far, in publication order.
    fn history(&self) -> Vec<AuctionEvent>;

    /// Deliver all future events to `handler`.
    fn subscribe(&self, handler: Arc<dyn EventHandler>);

    /// Subscribe `handler` and return the events published before it, as one
    /// step: every event is either in the returned history or delivered to
    /// `handler`, never both and never neither.
    fn subscribe_with_history(&self, handler: Arc<dyn EventHandler>) -> Vec<AuctionEvent>;
}
