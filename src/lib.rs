//! Bidtrace - auction lifecycle analytics with deferred sink dispatch.
//!
//! The adapter listens to an ad-serving runtime's auction events, turns them
//! into counter, value and histogram hits for an external analytics sink,
//! and rolls up the best price per placement once per auction. Hits are
//! buffered until the sink becomes available and sent straight through
//! afterwards.
//!
//! # Modules
//!
//! - [`domain`] - Events, distribution buckets, report commands, options, rollups
//! - [`port`] - Traits for the event bus, report sinks and diagnostics
//! - [`adapter`] - In-memory bus, sink directory, log/JSON sinks, table diagnostics
//! - [`app`] - Dispatch queue, session routing, enablement, file configuration
//! - [`cli`] - Command-line interface for the `bidtrace` binary
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use bidtrace::adapter::{InMemoryEventBus, LogSink, SinkDirectory};
//! use bidtrace::app::{AnalyticsAdapter, Enablement};
//! use bidtrace::domain::{AnalyticsOptions, AuctionEvent, BidWon};
//!
//! let bus = Arc::new(InMemoryEventBus::new());
//! let sinks = Arc::new(SinkDirectory::new());
//! let mut adapter = AnalyticsAdapter::new(bus.clone(), sinks.clone());
//!
//! let options: AnalyticsOptions =
//!     serde_json::from_str(r#"{"sampling":"1","wdc_options":{"bid_won":true}}"#).unwrap();
//! assert_eq!(adapter.enable(Some("ga"), &options), Enablement::Enabled);
//!
//! bus.publish(AuctionEvent::BidWon(BidWon {
//!     bidder_code: Some("acme".into()),
//!     cpm: 2.5,
//!     ad_id: None,
//! }));
//!
//! // The sink shows up later; buffered hits go out on the next event.
//! sinks.install("ga", Arc::new(LogSink));
//! bus.publish(AuctionEvent::AuctionInit);
//! assert_eq!(adapter.with_session(|s| s.queue().dispatched()), Some(1));
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
