//! Implementations of ports.

mod bus;
mod diagnostics;
pub mod sink;

pub use bus::InMemoryEventBus;
pub use diagnostics::{render_auction_table, TableDiagnostics};
pub use sink::{JsonLinesSink, LogSink, SinkDirectory};
