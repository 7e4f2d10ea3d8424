//! Trait definitions at the edges of the adapter. Depend only on domain.
//!
//! - [`EventBus`], [`EventHandler`] - auction lifecycle event source
//! - [`ReportSink`], [`SinkProvider`] - external analytics sink
//! - [`DiagnosticSink`] - rollup log output

mod bus;
mod diagnostics;
mod sink;

pub use bus::{EventBus, EventHandler};
pub use diagnostics::DiagnosticSink;
pub use sink::{ReportSink, SinkProvider};
