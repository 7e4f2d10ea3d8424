//! Reporting sink port.
//!
//! The sink is an external analytics global that may only become available
//! some time after instrumentation starts. A [`SinkProvider`] answers whether
//! it exists yet.

use std::sync::Arc;

use crate::domain::ReportCommand;
use crate::error::SinkError;

/// Destination of report commands.
///
/// Delivery is best effort: callers log failures and move on.
pub trait ReportSink: Send + Sync {
    fn send(&self, command: &ReportCommand) -> Result<(), SinkError>;
}

/// Looks up a sink by its global name.
pub trait SinkProvider: Send + Sync {
    /// The sink registered under `name`, if it is callable yet.
    fn resolve(&self, name: &str) -> Option<Arc<dyn ReportSink>>;
}
