use tracing::info;

use crate::domain::ReportCommand;
use crate::error::SinkError;
use crate::port::ReportSink;

/// A sink that logs commands via tracing.
pub struct LogSink;

impl ReportSink for LogSink {
    fn send(&self, command: &ReportCommand) -> Result<(), SinkError> {
        info!(
            tracker = %command.tracker_method,
            category = %command.category,
            action = %command.action,
            label = %command.label,
            value = ?command.value,
            "Analytics event"
        );
        Ok(())
    }
}
