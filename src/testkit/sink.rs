//! Report sinks for assertions.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::ReportCommand;
use crate::error::SinkError;
use crate::port::ReportSink;

/// Thread-safe collector of every command it receives, in order.
#[derive(Clone, Default)]
pub struct RecordingSink {
    commands: Arc<Mutex<Vec<ReportCommand>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<ReportCommand> {
        self.commands.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.commands.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.lock().is_empty()
    }
}

impl ReportSink for RecordingSink {
    fn send(&self, command: &ReportCommand) -> Result<(), SinkError> {
        self.commands.lock().push(command.clone());
        Ok(())
    }
}

/// Sink that rejects every command and counts the attempts.
#[derive(Clone, Default)]
pub struct FailingSink {
    attempts: Arc<AtomicUsize>,
}

impl FailingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl ReportSink for FailingSink {
    fn send(&self, _command: &ReportCommand) -> Result<(), SinkError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(SinkError::Rejected("sink unavailable".into()))
    }
}
