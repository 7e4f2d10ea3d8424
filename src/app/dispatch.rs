//! Deferred dispatch of report commands.
//!
//! Commands are buffered until the sink can be resolved. The first
//! successful resolution drains the buffer in FIFO order and switches the
//! queue to pass-through for the rest of the session.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::ReportCommand;
use crate::port::{ReportSink, SinkProvider};

/// Delivery state of a [`DispatchQueue`]. Only ever moves forward.
pub enum DispatchMode {
    /// Sink not seen yet; commands wait in the buffer.
    Buffering,
    /// Sink resolved; commands are sent as soon as they are enqueued.
    PassThrough(Arc<dyn ReportSink>),
}

impl fmt::Debug for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buffering => f.write_str("Buffering"),
            Self::PassThrough(_) => f.write_str("PassThrough"),
        }
    }
}

pub struct DispatchQueue {
    provider: Arc<dyn SinkProvider>,
    sink_name: String,
    mode: DispatchMode,
    pending: VecDeque<ReportCommand>,
    dispatched: u64,
}

impl DispatchQueue {
    #[must_use]
    pub fn new(provider: Arc<dyn SinkProvider>, sink_name: impl Into<String>) -> Self {
        Self {
            provider,
            sink_name: sink_name.into(),
            mode: DispatchMode::Buffering,
            pending: VecDeque::new(),
            dispatched: 0,
        }
    }

    /// Buffer a command, or send it right away once the sink is known.
    pub fn enqueue(&mut self, command: ReportCommand) {
        match &self.mode {
            DispatchMode::PassThrough(sink) => {
                deliver(sink.as_ref(), &command, &mut self.dispatched);
            }
            DispatchMode::Buffering => self.pending.push_back(command),
        }
    }

    /// Poll for the sink. On first success, send everything buffered and
    /// switch to pass-through. Returns the number of commands drained.
    pub fn drain_if_ready(&mut self) -> usize {
        let mut drained = 0;

        if matches!(self.mode, DispatchMode::Buffering) {
            if let Some(sink) = self.provider.resolve(&self.sink_name) {
                drained = self.pending.len();
                for command in self.pending.drain(..) {
                    deliver(sink.as_ref(), &command, &mut self.dispatched);
                }
                self.mode = DispatchMode::PassThrough(sink);
                info!(sink = %self.sink_name, drained, "Analytics sink ready");
            }
        }

        debug!(dispatched = self.dispatched, "Event count sent to sink");
        drained
    }

    /// Whether the queue has switched to pass-through.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.mode, DispatchMode::PassThrough(_))
    }

    #[must_use]
    pub fn mode(&self) -> &DispatchMode {
        &self.mode
    }

    /// Commands still waiting for the sink.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Commands handed to the sink so far, successful or not.
    #[must_use]
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    #[must_use]
    pub fn sink_name(&self) -> &str {
        &self.sink_name
    }
}

impl fmt::Debug for DispatchQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchQueue")
            .field("sink_name", &self.sink_name)
            .field("mode", &self.mode)
            .field("pending", &self.pending.len())
            .field("dispatched", &self.dispatched)
            .finish()
    }
}

fn deliver(sink: &dyn ReportSink, command: &ReportCommand, dispatched: &mut u64) {
    *dispatched += 1;
    if let Err(e) = sink.send(command) {
        warn!(
            category = %command.category,
            action = %command.action,
            error = %e,
            "Analytics sink rejected command"
        );
    }
}
