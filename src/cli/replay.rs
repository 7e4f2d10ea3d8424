//! Handler for the `replay` command.
//!
//! Publishes a recorded event log to an in-memory bus, enabling the adapter
//! part-way through and making the sink available at a chosen point, so
//! buffering and history replay can be observed end to end.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::adapter::{InMemoryEventBus, JsonLinesSink, SinkDirectory, TableDiagnostics};
use crate::app::{AnalyticsAdapter, Config, Enablement};
use crate::cli::ReplayArgs;
use crate::domain::{AnalyticsConfig, AuctionEvent};
use crate::error::{Error, Result};
use crate::port::ReportSink;

/// What happened during a replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub enablement: Enablement,
    pub dispatched: u64,
    pub pending: usize,
}

/// Read one event per non-blank line.
pub fn read_events(path: &Path) -> Result<Vec<AuctionEvent>> {
    let reader = BufReader::new(File::open(path)?);
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event = serde_json::from_str(&line).map_err(|e| Error::InvalidEvent {
            line: index + 1,
            reason: e.to_string(),
        })?;
        events.push(event);
    }
    Ok(events)
}

/// Replay `events` and send sink calls to `output`.
pub fn replay(
    config: &Config,
    events: Vec<AuctionEvent>,
    enable_after: usize,
    sink_ready_after: Option<usize>,
    output: Box<dyn Write + Send>,
) -> ReplaySummary {
    let analytics = &config.analytics;
    let sink_name =
        AnalyticsConfig::resolve(analytics.provider.as_deref(), &analytics.options).sink_name;

    let bus = Arc::new(InMemoryEventBus::new());
    let sinks = Arc::new(SinkDirectory::new());
    let sink: Arc<dyn ReportSink> = Arc::new(JsonLinesSink::new(output));
    let mut adapter = AnalyticsAdapter::new(bus.clone(), sinks.clone())
        .with_placement_filter(analytics.placement_filter())
        .with_diagnostics(Arc::new(TableDiagnostics));

    let total = events.len();
    let ready_at = sink_ready_after.unwrap_or(0);
    let mut enablement = None;

    for (published, event) in events.into_iter().enumerate() {
        if published == ready_at {
            info!(sink = %sink_name, published, "Installing sink");
            sinks.install(sink_name.as_str(), Arc::clone(&sink));
        }
        if published == enable_after {
            enablement = Some(adapter.enable(analytics.provider.as_deref(), &analytics.options));
        }
        bus.publish(event);
    }

    let enablement = enablement
        .unwrap_or_else(|| adapter.enable(analytics.provider.as_deref(), &analytics.options));

    let (dispatched, pending) = adapter
        .with_session(|session| (session.queue().dispatched(), session.queue().pending()))
        .unwrap_or((0, 0));

    ReplaySummary {
        events: total,
        enablement,
        dispatched,
        pending,
    }
}

/// Execute `replay`.
pub fn execute(config: &Config, args: &ReplayArgs) -> Result<ReplaySummary> {
    let events = read_events(&args.events)?;
    let output: Box<dyn Write + Send> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    let summary = replay(
        config,
        events,
        args.enable_after,
        args.sink_ready_after,
        output,
    );
    info!(
        events = summary.events,
        enablement = ?summary.enablement,
        dispatched = summary.dispatched,
        pending = summary.pending,
        "Replay finished"
    );
    eprintln!(
        "replayed {} events: {:?}, {} dispatched, {} pending",
        summary.events, summary.enablement, summary.dispatched, summary.pending
    );
    Ok(summary)
}
