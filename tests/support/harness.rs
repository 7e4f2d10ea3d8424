use std::sync::Arc;

use bidtrace::adapter::{InMemoryEventBus, SinkDirectory};
use bidtrace::app::AnalyticsAdapter;
use bidtrace::domain::AnalyticsOptions;
use bidtrace::testkit::sink::RecordingSink;

/// Bus, sink directory and an adapter wired to them. No sink is installed.
pub struct Harness {
    pub bus: Arc<InMemoryEventBus>,
    pub sinks: Arc<SinkDirectory>,
    pub adapter: AnalyticsAdapter,
}

impl Harness {
    pub fn new() -> Self {
        let bus = Arc::new(InMemoryEventBus::new());
        let sinks = Arc::new(SinkDirectory::new());
        let adapter = AnalyticsAdapter::new(bus.clone(), sinks.clone());
        Self { bus, sinks, adapter }
    }

    /// Install a recording sink under the default name.
    pub fn install_sink(&self) -> RecordingSink {
        let sink = RecordingSink::new();
        self.sinks.install("ga", Arc::new(sink.clone()));
        sink
    }

    pub fn pending(&self) -> usize {
        self.adapter
            .with_session(|s| s.queue().pending())
            .unwrap_or(0)
    }
}

/// Parse adapter options from JSON.
pub fn options(json: &str) -> AnalyticsOptions {
    serde_json::from_str(json).expect("valid options json")
}
