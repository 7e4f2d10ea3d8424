//! Report sink implementations and the name-based sink directory.

mod json;
mod logger;

pub use json::JsonLinesSink;
pub use logger::LogSink;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::port::{ReportSink, SinkProvider};

/// Sinks registered by global name.
///
/// Sinks can be installed at any time; a dispatch queue polling the
/// directory picks one up on its next readiness check.
#[derive(Default)]
pub struct SinkDirectory {
    sinks: RwLock<HashMap<String, Arc<dyn ReportSink>>>,
}

impl SinkDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `sink` under `name`, replacing any previous one.
    pub fn install(&self, name: impl Into<String>, sink: Arc<dyn ReportSink>) {
        self.sinks.write().insert(name.into(), sink);
    }

    /// Unregister the sink under `name`.
    pub fn remove(&self, name: &str) -> Option<Arc<dyn ReportSink>> {
        self.sinks.write().remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.sinks.read().contains_key(name)
    }
}

impl SinkProvider for SinkDirectory {
    fn resolve(&self, name: &str) -> Option<Arc<dyn ReportSink>> {
        self.sinks.read().get(name).cloned()
    }
}
