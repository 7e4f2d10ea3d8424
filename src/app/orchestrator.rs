//! Adapter enablement and event subscription.
//!
//! [`AnalyticsAdapter::enable`] runs once per adapter. It resolves the
//! options, draws the session sample, replays the bus history into a fresh
//! [`AnalyticsSession`] and subscribes it to live events. Later calls only
//! log.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::Rng;
use tracing::info;

use crate::app::session::{AnalyticsSession, SessionHandler};
use crate::domain::{
    marker_filter, AnalyticsConfig, AnalyticsOptions, PlacementFilter, DEFAULT_PLACEMENT_MARKER,
};
use crate::port::{DiagnosticSink, EventBus, SinkProvider};

/// Outcome of an [`AnalyticsAdapter::enable`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enablement {
    /// Sampled in: history replayed and live events subscribed.
    Enabled,
    /// Sampled out: nothing subscribed, nothing will be reported.
    SampledOut,
    /// A previous call already enabled the adapter; nothing changed.
    AlreadyEnabled,
}

type Sampler = Box<dyn FnMut() -> f64 + Send>;

pub struct AnalyticsAdapter {
    bus: Arc<dyn EventBus>,
    sinks: Arc<dyn SinkProvider>,
    placement_filter: PlacementFilter,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
    sampler: Sampler,
    enabled: bool,
    config: Option<AnalyticsConfig>,
    session: Option<Arc<Mutex<AnalyticsSession>>>,
}

impl AnalyticsAdapter {
    /// Create a disabled adapter bound to an event bus and a sink lookup.
    pub fn new(bus: Arc<dyn EventBus>, sinks: Arc<dyn SinkProvider>) -> Self {
        Self {
            bus,
            sinks,
            placement_filter: marker_filter(DEFAULT_PLACEMENT_MARKER),
            diagnostics: None,
            sampler: Box::new(|| rand::thread_rng().gen::<f64>()),
            enabled: false,
            config: None,
            session: None,
        }
    }

    /// Decide which placements count toward the rollup total.
    #[must_use]
    pub fn with_placement_filter(mut self, filter: PlacementFilter) -> Self {
        self.placement_filter = filter;
        self
    }

    /// Send rollup logs to `diagnostics`.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Replace the uniform `[0, 1)` draw used for session sampling.
    #[must_use]
    pub fn with_sampler(mut self, sampler: impl FnMut() -> f64 + Send + 'static) -> Self {
        self.sampler = Box::new(sampler);
        self
    }

    /// Enable reporting. Only the first call has any effect.
    pub fn enable(&mut self, provider: Option<&str>, options: &AnalyticsOptions) -> Enablement {
        if self.enabled {
            info!("Analytics adapter already enabled, unnecessary call to enable");
            return Enablement::AlreadyEnabled;
        }
        self.enabled = true;

        let config = AnalyticsConfig::resolve(provider, options);
        self.config = Some(config.clone());

        if !config.is_sampled((self.sampler)()) {
            info!(
                sampling = ?config.sampling_rate,
                "Analytics disabled by sampling"
            );
            return Enablement::SampledOut;
        }

        info!(
            sink = %config.sink_name,
            tracker = %config.tracker_method,
            distribution = config.distribution_enabled,
            "Analytics adapter enabled"
        );

        let session = Arc::new(Mutex::new(AnalyticsSession::new(
            config,
            Arc::clone(&self.sinks),
            Arc::clone(&self.placement_filter),
            self.diagnostics.clone(),
        )));

        // Live events published during the replay wait on the session lock
        // and are handled after it, in order.
        {
            let mut guard = session.lock();
            let history = self
                .bus
                .subscribe_with_history(Arc::new(SessionHandler::new(Arc::clone(&session))));
            info!(events = history.len(), "Replaying recorded events");
            for event in &history {
                guard.handle(event);
            }
        }
        self.session = Some(session);

        Enablement::Enabled
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Method name passed as the first argument of every sink call, once
    /// the adapter has been enabled.
    #[must_use]
    pub fn tracker_send(&self) -> Option<&str> {
        self.config.as_ref().map(|c| c.tracker_method.as_str())
    }

    /// Resolved configuration, once enabled.
    #[must_use]
    pub fn config(&self) -> Option<&AnalyticsConfig> {
        self.config.as_ref()
    }

    /// Inspect the live session. `None` before enablement or when sampled out.
    pub fn with_session<R>(&self, f: impl FnOnce(&AnalyticsSession) -> R) -> Option<R> {
        self.session.as_ref().map(|session| f(&*session.lock()))
    }
}
