//! Per-session analytics state and event routing.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::app::dispatch::DispatchQueue;
use crate::domain::{
    cpm_bucket, load_time_bucket, to_minor_units, AnalyticsConfig, AuctionEvent, BidRequest,
    BidResponse, BidTimeout, BidWon, Label, MetricKind, PlacementFilter, ReportCommand,
    RollupAggregator, BIDS_CATEGORY, CPM_CATEGORY, LOAD_TIME_CATEGORY, ROLLUP_ACTION,
    ROLLUP_CATEGORY,
};
use crate::port::{DiagnosticSink, EventHandler, SinkProvider};

const REQUESTS_ACTION: &str = "Requests";
const BIDS_ACTION: &str = "Bids";
const TIMEOUTS_ACTION: &str = "Timeouts";
const WINS_ACTION: &str = "Wins";
const LOAD_TIME_ACTION: &str = "Bid Load Time";

/// Everything one enabled adapter instance owns: the resolved config, the
/// dispatch queue and the auction rollup.
pub struct AnalyticsSession {
    config: AnalyticsConfig,
    queue: DispatchQueue,
    rollup: RollupAggregator,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
}

impl AnalyticsSession {
    #[must_use]
    pub fn new(
        config: AnalyticsConfig,
        sinks: Arc<dyn SinkProvider>,
        placement_filter: PlacementFilter,
        diagnostics: Option<Arc<dyn DiagnosticSink>>,
    ) -> Self {
        let queue = DispatchQueue::new(sinks, config.sink_name.clone());
        Self {
            config,
            queue,
            rollup: RollupAggregator::new(placement_filter),
            diagnostics,
        }
    }

    /// Route one event, then poll the sink once.
    pub fn handle(&mut self, event: &AuctionEvent) {
        match event {
            AuctionEvent::BidRequested(request) => self.on_bid_requested(request),
            AuctionEvent::BidResponse(bid) => self.on_bid_response(bid),
            AuctionEvent::BidTimeout(timeout) => self.on_bid_timeout(timeout),
            AuctionEvent::BidWon(won) => self.on_bid_won(won),
            AuctionEvent::AuctionInit => self.on_auction_init(),
            AuctionEvent::AuctionEnd => self.on_auction_end(),
        }
        self.queue.drain_if_ready();
    }

    #[must_use]
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    #[must_use]
    pub fn queue(&self) -> &DispatchQueue {
        &self.queue
    }

    #[must_use]
    pub fn rollup(&self) -> &RollupAggregator {
        &self.rollup
    }

    fn on_bid_requested(&mut self, request: &BidRequest) {
        if !self.config.is_enabled(MetricKind::Request) {
            return;
        }
        if let Some(bidder) = request.bidder_code.as_deref() {
            self.report(BIDS_CATEGORY, REQUESTS_ACTION, bidder, Some(1));
        }
    }

    fn on_bid_response(&mut self, bid: &BidResponse) {
        if self.config.is_enabled(MetricKind::RollupLog) {
            self.rollup.record_bid(bid);
        }

        let Some(bidder) = bid.bidder_code.as_deref() else {
            return;
        };
        let distribution = self.config.distribution_enabled;
        let timing = self.config.is_enabled(MetricKind::Timing);

        if self.config.is_enabled(MetricKind::Response) {
            if timing && distribution {
                let bucket = bid.time_to_respond.and_then(|ms| load_time_bucket(ms as f64));
                if let Some(bucket) = bucket {
                    self.report(LOAD_TIME_CATEGORY, bucket.label(), bidder, Some(1));
                }
            }

            if bid.cpm > 0.0 {
                if distribution {
                    if let Some(bucket) = cpm_bucket(bid.cpm) {
                        self.report(CPM_CATEGORY, bucket.label(), bidder, Some(1));
                    }
                }
                self.report(BIDS_CATEGORY, BIDS_ACTION, bidder, Some(to_minor_units(bid.cpm)));
            }
        }

        if timing {
            self.report(BIDS_CATEGORY, LOAD_TIME_ACTION, bidder, bid.time_to_respond);
        }

        if self.config.is_enabled(MetricKind::Rollup) {
            self.rollup.record_best(&bid.ad_unit_code, bid.cpm);
        }
    }

    fn on_bid_timeout(&mut self, timeout: &BidTimeout) {
        if !self.config.is_enabled(MetricKind::Timeout) {
            return;
        }
        for bidder in &timeout.bidder_codes {
            self.report(BIDS_CATEGORY, TIMEOUTS_ACTION, bidder.as_str(), None);
        }
    }

    fn on_bid_won(&mut self, won: &BidWon) {
        if self.config.is_enabled(MetricKind::RollupLog) {
            if let Some(ad_id) = won.ad_id.as_deref() {
                self.rollup.record_win(ad_id);
            }
        }

        if !self.config.is_enabled(MetricKind::Won) {
            return;
        }
        if let Some(bidder) = won.bidder_code.as_deref() {
            self.report(BIDS_CATEGORY, WINS_ACTION, bidder, Some(to_minor_units(won.cpm)));
        }
    }

    fn on_auction_init(&mut self) {
        debug!(
            sequence = self.rollup.sequence(),
            placements = self.rollup.tracked_placements(),
            "Auction init"
        );
        self.rollup.begin_auction();
    }

    fn on_auction_end(&mut self) {
        debug!(
            sequence = self.rollup.sequence(),
            placements = self.rollup.tracked_placements(),
            "Auction ended"
        );
        let summary = self.rollup.finish_auction();

        if self.config.is_enabled(MetricKind::Rollup) {
            let action = match self.config.experiment() {
                Some(tag) => format!("{ROLLUP_ACTION} {tag}"),
                None => ROLLUP_ACTION.to_string(),
            };
            debug!(
                sequence = summary.sequence,
                total_cpm = summary.total_cpm,
                placements = summary.placements,
                "Sending auction rollup"
            );
            self.report(
                ROLLUP_CATEGORY,
                action,
                Label::Number(summary.sequence),
                Some(to_minor_units(summary.total_cpm)),
            );
        }

        if self.config.is_enabled(MetricKind::RollupLog) {
            let rows = self.rollup.take_auction_rows();
            match &self.diagnostics {
                Some(diagnostics) if rows.is_empty() => diagnostics.empty_auction(),
                Some(diagnostics) => diagnostics.auction_summary(&rows),
                None => debug!(bids = rows.len(), "Auction summary without diagnostic sink"),
            }
        }
    }

    fn report(
        &mut self,
        category: &str,
        action: impl Into<String>,
        label: impl Into<Label>,
        value: Option<i64>,
    ) {
        let command = ReportCommand::event(
            self.config.tracker_method.as_str(),
            category,
            action,
            label,
            value,
        );
        self.queue.enqueue(command);
    }
}

impl fmt::Debug for AnalyticsSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyticsSession")
            .field("config", &self.config)
            .field("queue", &self.queue)
            .field("rollup", &self.rollup)
            .field("diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}

/// Bus subscriber feeding a shared session.
pub(crate) struct SessionHandler {
    session: Arc<Mutex<AnalyticsSession>>,
}

impl SessionHandler {
    pub(crate) fn new(session: Arc<Mutex<AnalyticsSession>>) -> Self {
        Self { session }
    }
}

impl EventHandler for SessionHandler {
    fn handle(&self, event: &AuctionEvent) {
        self.session.lock().handle(event);
    }
}
