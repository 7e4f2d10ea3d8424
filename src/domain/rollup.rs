//! Per-auction rollup of the best price seen for each placement.
//!
//! The aggregator is reset when an auction starts and summarized, then
//! cleared, when it ends. It also keeps a ledger of the auction's bids for
//! the optional rollup log.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use super::event::BidResponse;

/// Placement naming convention counted toward the rollup total by default.
pub const DEFAULT_PLACEMENT_MARKER: &str = "gpt-ad";

/// Decides whether a placement's best price counts toward the rollup total.
pub type PlacementFilter = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Filter matching placements whose code contains `marker`.
pub fn marker_filter(marker: impl Into<String>) -> PlacementFilter {
    let marker = marker.into();
    Arc::new(move |placement: &str| placement.contains(marker.as_str()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollupPhase {
    /// No auction in progress.
    Idle,
    /// Between auction init and auction end.
    Accumulating,
}

/// Result of closing one auction.
#[derive(Debug, Clone, PartialEq)]
pub struct RollupSummary {
    /// 1-based auction sequence number.
    pub sequence: u64,
    /// Sum of best prices over matching placements.
    pub total_cpm: f64,
    /// Placements tracked during the auction, matching or not.
    pub placements: usize,
}

/// One bid of the finished auction, as shown in the rollup log.
#[derive(Debug, Clone, PartialEq)]
pub struct AuctionBidRow {
    pub ad_unit_code: String,
    pub ad_id: Option<String>,
    pub bidder: Option<String>,
    pub time_to_respond: Option<i64>,
    pub cpm: f64,
    pub status_message: Option<String>,
    /// Whether a win has been seen for this bid's ad id so far.
    pub rendered: bool,
}

pub struct RollupAggregator {
    best_cpm: HashMap<String, f64>,
    sequence: u64,
    phase: RollupPhase,
    filter: PlacementFilter,
    ledger: Vec<BidResponse>,
    winners: HashSet<String>,
}

impl RollupAggregator {
    #[must_use]
    pub fn new(filter: PlacementFilter) -> Self {
        Self {
            best_cpm: HashMap::new(),
            sequence: 0,
            phase: RollupPhase::Idle,
            filter,
            ledger: Vec::new(),
            winners: HashSet::new(),
        }
    }

    /// Start a new auction, discarding anything tracked since the last one.
    ///
    /// Ad ids are unique per bid, so wins recorded before this point can
    /// never match a bid of the new auction.
    pub fn begin_auction(&mut self) {
        self.best_cpm.clear();
        self.ledger.clear();
        self.winners.clear();
        self.phase = RollupPhase::Accumulating;
    }

    /// Keep the higher of the tracked and the new price for a placement.
    /// Non-positive prices are ignored.
    pub fn record_best(&mut self, ad_unit_code: &str, cpm: f64) {
        if cpm.is_nan() || cpm <= 0.0 {
            return;
        }
        self.best_cpm
            .entry(ad_unit_code.to_string())
            .and_modify(|best| *best = best.max(cpm))
            .or_insert(cpm);
    }

    /// Add a response to the auction ledger.
    pub fn record_bid(&mut self, bid: &BidResponse) {
        self.ledger.push(bid.clone());
    }

    /// Remember a winning ad id until the next auction starts.
    pub fn record_win(&mut self, ad_id: &str) {
        self.winners.insert(ad_id.to_string());
    }

    /// Close the auction: sum matching placements, advance the sequence
    /// number and clear the tracked prices.
    pub fn finish_auction(&mut self) -> RollupSummary {
        let total_cpm: f64 = self
            .best_cpm
            .iter()
            .filter(|(placement, _)| (self.filter)(placement.as_str()))
            .map(|(_, cpm)| cpm)
            .sum();
        let placements = self.best_cpm.len();

        self.sequence += 1;
        self.best_cpm.clear();
        self.phase = RollupPhase::Idle;

        RollupSummary {
            sequence: self.sequence,
            total_cpm,
            placements,
        }
    }

    /// Drain the auction ledger into log rows.
    pub fn take_auction_rows(&mut self) -> Vec<AuctionBidRow> {
        let winners = &self.winners;
        self.ledger
            .drain(..)
            .map(|bid| {
                let rendered = bid
                    .ad_id
                    .as_deref()
                    .is_some_and(|ad_id| winners.contains(ad_id));
                AuctionBidRow {
                    ad_unit_code: bid.ad_unit_code,
                    ad_id: bid.ad_id,
                    bidder: bid.bidder_code,
                    time_to_respond: bid.time_to_respond,
                    cpm: bid.cpm,
                    status_message: bid.status_message,
                    rendered,
                }
            })
            .collect()
    }

    #[must_use]
    pub fn best_cpm(&self, ad_unit_code: &str) -> Option<f64> {
        self.best_cpm.get(ad_unit_code).copied()
    }

    #[must_use]
    pub fn tracked_placements(&self) -> usize {
        self.best_cpm.len()
    }

    /// Winning ad ids held for the current auction's rollup log.
    #[must_use]
    pub fn tracked_winners(&self) -> usize {
        self.winners.len()
    }

    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    #[must_use]
    pub fn phase(&self) -> RollupPhase {
        self.phase
    }
}

impl Default for RollupAggregator {
    fn default() -> Self {
        Self::new(marker_filter(DEFAULT_PLACEMENT_MARKER))
    }
}

impl fmt::Debug for RollupAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RollupAggregator")
            .field("best_cpm", &self.best_cpm)
            .field("sequence", &self.sequence)
            .field("phase", &self.phase)
            .field("ledger", &self.ledger.len())
            .field("winners", &self.winners.len())
            .finish()
    }
}
