//! Diagnostic output port for the per-auction rollup log.

use crate::domain::AuctionBidRow;

/// Receives a read-only summary of every bid in a finished auction.
pub trait DiagnosticSink: Send + Sync {
    /// Called with the auction's bids when there was at least one.
    fn auction_summary(&self, rows: &[AuctionBidRow]);

    /// Called instead of [`auction_summary`](Self::auction_summary) when the
    /// auction had no responses.
    fn empty_auction(&self);
}
