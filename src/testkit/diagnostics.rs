//! Diagnostic sink stub capturing rollup logs.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::AuctionBidRow;
use crate::port::DiagnosticSink;

#[derive(Clone, Default)]
pub struct RecordingDiagnostics {
    summaries: Arc<Mutex<Vec<Vec<AuctionBidRow>>>>,
    empty: Arc<Mutex<usize>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows of every non-empty auction summary, oldest first.
    pub fn summaries(&self) -> Vec<Vec<AuctionBidRow>> {
        self.summaries.lock().clone()
    }

    /// Number of auctions reported without responses.
    pub fn empty_auctions(&self) -> usize {
        *self.empty.lock()
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn auction_summary(&self, rows: &[AuctionBidRow]) {
        self.summaries.lock().push(rows.to_vec());
    }

    fn empty_auction(&self) {
        *self.empty.lock() += 1;
    }
}
