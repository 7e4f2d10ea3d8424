//! Rollup log rendered as a table.

use tabled::{Table, Tabled};
use tracing::{info, warn};

use crate::domain::AuctionBidRow;
use crate::port::DiagnosticSink;

const MISSING: &str = "-";

#[derive(Tabled)]
struct BidRow {
    #[tabled(rename = "Ad Unit")]
    ad_unit: String,
    #[tabled(rename = "Ad Id")]
    ad_id: String,
    #[tabled(rename = "Bidder")]
    bidder: String,
    #[tabled(rename = "Time (ms)")]
    time: String,
    #[tabled(rename = "CPM")]
    cpm: f64,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Rendered")]
    rendered: bool,
}

impl From<&AuctionBidRow> for BidRow {
    fn from(row: &AuctionBidRow) -> Self {
        Self {
            ad_unit: row.ad_unit_code.clone(),
            ad_id: row.ad_id.clone().unwrap_or_else(|| MISSING.into()),
            bidder: row.bidder.clone().unwrap_or_else(|| MISSING.into()),
            time: row
                .time_to_respond
                .map_or_else(|| MISSING.into(), |ms| ms.to_string()),
            cpm: row.cpm,
            status: row.status_message.clone().unwrap_or_else(|| MISSING.into()),
            rendered: row.rendered,
        }
    }
}

/// Render auction rows as a text table.
#[must_use]
pub fn render_auction_table(rows: &[AuctionBidRow]) -> String {
    Table::new(rows.iter().map(BidRow::from)).to_string()
}

/// Emits the rollup log through tracing.
pub struct TableDiagnostics;

impl DiagnosticSink for TableDiagnostics {
    fn auction_summary(&self, rows: &[AuctionBidRow]) {
        let table = render_auction_table(rows);
        info!(bids = rows.len(), "Auction summary\n{table}");
    }

    fn empty_auction(&self) {
        warn!("Auction had no responses");
    }
}
