//! Builders for auction lifecycle events used across tests.

use crate::domain::{AuctionEvent, BidRequest, BidResponse, BidTimeout, BidWon};

pub fn request(bidder: &str) -> AuctionEvent {
    AuctionEvent::BidRequested(BidRequest {
        bidder_code: Some(bidder.to_string()),
    })
}

/// A response without ad id or status message.
pub fn response(bidder: &str, cpm: f64, time_to_respond: Option<i64>, ad_unit: &str) -> AuctionEvent {
    AuctionEvent::BidResponse(BidResponse {
        bidder_code: Some(bidder.to_string()),
        cpm,
        time_to_respond,
        ad_unit_code: ad_unit.to_string(),
        ad_id: None,
        status_message: None,
    })
}

pub fn timeout(bidders: &[&str]) -> AuctionEvent {
    AuctionEvent::BidTimeout(BidTimeout {
        bidder_codes: bidders.iter().map(|b| b.to_string()).collect(),
    })
}

pub fn won(bidder: &str, cpm: f64) -> AuctionEvent {
    AuctionEvent::BidWon(BidWon {
        bidder_code: Some(bidder.to_string()),
        cpm,
        ad_id: None,
    })
}

pub fn auction_init() -> AuctionEvent {
    AuctionEvent::AuctionInit
}

pub fn auction_end() -> AuctionEvent {
    AuctionEvent::AuctionEnd
}
