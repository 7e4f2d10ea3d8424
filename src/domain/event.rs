//! Auction lifecycle events as published by the event bus.
//!
//! Events arrive as JSON objects tagged by `"event"`, using the camelCase
//! field names of the ad-serving runtime that produces them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single auction lifecycle event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum AuctionEvent {
    /// A bidder was asked for bids.
    BidRequested(BidRequest),
    /// A bidder answered with a bid.
    BidResponse(BidResponse),
    /// One or more bidders failed to answer in time.
    BidTimeout(BidTimeout),
    /// A bid won its slot and was rendered.
    BidWon(BidWon),
    /// A new auction started.
    AuctionInit,
    /// The current auction finished.
    AuctionEnd,
}

impl AuctionEvent {
    /// The kind of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::BidRequested(_) => EventKind::BidRequested,
            Self::BidResponse(_) => EventKind::BidResponse,
            Self::BidTimeout(_) => EventKind::BidTimeout,
            Self::BidWon(_) => EventKind::BidWon,
            Self::AuctionInit => EventKind::AuctionInit,
            Self::AuctionEnd => EventKind::AuctionEnd,
        }
    }
}

/// Discriminant of [`AuctionEvent`], used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    BidRequested,
    BidResponse,
    BidTimeout,
    BidWon,
    AuctionInit,
    AuctionEnd,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BidRequested => "bidRequested",
            Self::BidResponse => "bidResponse",
            Self::BidTimeout => "bidTimeout",
            Self::BidWon => "bidWon",
            Self::AuctionInit => "auctionInit",
            Self::AuctionEnd => "auctionEnd",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidRequest {
    #[serde(default)]
    pub bidder_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidResponse {
    #[serde(default)]
    pub bidder_code: Option<String>,
    #[serde(default)]
    pub cpm: f64,
    /// Milliseconds between request and response, when the runtime measured it.
    #[serde(default)]
    pub time_to_respond: Option<i64>,
    #[serde(default)]
    pub ad_unit_code: String,
    #[serde(default)]
    pub ad_id: Option<String>,
    #[serde(default)]
    pub status_message: Option<String>,
}

/// Bidders that timed out, in the order the runtime reported them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidTimeout {
    #[serde(default)]
    pub bidder_codes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidWon {
    #[serde(default)]
    pub bidder_code: Option<String>,
    #[serde(default)]
    pub cpm: f64,
    #[serde(default)]
    pub ad_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_response() {
        let json = r#"{"event":"bidResponse","bidderCode":"acme","cpm":1.25,"timeToRespond":340,"adUnitCode":"div-gpt-ad-1"}"#;
        let event: AuctionEvent = serde_json::from_str(json).unwrap();

        let AuctionEvent::BidResponse(bid) = event else {
            panic!("expected a bid response");
        };
        assert_eq!(bid.bidder_code.as_deref(), Some("acme"));
        assert_eq!(bid.time_to_respond, Some(340));
        assert_eq!(bid.ad_unit_code, "div-gpt-ad-1");
        assert!(bid.ad_id.is_none());
    }

    #[test]
    fn parses_unit_variants() {
        let init: AuctionEvent = serde_json::from_str(r#"{"event":"auctionInit"}"#).unwrap();
        let end: AuctionEvent = serde_json::from_str(r#"{"event":"auctionEnd"}"#).unwrap();

        assert_eq!(init.kind(), EventKind::AuctionInit);
        assert_eq!(end.kind(), EventKind::AuctionEnd);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let event: AuctionEvent = serde_json::from_str(r#"{"event":"bidWon"}"#).unwrap();
        assert_eq!(event, AuctionEvent::BidWon(BidWon::default()));
    }

    #[test]
    fn kind_display_matches_wire_tag() {
        assert_eq!(EventKind::BidTimeout.to_string(), "bidTimeout");
    }
}
