//! Sink-agnostic domain logic: events, buckets, commands, options, rollups.

pub mod bucket;
mod command;
mod event;
mod options;
mod rollup;

pub use bucket::{cpm_bucket, load_time_bucket, CpmBucket, LoadTimeBucket};
pub use command::{
    to_minor_units, HitOptions, Label, ReportCommand, BIDS_CATEGORY, CPM_CATEGORY,
    LOAD_TIME_CATEGORY, ROLLUP_ACTION, ROLLUP_CATEGORY,
};
pub use event::{AuctionEvent, BidRequest, BidResponse, BidTimeout, BidWon, EventKind};
pub use options::{
    AnalyticsConfig, AnalyticsOptions, MetricFlags, MetricKind, SamplingValue,
    DEFAULT_SINK_NAME,
};
pub use rollup::{
    marker_filter, AuctionBidRow, PlacementFilter, RollupAggregator, RollupPhase, RollupSummary,
    DEFAULT_PLACEMENT_MARKER,
};
