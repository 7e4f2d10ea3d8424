//! Report commands: deferred calls to the analytics sink.

use std::fmt;

use serde::Serialize;
use serde_json::{json, Value};

/// Category for per-bid counters and values.
pub const BIDS_CATEGORY: &str = "Prebid.js Bids";
/// Category for load time histogram hits.
pub const LOAD_TIME_CATEGORY: &str = "Prebid.js Load Time Distribution";
/// Category for price histogram hits.
pub const CPM_CATEGORY: &str = "Prebid.js CPM Distribution";
/// Category for per-auction rollups.
pub const ROLLUP_CATEGORY: &str = "WDC_PREBID";
/// Base action for per-auction rollups; the experiment tag is appended.
pub const ROLLUP_ACTION: &str = "Bid Round Total";

const HIT_TYPE: &str = "event";

/// Event label: a bidder code, or the auction sequence number for rollups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Label {
    Text(String),
    Number(u64),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<u64> for Label {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

/// Per-hit options passed as the last positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HitOptions {
    pub non_interaction: bool,
}

impl HitOptions {
    /// Hits that must not count as user engagement.
    pub const NON_INTERACTION: Self = Self {
        non_interaction: true,
    };
}

/// One call to the analytics sink, captured by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportCommand {
    pub tracker_method: String,
    pub category: String,
    pub action: String,
    pub label: Label,
    pub value: Option<i64>,
    pub options: HitOptions,
}

impl ReportCommand {
    /// Build a non-interaction event hit.
    pub fn event(
        tracker_method: impl Into<String>,
        category: impl Into<String>,
        action: impl Into<String>,
        label: impl Into<Label>,
        value: Option<i64>,
    ) -> Self {
        Self {
            tracker_method: tracker_method.into(),
            category: category.into(),
            action: action.into(),
            label: label.into(),
            value,
            options: HitOptions::NON_INTERACTION,
        }
    }

    /// Positional arguments in call order:
    /// `[method, "event", category, action, label, value?, options]`.
    #[must_use]
    pub fn to_args(&self) -> Value {
        let mut args = vec![
            json!(self.tracker_method),
            json!(HIT_TYPE),
            json!(self.category),
            json!(self.action),
            json!(self.label),
        ];
        if let Some(value) = self.value {
            args.push(json!(value));
        }
        args.push(json!(self.options));
        Value::Array(args)
    }
}

/// Convert a price to whole minor currency units, truncating toward negative
/// infinity. Zero and NaN convert to 0.
#[must_use]
pub fn to_minor_units(price: f64) -> i64 {
    if price == 0.0 || price.is_nan() {
        return 0;
    }
    (price * 100.0).floor() as i64
}
