//! Adapter options and the resolved, read-only configuration.
//!
//! Options are parsed leniently: a key with the wrong type is treated as
//! absent instead of failing the whole structure.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Sink global used when neither the provider nor the options name one.
pub const DEFAULT_SINK_NAME: &str = "ga";

const SEND_METHOD: &str = "send";

/// Options passed at enablement, as supplied by the page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOptions {
    /// Named tracker; commands go to `<trackerName>.send`.
    #[serde(default, deserialize_with = "lenient")]
    pub tracker_name: Option<String>,
    /// Session sampling rate, usually as a stringified float.
    #[serde(default, deserialize_with = "lenient")]
    pub sampling: Option<SamplingValue>,
    /// Overrides the provider's sink name.
    #[serde(default, deserialize_with = "lenient")]
    pub global: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub enable_distribution: Option<bool>,
    #[serde(default, rename = "wdc_options", deserialize_with = "lenient")]
    pub metrics: Option<MetricFlags>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).ok())
}

// Per-key variant of `lenient`: a wrong-typed value takes the default.
fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Sampling rate as found in the options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SamplingValue {
    Number(f64),
    Text(String),
}

impl SamplingValue {
    /// Numeric rate. Text is read up to the end of its leading number, so
    /// `"0.5;"` is 0.5; text without one yields NaN, which never samples in.
    #[must_use]
    pub fn rate(&self) -> f64 {
        match self {
            Self::Number(rate) => *rate,
            Self::Text(text) => leading_float(text),
        }
    }
}

fn leading_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut at: usize| {
        while bytes.get(at).is_some_and(u8::is_ascii_digit) {
            at += 1;
        }
        at
    };

    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut end = digits_from(sign);
    let mut digits = end - sign;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digits += frac_end - (end + 1);
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return if s[sign..].starts_with("Infinity") {
            if s.starts_with('-') {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }
        } else {
            f64::NAN
        };
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + exp_sign);
        if exp_end > end + 1 + exp_sign {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Metrics that can be reported independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Request,
    Timeout,
    Response,
    Won,
    Timing,
    Rollup,
    RollupLog,
}

/// Per-metric switches. Everything is off unless set; a key with the wrong
/// type is off without affecting the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricFlags {
    #[serde(deserialize_with = "lenient_or_default")]
    pub bid_request: bool,
    #[serde(deserialize_with = "lenient_or_default")]
    pub bid_timeout: bool,
    #[serde(deserialize_with = "lenient_or_default")]
    pub bid_response: bool,
    #[serde(deserialize_with = "lenient_or_default")]
    pub bid_won: bool,
    #[serde(deserialize_with = "lenient_or_default")]
    pub bid_timing: bool,
    #[serde(deserialize_with = "lenient_or_default")]
    pub bid_rollup: bool,
    #[serde(deserialize_with = "lenient_or_default")]
    pub rollup_log: bool,
    /// Experiment tag appended to rollup actions.
    #[serde(deserialize_with = "lenient_or_default")]
    pub experiment: String,
}

impl MetricFlags {
    #[must_use]
    pub fn is_enabled(&self, kind: MetricKind) -> bool {
        match kind {
            MetricKind::Request => self.bid_request,
            MetricKind::Timeout => self.bid_timeout,
            MetricKind::Response => self.bid_response,
            MetricKind::Won => self.bid_won,
            MetricKind::Timing => self.bid_timing,
            MetricKind::Rollup => self.bid_rollup,
            MetricKind::RollupLog => self.rollup_log,
        }
    }
}

/// Configuration resolved once at enablement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsConfig {
    /// Name under which the sink is looked up.
    pub sink_name: String,
    /// First positional argument of every sink call.
    pub tracker_method: String,
    /// `None` means every session is sampled in.
    pub sampling_rate: Option<f64>,
    pub metrics: MetricFlags,
    pub distribution_enabled: bool,
}

impl AnalyticsConfig {
    /// Resolve options against the provider name, falling back to defaults
    /// for anything missing.
    #[must_use]
    pub fn resolve(provider: Option<&str>, options: &AnalyticsOptions) -> Self {
        let sink_name = options
            .global
            .as_deref()
            .or(provider)
            .unwrap_or(DEFAULT_SINK_NAME)
            .to_string();

        let tracker_method = match options.tracker_name.as_deref() {
            Some(tracker) if !tracker.is_empty() => format!("{tracker}.{SEND_METHOD}"),
            _ => SEND_METHOD.to_string(),
        };

        Self {
            sink_name,
            tracker_method,
            sampling_rate: options.sampling.as_ref().map(SamplingValue::rate),
            metrics: options.metrics.clone().unwrap_or_default(),
            distribution_enabled: options.enable_distribution.unwrap_or(false),
        }
    }

    #[must_use]
    pub fn is_enabled(&self, kind: MetricKind) -> bool {
        self.metrics.is_enabled(kind)
    }

    /// Experiment tag, if one is set.
    #[must_use]
    pub fn experiment(&self) -> Option<&str> {
        Some(self.metrics.experiment.as_str()).filter(|tag| !tag.is_empty())
    }

    /// Decide whether this session is sampled in, given a uniform draw in `[0, 1)`.
    #[must_use]
    pub fn is_sampled(&self, draw: f64) -> bool {
        self.sampling_rate.map_or(true, |rate| draw < rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AnalyticsOptions {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn defaults_without_options() {
        let config = AnalyticsConfig::resolve(None, &AnalyticsOptions::default());

        assert_eq!(config.sink_name, "ga");
        assert_eq!(config.tracker_method, "send");
        assert!(config.sampling_rate.is_none());
        assert!(!config.distribution_enabled);
        assert_eq!(config.metrics, MetricFlags::default());
        assert!(config.experiment().is_none());
    }

    #[test]
    fn tracker_name_prefixes_send() {
        let options = parse(r#"{"trackerName":"pbTracker"}"#);
        let config = AnalyticsConfig::resolve(Some("ga"), &options);
        assert_eq!(config.tracker_method, "pbTracker.send");
    }

    #[test]
    fn global_overrides_provider() {
        let options = parse(r#"{"global":"myGa"}"#);
        assert_eq!(AnalyticsConfig::resolve(Some("ga"), &options).sink_name, "myGa");
        assert_eq!(
            AnalyticsConfig::resolve(Some("custom"), &AnalyticsOptions::default()).sink_name,
            "custom"
        );
    }

    #[test]
    fn sampling_accepts_string_and_number() {
        let text = parse(r#"{"sampling":"0.25"}"#);
        let number = parse(r#"{"sampling":0.75}"#);

        assert_eq!(AnalyticsConfig::resolve(None, &text).sampling_rate, Some(0.25));
        assert_eq!(AnalyticsConfig::resolve(None, &number).sampling_rate, Some(0.75));
    }

    #[test]
    fn sampling_gate_uses_strict_comparison() {
        let config = AnalyticsConfig::resolve(None, &parse(r#"{"sampling":"1"}"#));
        assert!(config.is_sampled(0.0));
        assert!(config.is_sampled(0.999));

        let config = AnalyticsConfig::resolve(None, &parse(r#"{"sampling":"0"}"#));
        assert!(!config.is_sampled(0.0));

        let unsampled = AnalyticsConfig::resolve(None, &AnalyticsOptions::default());
        assert!(unsampled.is_sampled(0.999));
    }

    #[test]
    fn garbage_sampling_never_samples_in() {
        let config = AnalyticsConfig::resolve(None, &parse(r#"{"sampling":"often"}"#));
        assert!(!config.is_sampled(0.0));
    }

    #[test]
    fn wrong_types_fall_back_to_defaults() {
        let options = parse(r#"{"trackerName":42,"enableDistribution":"yes","wdc_options":"all","extra":true}"#);
        assert_eq!(options, AnalyticsOptions::default());
    }

    #[test]
    fn wrong_typed_flag_only_drops_that_flag() {
        let options =
            parse(r#"{"wdc_options":{"bid_won":true,"bid_request":true,"experiment":null}}"#);
        let config = AnalyticsConfig::resolve(None, &options);
        assert!(config.is_enabled(MetricKind::Won));
        assert!(config.is_enabled(MetricKind::Request));
        assert!(config.experiment().is_none());

        let options = parse(r#"{"wdc_options":{"bid_won":true,"bid_timeout":1}}"#);
        let config = AnalyticsConfig::resolve(None, &options);
        assert!(config.is_enabled(MetricKind::Won));
        assert!(!config.is_enabled(MetricKind::Timeout));
    }

    #[test]
    fn sampling_text_reads_leading_number() {
        let rate = |text: &str| SamplingValue::Text(text.into()).rate();

        assert_eq!(rate("0.5;"), 0.5);
        assert_eq!(rate("  .25 of sessions"), 0.25);
        assert_eq!(rate("1."), 1.0);
        assert_eq!(rate("5e-1x"), 0.5);
        assert_eq!(rate("1e"), 1.0);
        assert_eq!(rate("-0.5"), -0.5);
        assert_eq!(rate("Infinity"), f64::INFINITY);
        assert!(rate(".").is_nan());
        assert!(rate("often").is_nan());
        assert!(rate("").is_nan());
    }

    #[test]
    fn partial_metric_flags_default_to_off() {
        let options = parse(r#"{"wdc_options":{"bid_won":true,"experiment":"b"}}"#);
        let config = AnalyticsConfig::resolve(None, &options);

        assert!(config.is_enabled(MetricKind::Won));
        assert!(!config.is_enabled(MetricKind::Request));
        assert!(!config.is_enabled(MetricKind::Rollup));
        assert_eq!(config.experiment(), Some("b"));
    }
}
