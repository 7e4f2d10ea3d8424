//! Configuration file loading and validation for the `bidtrace` binary.
//!
//! The `[analytics]` table takes the same keys as the adapter options, plus
//! the sink provider name and the rollup placement marker.

use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::{marker_filter, AnalyticsOptions, PlacementFilter, DEFAULT_PLACEMENT_MARKER};
use crate::error::{ConfigError, Result};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub analytics: AnalyticsSection,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".into()
}

fn default_format() -> String {
    "pretty".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

/// Adapter settings read from the `[analytics]` table.
#[derive(Debug, Deserialize)]
pub struct AnalyticsSection {
    /// Sink global name handed to `enable`.
    #[serde(default)]
    pub provider: Option<String>,
    /// Placements whose code contains this marker count toward rollups.
    #[serde(default = "default_marker")]
    pub rollup_placement_marker: String,
    #[serde(flatten)]
    pub options: AnalyticsOptions,
}

fn default_marker() -> String {
    DEFAULT_PLACEMENT_MARKER.into()
}

impl Default for AnalyticsSection {
    fn default() -> Self {
        Self {
            provider: None,
            rollup_placement_marker: default_marker(),
            options: AnalyticsOptions::default(),
        }
    }
}

impl AnalyticsSection {
    #[must_use]
    pub fn placement_filter(&self) -> PlacementFilter {
        marker_filter(self.rollup_placement_marker.clone())
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some(sampling) = &self.analytics.options.sampling {
            let rate = sampling.rate();
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::InvalidValue {
                    field: "sampling",
                    reason: format!("expected a rate between 0 and 1, got {sampling:?}"),
                }
                .into());
            }
        }
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected \"json\" or \"pretty\", got {:?}", self.logging.format),
            }
            .into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).with_writer(std::io::stderr).init();
            }
            _ => {
                fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
            }
        }
    }
}
