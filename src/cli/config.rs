//! Handler for the `config` command group.

use serde_json::json;

use crate::app::Config;
use crate::domain::AnalyticsConfig;
use crate::error::Result;

/// Execute `config show`.
pub fn execute_show(config: &Config) -> Result<()> {
    let analytics = &config.analytics;
    let resolved = AnalyticsConfig::resolve(analytics.provider.as_deref(), &analytics.options);

    let view = json!({
        "logging": {
            "level": config.logging.level,
            "format": config.logging.format,
        },
        "analytics": resolved,
        "rollup_placement_marker": analytics.rollup_placement_marker,
    });
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
