use std::fs;

use bidtrace::app::Config;
use bidtrace::domain::{AnalyticsConfig, MetricKind, SamplingValue};
use bidtrace::error::{ConfigError, Error};
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("bidtrace.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn config_loads_full_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[logging]
level = "debug"
format = "json"

[analytics]
provider = "ga"
global = "pageGa"
trackerName = "pb"
sampling = 0.25
enableDistribution = "yes"

[analytics.wdc_options]
bid_request = true
bid_timing = true
"#,
    );

    let config = Config::load(&path).expect("config loads");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.analytics.options.sampling, Some(SamplingValue::Number(0.25)));

    let resolved =
        AnalyticsConfig::resolve(config.analytics.provider.as_deref(), &config.analytics.options);
    assert_eq!(resolved.sink_name, "pageGa");
    assert_eq!(resolved.tracker_method, "pb.send");
    assert!(resolved.is_enabled(MetricKind::Request));
    assert!(resolved.is_enabled(MetricKind::Timing));
    assert!(!resolved.is_enabled(MetricKind::Won));
    // Non-boolean values are ignored, not fatal.
    assert!(!resolved.distribution_enabled);
}

#[test]
fn config_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let result = Config::load(dir.path().join("missing.toml"));

    match result {
        Err(Error::Config(ConfigError::ReadFile(_))) => {}
        Err(err) => panic!("Expected read error, got {err}"),
        Ok(_) => panic!("Expected missing file to fail"),
    }
}

#[test]
fn config_rejects_negative_sampling() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[analytics]\nsampling = -0.1\n");

    match Config::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "sampling",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid sampling error, got {err}"),
        Ok(_) => panic!("Expected negative sampling to be rejected"),
    }
}

#[test]
fn config_rejects_unparseable_sampling_text() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[analytics]\nsampling = \"half\"\n");

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "sampling",
            ..
        }))
    ));
}
