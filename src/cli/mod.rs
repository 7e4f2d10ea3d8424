//! Command-line interface definitions.

pub mod bucket;
pub mod config;
pub mod replay;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Bidtrace - auction lifecycle analytics replay and inspection.
#[derive(Parser, Debug)]
#[command(name = "bidtrace")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a JSON-lines event log through the analytics adapter
    Replay(ReplayArgs),

    /// Show the distribution bucket for a measurement
    Bucket(BucketArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `bidtrace config`
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the resolved adapter configuration
    Show,
}

#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// Event log, one JSON event per line
    pub events: PathBuf,

    /// Publish this many events before enabling the adapter
    #[arg(long, default_value_t = 0)]
    pub enable_after: usize,

    /// Make the sink available after this many events (immediately if omitted)
    #[arg(long)]
    pub sink_ready_after: Option<usize>,

    /// Write sink calls to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct BucketArgs {
    /// Measurement kind
    #[arg(value_enum)]
    pub kind: BucketKind,

    /// Measured value (milliseconds or price)
    #[arg(allow_negative_numbers = true)]
    pub value: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum BucketKind {
    /// Response time in milliseconds
    Time,
    /// Bid price
    Cpm,
}
