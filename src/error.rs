use thiserror::Error;

/// Configuration-file errors with structured variants.
///
/// Adapter options themselves never fail to parse; these only come from
/// loading the binary's TOML file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised by a report sink while delivering a command.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("sink rejected command: {0}")]
    Rejected(String),

    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode command: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid event on line {line}: {reason}")]
    InvalidEvent { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
