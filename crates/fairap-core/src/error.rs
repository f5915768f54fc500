//! Scenario configuration errors.

use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or normalizing a scenario.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize scenario: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unknown application class: {0}")]
    UnknownAppClass(String),

    #[error("scenario needs at least one access point")]
    NoAccessPoints,

    #[error("scenario needs at least one terminal")]
    NoTerminals,

    #[error("invalid default RTT for AP {ap}: {rtt_ms}")]
    InvalidRtt { ap: usize, rtt_ms: f64 },

    #[error("fixed-point scale must be finite and positive, got {0}")]
    InvalidScale(f64),
}
