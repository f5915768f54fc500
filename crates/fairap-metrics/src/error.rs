//! Measurement collection errors.

use thiserror::Error;

/// Result type alias for collector operations.
pub type MetricsResult<T> = Result<T, MetricsError>;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("sample references unknown AP {ap_id} (collector tracks {ap_count} APs)")]
    UnknownAccessPoint { ap_id: usize, ap_count: usize },

    #[error("invalid RTT sample for AP {ap_id}: {rtt_ms}")]
    InvalidRtt { ap_id: usize, rtt_ms: f64 },

    #[error("collector tracks {expected} APs but {actual} were supplied")]
    ApCountMismatch { expected: usize, actual: usize },
}
