//! fairap-metrics: RTT measurement collection for FairAP.
//!
//! Samples arrive from whatever reports RTTs (a simulator, a probe
//! agent) before the optimizer runs. The collector keeps them append-only
//! and, once collection is over, folds the per-AP mean into each access
//! point's baseline RTT.
//!
//! # Architecture
//!
//! ```text
//! MeasurementCollector
//!   ├── record_sample() ← called per RTT report
//!   ├── summary()       → count / mean / min / max per AP
//!   └── fold_into()     → overwrites AccessPoint baselines with means
//! ```

pub mod collector;
pub mod error;

pub use collector::{MeasurementCollector, RttSummary};
pub use error::{MetricsError, MetricsResult};
