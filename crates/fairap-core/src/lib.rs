//! fairap-core: shared types and scenario configuration for FairAP.
//!
//! Holds the data model consumed by the optimizer (access points,
//! terminals, app classes, load distributions, measurement samples) and the
//! TOML scenario format that feeds it.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Scenario, ScenarioConfig};
pub use error::{ConfigError, ConfigResult};
pub use types::*;
