//! Type conversions between scenario configuration and optimizer types.
//!
//! Bridges `fairap_core::OptimizerSection` (all fields optional, as read
//! from TOML) to the concrete [`OptimizerConfig`].

use fairap_core::config::OptimizerSection;

use crate::optimizer::OptimizerConfig;

/// Convert an optional [`OptimizerSection`] to an [`OptimizerConfig`],
/// filling unset fields with defaults.
pub fn section_to_config(section: Option<&OptimizerSection>) -> OptimizerConfig {
    let defaults = OptimizerConfig::default();
    let Some(section) = section else {
        return defaults;
    };
    OptimizerConfig {
        parallel: section.parallel.unwrap_or(defaults.parallel),
        fixed_point_scale: section
            .fixed_point_scale
            .unwrap_or(defaults.fixed_point_scale),
        max_candidates: section.max_candidates.or(defaults.max_candidates),
    }
}

/// Seed for the random baseline: an explicit override beats the scenario's.
pub fn random_seed(section: Option<&OptimizerSection>, override_seed: Option<u64>) -> Option<u64> {
    override_seed.or_else(|| section.and_then(|s| s.seed))
}
