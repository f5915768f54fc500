//! Scenario file parser.
//!
//! A scenario bundles the static network description, optional optimizer
//! tuning, and any RTT samples recorded before the optimization pass.
//! Short per-AP and per-terminal lists are padded with defaults when the
//! scenario is normalized.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::types::{
    AccessPoint, AppClass, DEFAULT_AP_CAPACITY, DEFAULT_RTT_MS, MeasurementSample, Terminal,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub network: NetworkConfig,
    pub optimizer: Option<OptimizerSection>,
    pub samples: Option<Vec<SampleConfig>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub ap_count: usize,
    pub terminal_count: usize,
    #[serde(default)]
    pub capacities: Vec<usize>,
    #[serde(default)]
    pub default_rtt_ms: Vec<f64>,
    #[serde(default)]
    pub app_classes: Vec<AppClassEntry>,
}

/// An app class written either by name or by its legacy numeric code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AppClassEntry {
    Code(u8),
    Name(String),
}

impl AppClassEntry {
    pub fn resolve(&self) -> ConfigResult<AppClass> {
        match self {
            AppClassEntry::Code(code) => AppClass::from_code(*code)
                .ok_or_else(|| ConfigError::UnknownAppClass(code.to_string())),
            AppClassEntry::Name(name) => name.parse(),
        }
    }
}

impl From<AppClass> for AppClassEntry {
    fn from(class: AppClass) -> Self {
        AppClassEntry::Name(class.label().to_string())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizerSection {
    pub parallel: Option<bool>,
    pub fixed_point_scale: Option<f64>,
    pub max_candidates: Option<u64>,
    /// Seed for the random baseline. Unseeded runs draw from entropy.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SampleConfig {
    pub ap: usize,
    pub rtt_ms: f64,
}

impl From<SampleConfig> for MeasurementSample {
    fn from(sample: SampleConfig) -> Self {
        MeasurementSample {
            ap_id: sample.ap,
            rtt_ms: sample.rtt_ms,
        }
    }
}

/// A normalized scenario: every list padded to its full length.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub access_points: Vec<AccessPoint>,
    pub terminals: Vec<Terminal>,
}

impl Scenario {
    pub fn capacities(&self) -> Vec<usize> {
        self.access_points.iter().map(|ap| ap.capacity).collect()
    }

    pub fn total_capacity(&self) -> usize {
        self.access_points.iter().map(|ap| ap.capacity).sum()
    }
}

impl ScenarioConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scaffold a scenario with `aps` access points and `terminals`
    /// terminals cycling through every app class.
    pub fn scaffold(aps: usize, terminals: usize) -> Self {
        let per_ap = terminals.div_ceil(aps.max(1)) + 1;
        ScenarioConfig {
            network: NetworkConfig {
                ap_count: aps,
                terminal_count: terminals,
                capacities: vec![per_ap; aps],
                default_rtt_ms: (0..aps).map(|i| 20.0 + 10.0 * i as f64).collect(),
                app_classes: (0..terminals)
                    .map(|i| AppClass::ALL[i % AppClass::ALL.len()].into())
                    .collect(),
            },
            optimizer: Some(OptimizerSection {
                parallel: Some(true),
                fixed_point_scale: None,
                max_candidates: Some(5_000_000),
                seed: None,
            }),
            samples: None,
        }
    }

    /// Pad and validate the network section into concrete APs and terminals.
    pub fn scenario(&self) -> ConfigResult<Scenario> {
        let net = &self.network;
        if net.ap_count == 0 {
            return Err(ConfigError::NoAccessPoints);
        }
        if net.terminal_count == 0 {
            return Err(ConfigError::NoTerminals);
        }

        if net.capacities.len() < net.ap_count {
            debug!(
                configured = net.capacities.len(),
                ap_count = net.ap_count,
                "padding capacities with default"
            );
        }
        if net.default_rtt_ms.len() < net.ap_count {
            debug!(
                configured = net.default_rtt_ms.len(),
                ap_count = net.ap_count,
                "padding default RTTs with default"
            );
        }

        let mut access_points = Vec::with_capacity(net.ap_count);
        for id in 0..net.ap_count {
            let capacity = net.capacities.get(id).copied().unwrap_or(DEFAULT_AP_CAPACITY);
            let rtt_ms = net.default_rtt_ms.get(id).copied().unwrap_or(DEFAULT_RTT_MS);
            if !rtt_ms.is_finite() || rtt_ms <= 0.0 {
                return Err(ConfigError::InvalidRtt { ap: id, rtt_ms });
            }
            access_points.push(AccessPoint::new(id, capacity, rtt_ms));
        }

        if net.app_classes.len() < net.terminal_count {
            debug!(
                configured = net.app_classes.len(),
                terminal_count = net.terminal_count,
                "padding app classes with browser"
            );
        }
        let terminals = (0..net.terminal_count)
            .map(|id| {
                let class = match net.app_classes.get(id) {
                    Some(entry) => entry.resolve()?,
                    None => AppClass::default(),
                };
                Ok(Terminal::new(id, class))
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        if let Some(scale) = self.optimizer.as_ref().and_then(|o| o.fixed_point_scale) {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(ConfigError::InvalidScale(scale));
            }
        }

        Ok(Scenario {
            access_points,
            terminals,
        })
    }

    /// Recorded samples in file order.
    pub fn measurement_samples(&self) -> Vec<MeasurementSample> {
        self.samples
            .iter()
            .flatten()
            .map(|s| MeasurementSample::from(*s))
            .collect()
    }
}
