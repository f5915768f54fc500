//! Shared types used across FairAP crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of access points in a scaffolded scenario.
pub const DEFAULT_ACCESS_POINTS: usize = 3;
/// Default number of terminals in a scaffolded scenario.
pub const DEFAULT_TERMINALS: usize = 100;
/// Capacity used when the configured capacity list is short.
pub const DEFAULT_AP_CAPACITY: usize = 1000;
/// Baseline RTT used when the configured RTT list is short.
pub const DEFAULT_RTT_MS: f64 = 50.0;

/// Numerator of the throughput model: `baseline_throughput = TP_NUMERATOR / baseline_rtt`.
pub const TP_NUMERATOR: f64 = 1023.0;
/// RTT added per terminal attached to an AP (ms).
pub const RTT_INCREASE_PER_TERMINAL: f64 = 5.0;
/// Throughput lost per terminal attached to an AP (KB/s).
pub const TP_DECREASE_PER_TERMINAL: f64 = 1.0;
/// Throughput never drops below this value (KB/s).
pub const MIN_THROUGHPUT: f64 = 0.01;

/// Application class run by a terminal.
///
/// The class fixes which metric the terminal cares about and how much of it
/// it needs. Browser and Video are throughput-bound, VoiceCall and
/// LiveStream are latency-bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppClass {
    #[default]
    Browser,
    Video,
    VoiceCall,
    LiveStream,
}

/// What a terminal's requirement is measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Requirement {
    /// Minimum throughput in KB/s.
    Throughput(f64),
    /// Maximum acceptable RTT in ms.
    Latency(f64),
}

impl Requirement {
    pub fn threshold(&self) -> f64 {
        match self {
            Requirement::Throughput(v) | Requirement::Latency(v) => *v,
        }
    }
}

impl AppClass {
    pub const ALL: [AppClass; 4] = [
        AppClass::Browser,
        AppClass::Video,
        AppClass::VoiceCall,
        AppClass::LiveStream,
    ];

    pub fn requirement(&self) -> Requirement {
        match self {
            AppClass::Browser => Requirement::Throughput(5.0),
            AppClass::Video => Requirement::Throughput(10.0),
            AppClass::VoiceCall => Requirement::Latency(200.0),
            AppClass::LiveStream => Requirement::Latency(50.0),
        }
    }

    /// Legacy numeric code (1 = browser … 4 = live stream).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(AppClass::Browser),
            2 => Some(AppClass::Video),
            3 => Some(AppClass::VoiceCall),
            4 => Some(AppClass::LiveStream),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            AppClass::Browser => 1,
            AppClass::Video => 2,
            AppClass::VoiceCall => 3,
            AppClass::LiveStream => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppClass::Browser => "browser",
            AppClass::Video => "video",
            AppClass::VoiceCall => "voice_call",
            AppClass::LiveStream => "live_stream",
        }
    }
}

impl fmt::Display for AppClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AppClass {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "browser" => Ok(AppClass::Browser),
            "video" => Ok(AppClass::Video),
            "voice_call" | "voicecall" | "voice" => Ok(AppClass::VoiceCall),
            "live_stream" | "livestream" | "live" => Ok(AppClass::LiveStream),
            other => match other.parse::<u8>().ok().and_then(AppClass::from_code) {
                Some(class) => Ok(class),
                None => Err(ConfigError::UnknownAppClass(s.to_string())),
            },
        }
    }
}

/// A capacity-limited access point and its performance baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPoint {
    pub id: usize,
    /// Maximum number of terminals that may attach.
    pub capacity: usize,
    /// RTT with no terminals attached (ms).
    pub baseline_rtt_ms: f64,
    pub rtt_increment_ms: f64,
    /// Throughput with no terminals attached (KB/s).
    pub baseline_throughput_kbps: f64,
    pub throughput_decrement_kbps: f64,
}

impl AccessPoint {
    /// Build an AP with the default degradation model. Baseline throughput
    /// is derived from the baseline RTT.
    pub fn new(id: usize, capacity: usize, baseline_rtt_ms: f64) -> Self {
        Self {
            id,
            capacity,
            baseline_rtt_ms,
            rtt_increment_ms: RTT_INCREASE_PER_TERMINAL,
            baseline_throughput_kbps: throughput_for_rtt(baseline_rtt_ms),
            throughput_decrement_kbps: TP_DECREASE_PER_TERMINAL,
        }
    }

    /// Replace the baseline RTT (e.g. with a measured mean) and re-derive
    /// the baseline throughput from it.
    pub fn set_baseline_rtt(&mut self, rtt_ms: f64) {
        self.baseline_rtt_ms = rtt_ms;
        self.baseline_throughput_kbps = throughput_for_rtt(rtt_ms);
    }
}

/// Baseline throughput implied by a baseline RTT.
pub fn throughput_for_rtt(rtt_ms: f64) -> f64 {
    if rtt_ms > 0.0 {
        TP_NUMERATOR / rtt_ms
    } else {
        MIN_THROUGHPUT
    }
}

/// A client terminal. Ids are 0-based and their order is significant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Terminal {
    pub id: usize,
    pub app_class: AppClass,
}

impl Terminal {
    pub fn new(id: usize, app_class: AppClass) -> Self {
        Self { id, app_class }
    }

    pub fn requirement(&self) -> Requirement {
        self.app_class.requirement()
    }
}

/// One RTT observation reported for an AP.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSample {
    pub ap_id: usize,
    pub rtt_ms: f64,
}

/// Number of terminals bound to each AP in one candidate.
///
/// Slots are laid out contiguously: AP0's slots first, then AP1's, and so
/// on. See [`LoadDistribution::ap_for_slot`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadDistribution(Vec<usize>);

impl LoadDistribution {
    pub fn new(loads: Vec<usize>) -> Self {
        Self(loads)
    }

    pub fn loads(&self) -> &[usize] {
        &self.0
    }

    pub fn ap_count(&self) -> usize {
        self.0.len()
    }

    /// Total number of terminals placed.
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// True if no AP carries more than its capacity. APs beyond the end of
    /// `capacities` are treated as having zero capacity.
    pub fn fits(&self, capacities: &[usize]) -> bool {
        self.0
            .iter()
            .enumerate()
            .all(|(ap, &load)| load <= capacities.get(ap).copied().unwrap_or(0))
    }

    /// AP bound to the given slot under the contiguous-block layout.
    /// Returns `None` for a slot past the total load.
    pub fn ap_for_slot(&self, slot: usize) -> Option<usize> {
        let mut end = 0;
        for (ap, &load) in self.0.iter().enumerate() {
            end += load;
            if slot < end {
                return Some(ap);
            }
        }
        None
    }

    /// The full slot → AP table.
    pub fn slot_bindings(&self) -> Vec<usize> {
        (0..self.total())
            .filter_map(|slot| self.ap_for_slot(slot))
            .collect()
    }
}

impl From<Vec<usize>> for LoadDistribution {
    fn from(loads: Vec<usize>) -> Self {
        Self(loads)
    }
}
