//! Load-dependent AP performance and terminal satisfaction.
//!
//! Each attached terminal adds a fixed RTT increment and removes a fixed
//! throughput decrement. Satisfaction is oriented so that larger is always
//! better:
//! - **Throughput-bound** classes: `throughput / required`
//! - **Latency-bound** classes: `required / rtt`

use serde::Serialize;

use fairap_core::{AccessPoint, MIN_THROUGHPUT, Requirement, Terminal};

/// Performance of one AP under a given load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApPerformance {
    pub ap_id: usize,
    pub load: usize,
    pub rtt_ms: f64,
    pub throughput_kbps: f64,
}

/// Performance of `ap` with `load` terminals attached.
pub fn current_performance(ap: &AccessPoint, load: usize) -> ApPerformance {
    let load_f = load as f64;
    let rtt_ms = ap.baseline_rtt_ms + ap.rtt_increment_ms * load_f;
    let throughput_kbps = (ap.baseline_throughput_kbps - ap.throughput_decrement_kbps * load_f)
        .max(MIN_THROUGHPUT);

    ApPerformance {
        ap_id: ap.id,
        load,
        rtt_ms,
        throughput_kbps,
    }
}

/// Performance of every AP under the given per-AP loads.
///
/// `loads` is indexed like `aps`; missing entries count as zero load.
pub fn performance_for_loads(aps: &[AccessPoint], loads: &[usize]) -> Vec<ApPerformance> {
    aps.iter()
        .enumerate()
        .map(|(j, ap)| current_performance(ap, loads.get(j).copied().unwrap_or(0)))
        .collect()
}

/// Satisfaction ratio of `terminal` when served with `perf`.
///
/// Above 1.0 means the terminal's need is met.
pub fn satisfaction(terminal: &Terminal, perf: &ApPerformance) -> f64 {
    match terminal.requirement() {
        Requirement::Throughput(required) => perf.throughput_kbps / required,
        Requirement::Latency(required) => required / perf.rtt_ms,
    }
}
