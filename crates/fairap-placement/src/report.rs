//! Side-by-side comparison of the optimizer against the baselines, and
//! its human-readable rendering.

use rand::Rng;
use serde::Serialize;
use tracing::info;

use fairap_core::{AccessPoint, Terminal};

use crate::baseline::{greedy_assign, improvement_factor, random_assign};
use crate::error::PlacementResult;
use crate::evaluate::AssignmentResult;
use crate::optimizer::{OptimizedAssignment, OptimizerConfig, optimize};

/// The three solutions for one scenario and how they compare.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    /// Baseline RTT and capacity per AP after measurements were folded in.
    pub access_points: Vec<AccessPoint>,
    pub optimal: OptimizedAssignment,
    pub greedy: AssignmentResult,
    pub random: AssignmentResult,
    /// `optimal / greedy` harmonic mean; absent when greedy scores zero.
    pub greedy_improvement: Option<f64>,
    /// `optimal / random` harmonic mean; absent when random scores zero.
    pub random_improvement: Option<f64>,
}

/// Run the optimizer and both baselines on the same inputs.
pub fn compare<R: Rng + ?Sized>(
    aps: &[AccessPoint],
    terminals: &[Terminal],
    config: OptimizerConfig,
    rng: &mut R,
) -> PlacementResult<ComparisonReport> {
    let optimal = optimize(aps, terminals, config)?;
    let greedy = greedy_assign(aps, terminals)?;
    let random = random_assign(aps, terminals, rng)?;

    let greedy_improvement = improvement_factor(&optimal.result, &greedy);
    let random_improvement = improvement_factor(&optimal.result, &random);

    info!(
        optimal = optimal.result.harmonic_mean_satisfaction,
        greedy = greedy.harmonic_mean_satisfaction,
        random = random.harmonic_mean_satisfaction,
        greedy_improvement = ?greedy_improvement,
        random_improvement = ?random_improvement,
        "comparison complete"
    );

    Ok(ComparisonReport {
        access_points: aps.to_vec(),
        optimal,
        greedy,
        random,
        greedy_improvement,
        random_improvement,
    })
}

fn ratio_label(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => format!("{r:.3}x"),
        None => "n/a".to_string(),
    }
}

pub fn format_report(report: &ComparisonReport) -> String {
    let optimal = &report.optimal.result;
    let stats = &report.optimal.stats;
    let mut out = String::new();

    out.push_str("\n╔══════════════════════════════════════════╗\n");
    out.push_str("║  FairAP Assignment Report                ║\n");
    out.push_str("╠══════════════════════════════════════════╣\n");
    out.push_str(&format!("║  APs:        {:<28}║\n", report.access_points.len()));
    out.push_str(&format!("║  Terminals:  {:<28}║\n", optimal.terminal_count()));
    out.push_str(&format!("║  Candidates: {:<28}║\n", format!(
        "{} feasible / {} raw",
        stats.feasible_candidates, stats.raw_candidates
    )));
    out.push_str(&format!(
        "║  Search:     {:<28}║\n",
        format!("{:.1} ms", stats.elapsed.as_secs_f64() * 1000.0)
    ));
    out.push_str("╚══════════════════════════════════════════╝\n\n");

    out.push_str("Loads per AP:\n");
    out.push_str(&format!(
        "  {:<4} {:>8} {:>10} {:>10} {:>8} {:>8} {:>8}\n",
        "AP", "capacity", "rtt (ms)", "tp (KB/s)", "optimal", "greedy", "random"
    ));
    for (j, ap) in report.access_points.iter().enumerate() {
        let load = |r: &AssignmentResult| r.loads.loads().get(j).copied().unwrap_or(0);
        out.push_str(&format!(
            "  {:<4} {:>8} {:>10.2} {:>10.2} {:>8} {:>8} {:>8}\n",
            ap.id,
            ap.capacity,
            ap.baseline_rtt_ms,
            ap.baseline_throughput_kbps,
            load(optimal),
            load(&report.greedy),
            load(&report.random),
        ));
    }
    out.push('\n');

    out.push_str("Performance under optimal loads:\n");
    for perf in &report.optimal.performance {
        out.push_str(&format!(
            "  AP {:<3} load {:<5} rtt {:>8.2} ms   tp {:>8.2} KB/s\n",
            perf.ap_id, perf.load, perf.rtt_ms, perf.throughput_kbps
        ));
    }
    out.push('\n');

    out.push_str("Satisfaction:\n");
    out.push_str(&format!(
        "  {:<9} {:>14} {:>12} {:>12}\n",
        "", "harmonic mean", "sum", "min"
    ));
    for (label, result) in [
        ("optimal", optimal),
        ("greedy", &report.greedy),
        ("random", &report.random),
    ] {
        out.push_str(&format!(
            "  {:<9} {:>14.4} {:>12.4} {:>12.4}\n",
            label,
            result.harmonic_mean_satisfaction,
            result.sum_satisfaction,
            result.min_satisfaction
        ));
    }
    out.push('\n');

    out.push_str("Improvement factor:\n");
    out.push_str(&format!("  vs greedy: {}\n", ratio_label(report.greedy_improvement)));
    out.push_str(&format!("  vs random: {}\n", ratio_label(report.random_improvement)));

    out
}
