//! Per-distribution evaluation.
//!
//! For one load distribution: compute every AP's loaded performance, build
//! the slot × terminal satisfaction matrix, match slots to terminals with
//! the Hungarian solver, and score the matching.

use serde::Serialize;
use tracing::trace;

use fairap_core::{AccessPoint, LoadDistribution, Terminal};

use crate::error::{PlacementError, PlacementResult};
use crate::hungarian::{max_weight_matching, to_fixed_point};
use crate::performance::{ApPerformance, performance_for_loads, satisfaction};

/// A complete terminal → AP assignment and its aggregate scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentResult {
    /// `terminal_to_ap[t]` is the AP serving terminal `t`.
    pub terminal_to_ap: Vec<usize>,
    /// Per-terminal satisfaction, indexed like `terminal_to_ap`.
    pub satisfactions: Vec<f64>,
    /// Terminals attached to each AP.
    pub loads: LoadDistribution,
    pub sum_satisfaction: f64,
    pub min_satisfaction: f64,
    pub harmonic_mean_satisfaction: f64,
}

impl AssignmentResult {
    /// Aggregate per-terminal satisfactions into a result.
    pub fn from_satisfactions(
        terminal_to_ap: Vec<usize>,
        satisfactions: Vec<f64>,
        loads: LoadDistribution,
    ) -> Self {
        let sum_satisfaction = satisfactions.iter().sum();
        let min_satisfaction = satisfactions.iter().copied().fold(f64::INFINITY, f64::min);
        let min_satisfaction = if satisfactions.is_empty() { 0.0 } else { min_satisfaction };
        let harmonic_mean_satisfaction = harmonic_mean(&satisfactions);
        Self {
            terminal_to_ap,
            satisfactions,
            loads,
            sum_satisfaction,
            min_satisfaction,
            harmonic_mean_satisfaction,
        }
    }

    pub fn terminal_count(&self) -> usize {
        self.terminal_to_ap.len()
    }

    /// Arithmetic mean satisfaction.
    pub fn mean_satisfaction(&self) -> f64 {
        if self.satisfactions.is_empty() {
            0.0
        } else {
            self.sum_satisfaction / self.satisfactions.len() as f64
        }
    }
}

/// `n / Σ(1/x)`. Any value at or below zero drives the mean to zero, as
/// does an empty input.
pub fn harmonic_mean(values: &[f64]) -> f64 {
    if values.is_empty() || values.iter().any(|&v| v <= 0.0) {
        return 0.0;
    }
    let reciprocal_sum: f64 = values.iter().map(|v| 1.0 / v).sum();
    values.len() as f64 / reciprocal_sum
}

/// Score a fixed terminal → AP map: loads are counted from the map and
/// each terminal is scored against its AP's loaded performance.
///
/// The map must have one entry per terminal, each naming an existing AP.
pub fn score_assignment(
    aps: &[AccessPoint],
    terminals: &[Terminal],
    terminal_to_ap: Vec<usize>,
) -> PlacementResult<AssignmentResult> {
    if terminal_to_ap.len() != terminals.len() {
        return Err(PlacementError::LoadMismatch {
            placed: terminal_to_ap.len(),
            terminals: terminals.len(),
        });
    }
    let mut loads = vec![0usize; aps.len()];
    for (terminal, &ap) in terminal_to_ap.iter().enumerate() {
        let Some(load) = loads.get_mut(ap) else {
            return Err(PlacementError::UnknownAccessPoint {
                terminal,
                ap,
                ap_count: aps.len(),
            });
        };
        *load += 1;
    }
    let perf = performance_for_loads(aps, &loads);
    let satisfactions = terminals
        .iter()
        .zip(&terminal_to_ap)
        .map(|(terminal, &ap)| satisfaction(terminal, &perf[ap]))
        .collect();
    Ok(AssignmentResult::from_satisfactions(
        terminal_to_ap,
        satisfactions,
        LoadDistribution::new(loads),
    ))
}

/// Build the slot × terminal satisfaction matrix for a distribution.
///
/// Row `i` is slot `i` (bound to `ap_for_slot(i)`), column `k` is
/// terminal `k`.
pub fn satisfaction_matrix(
    perf: &[ApPerformance],
    terminals: &[Terminal],
    distribution: &LoadDistribution,
) -> Vec<Vec<f64>> {
    distribution
        .slot_bindings()
        .into_iter()
        .map(|ap| {
            terminals
                .iter()
                .map(|terminal| satisfaction(terminal, &perf[ap]))
                .collect()
        })
        .collect()
}

/// Evaluates distributions against a fixed set of APs and terminals.
#[derive(Debug, Clone, Copy)]
pub struct DistributionEvaluator<'a> {
    aps: &'a [AccessPoint],
    terminals: &'a [Terminal],
    scale: f64,
}

impl<'a> DistributionEvaluator<'a> {
    pub fn new(aps: &'a [AccessPoint], terminals: &'a [Terminal], scale: f64) -> Self {
        Self {
            aps,
            terminals,
            scale,
        }
    }

    /// Best matching of terminals to the slots of `distribution`.
    pub fn evaluate(&self, distribution: &LoadDistribution) -> PlacementResult<AssignmentResult> {
        let n = self.terminals.len();
        if distribution.ap_count() != self.aps.len() {
            return Err(PlacementError::ApCountMismatch {
                expected: self.aps.len(),
                actual: distribution.ap_count(),
            });
        }
        if distribution.total() != n {
            return Err(PlacementError::LoadMismatch {
                placed: distribution.total(),
                terminals: n,
            });
        }

        let perf = performance_for_loads(self.aps, distribution.loads());
        let matrix = satisfaction_matrix(&perf, self.terminals, distribution);
        let weights = to_fixed_point(&matrix, self.scale)?;
        let slot_to_terminal = max_weight_matching(&weights)?;

        let bindings = distribution.slot_bindings();
        let mut terminal_to_ap = vec![0usize; n];
        let mut satisfactions = vec![0.0; n];
        for (slot, &terminal) in slot_to_terminal.iter().enumerate() {
            terminal_to_ap[terminal] = bindings[slot];
            satisfactions[terminal] = matrix[slot][terminal];
        }

        let result = AssignmentResult::from_satisfactions(
            terminal_to_ap,
            satisfactions,
            distribution.clone(),
        );
        trace!(
            loads = ?distribution.loads(),
            harmonic_mean = result.harmonic_mean_satisfaction,
            "evaluated distribution"
        );
        Ok(result)
    }
}
