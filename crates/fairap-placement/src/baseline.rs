//! Baseline heuristics used to measure the optimizer's benefit.
//!
//! - **Random**: each terminal draws a uniform AP and keeps the draw only if
//!   that AP still has room (rejection sampling)
//! - **Greedy**: each terminal, in index order, joins the AP that gives it
//!   the highest satisfaction with itself counted in the AP's load
//!
//! Both are scored with the same performance and satisfaction model as the
//! optimizer so the harmonic means are directly comparable.

use rand::Rng;
use tracing::{debug, warn};

use fairap_core::{AccessPoint, Terminal};

use crate::error::{PlacementError, PlacementResult};
use crate::evaluate::{AssignmentResult, score_assignment};
use crate::performance::{current_performance, satisfaction};

fn check_capacity(aps: &[AccessPoint], terminals: &[Terminal]) -> PlacementResult<()> {
    let capacity: usize = aps.iter().map(|ap| ap.capacity).sum();
    if capacity < terminals.len() || (aps.is_empty() && !terminals.is_empty()) {
        return Err(PlacementError::Infeasible {
            capacity,
            terminals: terminals.len(),
        });
    }
    Ok(())
}

/// Place terminals uniformly at random, respecting capacity.
///
/// Fails up front when total capacity is short, so the sampler always
/// terminates.
pub fn random_assign<R: Rng + ?Sized>(
    aps: &[AccessPoint],
    terminals: &[Terminal],
    rng: &mut R,
) -> PlacementResult<AssignmentResult> {
    check_capacity(aps, terminals)?;

    let mut counts = vec![0usize; aps.len()];
    let mut terminal_to_ap = Vec::with_capacity(terminals.len());
    let mut rejected = 0usize;

    for _ in terminals {
        loop {
            let ap = rng.gen_range(0..aps.len());
            if counts[ap] < aps[ap].capacity {
                counts[ap] += 1;
                terminal_to_ap.push(ap);
                break;
            }
            rejected += 1;
        }
    }

    let result = score_assignment(aps, terminals, terminal_to_ap)?;
    debug!(
        loads = ?result.loads.loads(),
        rejected,
        harmonic_mean = result.harmonic_mean_satisfaction,
        "random assignment scored"
    );
    Ok(result)
}

/// Place terminals one at a time on the AP that satisfies each the most.
///
/// Overfull configurations are not rejected: once every AP is at capacity
/// the remaining terminals go to the least-loaded AP. Only an empty AP set
/// with terminals to place is an error.
pub fn greedy_assign(
    aps: &[AccessPoint],
    terminals: &[Terminal],
) -> PlacementResult<AssignmentResult> {
    if aps.is_empty() && !terminals.is_empty() {
        return Err(PlacementError::Infeasible {
            capacity: 0,
            terminals: terminals.len(),
        });
    }

    let mut counts = vec![0usize; aps.len()];
    let mut terminal_to_ap = Vec::with_capacity(terminals.len());

    for terminal in terminals {
        let mut best: Option<(usize, f64)> = None;
        for (j, ap) in aps.iter().enumerate() {
            if counts[j] >= ap.capacity {
                continue;
            }
            let perf = current_performance(ap, counts[j] + 1);
            let score = satisfaction(terminal, &perf);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((j, score));
            }
        }

        let chosen = match best {
            Some((j, _)) => j,
            None => {
                // Every AP is full: fall back to the least-loaded one.
                let fallback = counts
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, count)| **count)
                    .map(|(j, _)| j)
                    .unwrap_or(0);
                warn!(
                    terminal = terminal.id,
                    ap = fallback,
                    "all APs at capacity, using least-loaded AP"
                );
                fallback
            }
        };
        counts[chosen] += 1;
        terminal_to_ap.push(chosen);
    }

    let result = score_assignment(aps, terminals, terminal_to_ap)?;
    debug!(
        loads = ?result.loads.loads(),
        harmonic_mean = result.harmonic_mean_satisfaction,
        "greedy assignment scored"
    );
    Ok(result)
}

/// `optimized / baseline` harmonic-mean ratio, or `None` when the
/// baseline's harmonic mean is zero.
pub fn improvement_factor(optimized: &AssignmentResult, baseline: &AssignmentResult) -> Option<f64> {
    let base = baseline.harmonic_mean_satisfaction;
    (base > 0.0).then(|| optimized.harmonic_mean_satisfaction / base)
}
