//! Optimizer: searches every feasible load distribution.
//!
//! Each candidate is evaluated independently (performance, satisfaction
//! matrix, Hungarian matching), so the search is a map-reduce:
//! - **map**: evaluate a distribution → `AssignmentResult`
//! - **reduce**: keep the greatest harmonic mean; ties keep the candidate
//!   that comes first in enumeration order
//!
//! The reduction is order-independent, so the parallel search returns
//! exactly what the sequential search returns.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use fairap_core::{AccessPoint, LoadDistribution, Terminal};

use crate::enumerate::{composition_count, feasible_distributions};
use crate::error::{PlacementError, PlacementResult};
use crate::evaluate::{AssignmentResult, DistributionEvaluator};
use crate::hungarian::DEFAULT_FIXED_POINT_SCALE;
use crate::performance::{ApPerformance, performance_for_loads};

/// Tuning for one optimization pass.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    /// Evaluate candidates on the rayon thread pool.
    pub parallel: bool,
    /// Multiplier applied to satisfaction ratios before matching.
    pub fixed_point_scale: f64,
    /// Refuse to search more raw compositions than this.
    pub max_candidates: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            fixed_point_scale: DEFAULT_FIXED_POINT_SCALE,
            max_candidates: None,
        }
    }
}

/// Size and duration of a search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchStats {
    /// Compositions before the capacity filter.
    pub raw_candidates: u128,
    /// Compositions that passed the capacity filter and were evaluated.
    pub feasible_candidates: usize,
    #[serde(with = "duration_ms")]
    pub elapsed: Duration,
}

/// Winning assignment plus what is needed to report on it.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizedAssignment {
    pub result: AssignmentResult,
    /// Position of the winning distribution in the feasible enumeration.
    pub candidate_index: usize,
    /// AP performance under the winning loads.
    pub performance: Vec<ApPerformance>,
    pub stats: SearchStats,
}

struct Candidate {
    index: usize,
    result: AssignmentResult,
}

/// Keep the greater harmonic mean; on a tie keep the earlier candidate.
fn better(a: Option<Candidate>, b: Option<Candidate>) -> Option<Candidate> {
    match (a, b) {
        (None, x) | (x, None) => x,
        (Some(a), Some(b)) => {
            let ha = a.result.harmonic_mean_satisfaction;
            let hb = b.result.harmonic_mean_satisfaction;
            if hb > ha || (hb == ha && b.index < a.index) {
                Some(b)
            } else {
                Some(a)
            }
        }
    }
}

/// Searches load distributions for the fairest assignment.
pub struct Optimizer<'a> {
    aps: &'a [AccessPoint],
    terminals: &'a [Terminal],
    config: OptimizerConfig,
}

impl<'a> Optimizer<'a> {
    pub fn new(aps: &'a [AccessPoint], terminals: &'a [Terminal], config: OptimizerConfig) -> Self {
        Self {
            aps,
            terminals,
            config,
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Raw number of compositions this optimizer would enumerate.
    pub fn search_space(&self) -> PlacementResult<u128> {
        composition_count(self.terminals.len(), self.aps.len()).ok_or(
            PlacementError::SearchSpaceOverflow {
                terminals: self.terminals.len(),
                aps: self.aps.len(),
            },
        )
    }

    /// Number of compositions that pass the capacity filter.
    pub fn feasible_count(&self) -> PlacementResult<usize> {
        self.check_search_space()?;
        Ok(feasible_distributions(&self.capacities(), self.terminals.len()).count())
    }

    fn capacities(&self) -> Vec<usize> {
        self.aps.iter().map(|ap| ap.capacity).collect()
    }

    fn check_search_space(&self) -> PlacementResult<u128> {
        let raw = self.search_space()?;
        if let Some(limit) = self.config.max_candidates {
            if raw > u128::from(limit) {
                return Err(PlacementError::SearchSpaceTooLarge {
                    candidates: raw,
                    limit,
                });
            }
        }
        Ok(raw)
    }

    /// Run the full search and return the best assignment.
    pub fn run(&self) -> PlacementResult<OptimizedAssignment> {
        let raw_candidates = self.check_search_space()?;
        let started = Instant::now();
        let evaluator = DistributionEvaluator::new(
            self.aps,
            self.terminals,
            self.config.fixed_point_scale,
        );
        let capacities = self.capacities();
        let candidates = feasible_distributions(&capacities, self.terminals.len()).enumerate();
        let evaluated = AtomicUsize::new(0);

        debug!(
            raw_candidates,
            aps = self.aps.len(),
            terminals = self.terminals.len(),
            parallel = self.config.parallel,
            "starting distribution search"
        );

        let evaluate = |(index, distribution): (usize, LoadDistribution)| -> PlacementResult<Option<Candidate>> {
            evaluated.fetch_add(1, Ordering::Relaxed);
            let result = evaluator.evaluate(&distribution)?;
            Ok(Some(Candidate { index, result }))
        };

        let best = if self.config.parallel {
            candidates
                .par_bridge()
                .map(evaluate)
                .try_reduce(|| None, |a, b| Ok(better(a, b)))?
        } else {
            let mut best = None;
            for candidate in candidates {
                best = better(best, evaluate(candidate)?);
            }
            best
        };

        let feasible_candidates = evaluated.into_inner();
        let Some(best) = best else {
            return Err(PlacementError::Infeasible {
                capacity: capacities.iter().sum(),
                terminals: self.terminals.len(),
            });
        };

        let stats = SearchStats {
            raw_candidates,
            feasible_candidates,
            elapsed: started.elapsed(),
        };
        let performance = performance_for_loads(self.aps, best.result.loads.loads());

        info!(
            raw_candidates,
            feasible_candidates,
            best_index = best.index,
            loads = ?best.result.loads.loads(),
            harmonic_mean = best.result.harmonic_mean_satisfaction,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "distribution search complete"
        );

        Ok(OptimizedAssignment {
            result: best.result,
            candidate_index: best.index,
            performance,
            stats,
        })
    }
}

/// Convenience wrapper around [`Optimizer::run`].
pub fn optimize(
    aps: &[AccessPoint],
    terminals: &[Terminal],
    config: OptimizerConfig,
) -> PlacementResult<OptimizedAssignment> {
    Optimizer::new(aps, terminals, config).run()
}

mod duration_ms {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64() * 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairap_core::AppClass;

    fn terminals(classes: &[AppClass]) -> Vec<Terminal> {
        classes
            .iter()
            .enumerate()
            .map(|(id, &class)| Terminal::new(id, class))
            .collect()
    }

    fn sequential() -> OptimizerConfig {
        OptimizerConfig {
            parallel: false,
            ..OptimizerConfig::default()
        }
    }

    #[test]
    fn ties_keep_first_candidate() {
        let first = AssignmentResult::from_satisfactions(vec![0], vec![2.0], vec![1].into());
        let second = AssignmentResult::from_satisfactions(vec![0], vec![2.0], vec![1].into());

        let a = Some(Candidate { index: 3, result: first });
        let b = Some(Candidate { index: 1, result: second });
        assert_eq!(better(a, b).unwrap().index, 1);
    }

    #[test]
    fn greater_harmonic_mean_wins() {
        let low = AssignmentResult::from_satisfactions(vec![0], vec![1.0], vec![1].into());
        let high = AssignmentResult::from_satisfactions(vec![0], vec![3.0], vec![1].into());

        let a = Some(Candidate { index: 0, result: low });
        let b = Some(Candidate { index: 9, result: high });
        assert_eq!(better(a, b).unwrap().index, 9);
        assert!(better(None, None).is_none());
    }

    #[test]
    fn infeasible_configuration_is_an_error() {
        let aps = vec![AccessPoint::new(0, 1, 20.0), AccessPoint::new(1, 1, 30.0)];
        let terms = terminals(&[AppClass::Browser; 3]);

        for config in [sequential(), OptimizerConfig::default()] {
            let err = optimize(&aps, &terms, config).unwrap_err();
            assert!(matches!(err, PlacementError::Infeasible { capacity: 2, terminals: 3 }));
        }
    }

    #[test]
    fn search_space_limit_is_enforced() {
        let aps: Vec<AccessPoint> = (0..4).map(|id| AccessPoint::new(id, 100, 20.0)).collect();
        let terms = terminals(&[AppClass::Browser; 30]);
        let config = OptimizerConfig {
            max_candidates: Some(1000),
            ..sequential()
        };

        let err = optimize(&aps, &terms, config).unwrap_err();
        assert!(matches!(
            err,
            PlacementError::SearchSpaceTooLarge { candidates: 5456, limit: 1000 }
        ));
    }

    #[test]
    fn stats_count_raw_and_feasible_candidates() {
        let aps = vec![AccessPoint::new(0, 2, 20.0), AccessPoint::new(1, 3, 30.0)];
        let terms = terminals(&[AppClass::Browser, AppClass::VoiceCall, AppClass::Video]);

        let optimizer = Optimizer::new(&aps, &terms, sequential());
        assert_eq!(optimizer.search_space().unwrap(), 4);
        assert_eq!(optimizer.feasible_count().unwrap(), 3);

        let best = optimizer.run().unwrap();
        assert_eq!(best.stats.raw_candidates, 4);
        assert_eq!(best.stats.feasible_candidates, 3);
        assert_eq!(best.result.loads.total(), 3);
        assert_eq!(best.performance.len(), 2);
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let aps = vec![
            AccessPoint::new(0, 4, 20.0),
            AccessPoint::new(1, 4, 30.0),
            AccessPoint::new(2, 4, 32.0),
        ];
        let terms = terminals(&[
            AppClass::Browser,
            AppClass::Video,
            AppClass::VoiceCall,
            AppClass::LiveStream,
            AppClass::Browser,
            AppClass::LiveStream,
            AppClass::Video,
            AppClass::VoiceCall,
        ]);

        let seq = optimize(&aps, &terms, sequential()).unwrap();
        let par = optimize(&aps, &terms, OptimizerConfig::default()).unwrap();

        assert_eq!(seq.candidate_index, par.candidate_index);
        assert_eq!(seq.result, par.result);
    }

    #[test]
    fn winner_beats_every_other_candidate() {
        let aps = vec![AccessPoint::new(0, 3, 20.0), AccessPoint::new(1, 3, 45.0)];
        let terms = terminals(&[
            AppClass::LiveStream,
            AppClass::Browser,
            AppClass::Video,
            AppClass::VoiceCall,
        ]);

        let best = optimize(&aps, &terms, sequential()).unwrap();
        let evaluator = DistributionEvaluator::new(&aps, &terms, DEFAULT_FIXED_POINT_SCALE);
        for dist in feasible_distributions(&[3, 3], 4) {
            let other = evaluator.evaluate(&dist).unwrap();
            assert!(best.result.harmonic_mean_satisfaction >= other.harmonic_mean_satisfaction);
        }
    }
}
