//! fairap-placement: fairness-driven terminal → AP assignment.
//!
//! Searches every way of splitting the ordered terminal list into
//! contiguous per-AP blocks that fit the APs' capacities, matches terminals
//! to the resulting slots with the Hungarian algorithm, and keeps the
//! candidate with the highest harmonic-mean satisfaction. Random and greedy
//! baselines are scored the same way for comparison.
//!
//! # Components
//!
//! - **`performance`**: Load-dependent RTT/throughput and satisfaction ratios
//! - **`enumerate`**: Stars-and-bars load distributions with capacity filter
//! - **`hungarian`**: Fixed-point maximum-weight perfect matching
//! - **`evaluate`**: Per-distribution matrix, matching, and scoring
//! - **`optimizer`**: Parallel search for the best distribution
//! - **`baseline`**: Random and greedy heuristics
//! - **`report`**: Three-way comparison and text rendering
//! - **`convert`**: Scenario configuration → optimizer configuration

pub mod baseline;
pub mod convert;
pub mod enumerate;
pub mod error;
pub mod evaluate;
pub mod hungarian;
pub mod optimizer;
pub mod performance;
pub mod report;

pub use baseline::{greedy_assign, improvement_factor, random_assign};
pub use convert::{random_seed, section_to_config};
pub use enumerate::{Compositions, composition_count, feasible_distributions};
pub use error::{PlacementError, PlacementResult};
pub use evaluate::{AssignmentResult, DistributionEvaluator, harmonic_mean, score_assignment};
pub use hungarian::{DEFAULT_FIXED_POINT_SCALE, max_weight_matching, to_fixed_point};
pub use optimizer::{OptimizedAssignment, Optimizer, OptimizerConfig, SearchStats, optimize};
pub use performance::{ApPerformance, current_performance, satisfaction};
pub use report::{ComparisonReport, compare, format_report};
