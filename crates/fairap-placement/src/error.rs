//! Placement error types.

use thiserror::Error;

/// Errors that can occur while searching for an assignment.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("infeasible configuration: total capacity {capacity} cannot hold {terminals} terminals")]
    Infeasible { capacity: usize, terminals: usize },

    #[error("search space of {candidates} load distributions exceeds the limit of {limit}")]
    SearchSpaceTooLarge { candidates: u128, limit: u64 },

    #[error("search space size overflows for {terminals} terminals across {aps} APs")]
    SearchSpaceOverflow { terminals: usize, aps: usize },

    #[error("satisfaction {value} cannot be represented at fixed-point scale {scale} for a {size}x{size} matrix")]
    FixedPointOverflow { value: f64, scale: f64, size: usize },

    #[error("non-finite satisfaction at slot {slot} for terminal {terminal}")]
    NonFiniteSatisfaction { slot: usize, terminal: usize },

    #[error("weight {value} at ({row}, {col}) is outside the solver's range")]
    WeightOutOfRange { row: usize, col: usize, value: i64 },

    #[error("weight matrix must be square: row {row} has {len} columns, expected {expected}")]
    NonSquareMatrix { row: usize, len: usize, expected: usize },

    #[error("distribution places {placed} terminals but the scenario has {terminals}")]
    LoadMismatch { placed: usize, terminals: usize },

    #[error("distribution covers {actual} APs but the scenario has {expected}")]
    ApCountMismatch { expected: usize, actual: usize },

    #[error("terminal {terminal} is mapped to AP {ap} but only {ap_count} APs exist")]
    UnknownAccessPoint { terminal: usize, ap: usize, ap_count: usize },

    #[error("matching solver stalled at row {row}")]
    SolverStalled { row: usize },
}

pub type PlacementResult<T> = Result<T, PlacementError>;
