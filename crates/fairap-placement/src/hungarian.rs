//! Maximum-weight perfect matching (Kuhn–Munkres).
//!
//! Operates on integer weights so the tight-edge test `fx[i] + fy[j] ==
//! w[i][j]` is exact. Callers holding floating-point weights convert them
//! with [`to_fixed_point`], which enforces the overflow policy.

use crate::error::{PlacementError, PlacementResult};

/// Default multiplier applied to satisfaction ratios before matching.
pub const DEFAULT_FIXED_POINT_SCALE: f64 = 1_000_000.0;

/// Largest absolute scaled weight allowed for an `n × n` matrix.
///
/// Dual labels stay within a small multiple of `n · max|w|`; the bound
/// leaves a factor of four of headroom on top of that.
pub fn max_scaled_weight(n: usize) -> i64 {
    let n = i64::try_from(n).unwrap_or(i64::MAX).max(1);
    i64::MAX / 4 / n.saturating_add(1)
}

/// Scale a square matrix of ratios to fixed-point integers.
///
/// Fails on non-finite entries and on entries whose scaled magnitude would
/// exceed [`max_scaled_weight`].
pub fn to_fixed_point(values: &[Vec<f64>], scale: f64) -> PlacementResult<Vec<Vec<i64>>> {
    let n = values.len();
    let limit = max_scaled_weight(n) as f64;
    values
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, &value)| {
                    if !value.is_finite() {
                        return Err(PlacementError::NonFiniteSatisfaction {
                            slot: row,
                            terminal: col,
                        });
                    }
                    let scaled = (value * scale).round();
                    if !scaled.is_finite() || scaled.abs() > limit {
                        return Err(PlacementError::FixedPointOverflow {
                            value,
                            scale,
                            size: n,
                        });
                    }
                    Ok(scaled as i64)
                })
                .collect()
        })
        .collect()
}

/// Solve the assignment problem for a square weight matrix, maximizing the
/// total weight.
///
/// Returns `assignment` where `assignment[row]` is the column matched to
/// `row`. The result is always a permutation of `0..n`. Every weight must
/// lie within `±max_scaled_weight(n)`.
pub fn max_weight_matching(weights: &[Vec<i64>]) -> PlacementResult<Vec<usize>> {
    let n = weights.len();
    let limit = max_scaled_weight(n);
    for (row, cells) in weights.iter().enumerate() {
        if cells.len() != n {
            return Err(PlacementError::NonSquareMatrix {
                row,
                len: cells.len(),
                expected: n,
            });
        }
        if let Some((col, &value)) = cells.iter().enumerate().find(|(_, v)| v.abs() > limit) {
            return Err(PlacementError::WeightOutOfRange { row, col, value });
        }
    }

    // Feasible starting labels: fx[i] = max_j w[i][j], fy[j] = 0.
    let mut fx: Vec<i64> = weights
        .iter()
        .map(|cells| cells.iter().copied().max().unwrap_or(0))
        .collect();
    let mut fy = vec![0i64; n];
    let mut row_match: Vec<Option<usize>> = vec![None; n];
    let mut col_match: Vec<Option<usize>> = vec![None; n];

    let mut i = 0;
    while i < n {
        // parent[j]: tree row from which column j was reached.
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut queue = vec![i];
        let mut head = 0;

        while head < queue.len() && row_match[i].is_none() {
            let k = queue[head];
            for j in 0..n {
                if row_match[i].is_some() {
                    break;
                }
                if parent[j].is_none() && fx[k] + fy[j] == weights[k][j] {
                    parent[j] = Some(k);
                    match col_match[j] {
                        Some(next_row) => queue.push(next_row),
                        None => augment(j, &parent, &mut row_match, &mut col_match),
                    }
                }
            }
            head += 1;
        }

        if row_match[i].is_some() {
            i += 1;
            continue;
        }

        // No augmenting path over tight edges: shrink the smallest slack
        // between tree rows and unreached columns.
        let mut delta = i64::MAX;
        for &k in &queue {
            for j in 0..n {
                if parent[j].is_none() {
                    delta = delta.min(fx[k] + fy[j] - weights[k][j]);
                }
            }
        }
        if delta == i64::MAX || delta <= 0 {
            return Err(PlacementError::SolverStalled { row: i });
        }
        for j in 0..n {
            if parent[j].is_some() {
                fy[j] += delta;
            }
        }
        for &k in &queue {
            fx[k] -= delta;
        }
    }

    row_match
        .into_iter()
        .enumerate()
        .map(|(row, col)| col.ok_or(PlacementError::SolverStalled { row }))
        .collect()
}

/// Flip matches along the alternating path ending at free column `col`.
fn augment(
    mut col: usize,
    parent: &[Option<usize>],
    row_match: &mut [Option<usize>],
    col_match: &mut [Option<usize>],
) {
    while let Some(row) = parent[col] {
        col_match[col] = Some(row);
        let previous = row_match[row].replace(col);
        match previous {
            Some(prev_col) => col = prev_col,
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(weights: &[Vec<i64>], assignment: &[usize]) -> i64 {
        assignment.iter().enumerate().map(|(r, &c)| weights[r][c]).sum()
    }

    fn brute_force_best(weights: &[Vec<i64>]) -> i64 {
        fn permute(weights: &[Vec<i64>], row: usize, used: &mut Vec<bool>, acc: i64, best: &mut i64) {
            let n = weights.len();
            if row == n {
                *best = (*best).max(acc);
                return;
            }
            for col in 0..n {
                if !used[col] {
                    used[col] = true;
                    permute(weights, row + 1, used, acc + weights[row][col], best);
                    used[col] = false;
                }
            }
        }
        let mut best = i64::MIN;
        permute(weights, 0, &mut vec![false; weights.len()], 0, &mut best);
        best
    }

    fn is_permutation(assignment: &[usize]) -> bool {
        let mut seen = vec![false; assignment.len()];
        assignment.iter().all(|&c| c < seen.len() && !std::mem::replace(&mut seen[c], true))
    }

    #[test]
    fn empty_matrix_has_empty_matching() {
        assert!(max_weight_matching(&[]).unwrap().is_empty());
    }

    #[test]
    fn single_cell() {
        assert_eq!(max_weight_matching(&[vec![-7]]).unwrap(), vec![0]);
    }

    #[test]
    fn picks_off_diagonal_when_better() {
        let w = vec![vec![1, 10], vec![10, 1]];
        assert_eq!(max_weight_matching(&w).unwrap(), vec![1, 0]);
    }

    #[test]
    fn classic_three_by_three() {
        let w = vec![vec![7, 4, 3], vec![6, 8, 5], vec![9, 4, 4]];
        let assignment = max_weight_matching(&w).unwrap();
        assert!(is_permutation(&assignment));
        assert_eq!(total(&w, &assignment), brute_force_best(&w));
        assert_eq!(total(&w, &assignment), 3 + 8 + 9);
    }

    #[test]
    fn matches_brute_force_on_pseudo_random_matrices() {
        // Small LCG so the test has no RNG dependency.
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = || {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            ((state >> 33) % 1000) as i64 - 200
        };

        for n in 1..=6 {
            for _ in 0..20 {
                let w: Vec<Vec<i64>> = (0..n).map(|_| (0..n).map(|_| next()).collect()).collect();
                let assignment = max_weight_matching(&w).unwrap();
                assert!(is_permutation(&assignment), "not a permutation: {assignment:?}");
                assert_eq!(total(&w, &assignment), brute_force_best(&w), "matrix {w:?}");
            }
        }
    }

    #[test]
    fn handles_all_equal_weights() {
        let w = vec![vec![4_000_000; 5]; 5];
        let assignment = max_weight_matching(&w).unwrap();
        assert!(is_permutation(&assignment));
    }

    #[test]
    fn rejects_non_square() {
        let w = vec![vec![1, 2], vec![3]];
        assert!(matches!(
            max_weight_matching(&w),
            Err(PlacementError::NonSquareMatrix { row: 1, len: 1, expected: 2 })
        ));
    }

    #[test]
    fn rejects_weights_outside_range() {
        let w = vec![vec![i64::MAX, 0], vec![0, 0]];
        assert!(matches!(
            max_weight_matching(&w),
            Err(PlacementError::WeightOutOfRange { row: 0, col: 0, .. })
        ));
    }

    #[test]
    fn fixed_point_rounds() {
        let scaled = to_fixed_point(&[vec![1.234_567_89]], DEFAULT_FIXED_POINT_SCALE).unwrap();
        assert_eq!(scaled, vec![vec![1_234_568]]);
    }

    #[test]
    fn fixed_point_rejects_overflow() {
        let huge = vec![vec![1e15, 1.0], vec![1.0, 1.0]];
        assert!(matches!(
            to_fixed_point(&huge, DEFAULT_FIXED_POINT_SCALE),
            Err(PlacementError::FixedPointOverflow { size: 2, .. })
        ));
    }

    #[test]
    fn fixed_point_rejects_non_finite() {
        let bad = vec![vec![1.0, f64::INFINITY], vec![1.0, 1.0]];
        assert!(matches!(
            to_fixed_point(&bad, DEFAULT_FIXED_POINT_SCALE),
            Err(PlacementError::NonFiniteSatisfaction { slot: 0, terminal: 1 })
        ));
    }
}
