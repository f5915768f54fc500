//! Load distribution enumeration.
//!
//! Every way of splitting `N` ordered terminal positions into `M`
//! contiguous, possibly empty blocks (one per AP) is a composition of `N`
//! into `M` non-negative parts. Compositions are encoded stars-and-bars
//! style: `M - 1` divider positions chosen among `N + M - 1` slots. The
//! enumerator walks those divider combinations in lexicographic order, so
//! the sequence is deterministic and there are exactly `C(N+M-1, M-1)`
//! items before the capacity filter.

use fairap_core::LoadDistribution;

/// Number of compositions of `terminals` into `aps` non-negative parts,
/// or `None` if it does not fit in a `u128`.
pub fn composition_count(terminals: usize, aps: usize) -> Option<u128> {
    if aps == 0 {
        return Some(0);
    }
    let n = (terminals as u128).checked_add(aps as u128 - 1)?;
    let k = (aps as u128 - 1).min(terminals as u128);
    let mut result: u128 = 1;
    for i in 1..=k {
        // C(n-k+i, i) = C(n-k+i-1, i-1) * (n-k+i) / i. Cancelling the
        // common factor first keeps every intermediate at most C(n-k+i, i),
        // so overflow means the count itself does not fit.
        let g = gcd(result, i);
        result = (result / g).checked_mul((n - k + i) / (i / g))?;
    }
    Some(result)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Iterator over every composition of `terminals` into `aps` parts.
#[derive(Debug, Clone)]
pub struct Compositions {
    terminals: usize,
    /// Strictly increasing divider positions in `0..terminals + aps - 1`.
    dividers: Vec<usize>,
    done: bool,
}

impl Compositions {
    pub fn new(terminals: usize, aps: usize) -> Self {
        Self {
            terminals,
            dividers: (0..aps.saturating_sub(1)).collect(),
            done: aps == 0,
        }
    }

    fn slots(&self) -> usize {
        self.terminals + self.dividers.len()
    }

    fn current(&self) -> LoadDistribution {
        let mut loads = Vec::with_capacity(self.dividers.len() + 1);
        let mut start = 0;
        for &divider in &self.dividers {
            loads.push(divider - start);
            start = divider + 1;
        }
        loads.push(self.slots() - start);
        LoadDistribution::new(loads)
    }

    /// Step to the next combination in lexicographic order.
    fn advance(&mut self) {
        let r = self.dividers.len();
        let slots = self.slots();
        let Some(i) = (0..r).rev().find(|&i| self.dividers[i] < slots - r + i) else {
            self.done = true;
            return;
        };
        self.dividers[i] += 1;
        for j in i + 1..r {
            self.dividers[j] = self.dividers[j - 1] + 1;
        }
    }
}

impl Iterator for Compositions {
    type Item = LoadDistribution;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.current();
        self.advance();
        Some(current)
    }
}

/// Compositions of `terminals` that respect every AP's capacity, in
/// enumeration order.
pub fn feasible_distributions(
    capacities: &[usize],
    terminals: usize,
) -> impl Iterator<Item = LoadDistribution> + Send + 'static {
    let capacities = capacities.to_vec();
    Compositions::new(terminals, capacities.len()).filter(move |d| d.fits(&capacities))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn loads(iter: impl Iterator<Item = LoadDistribution>) -> Vec<Vec<usize>> {
        iter.map(|d| d.loads().to_vec()).collect()
    }

    #[test]
    fn enumerates_in_lexicographic_divider_order() {
        let all = loads(Compositions::new(2, 3));
        assert_eq!(
            all,
            vec![
                vec![0, 0, 2],
                vec![0, 1, 1],
                vec![0, 2, 0],
                vec![1, 0, 1],
                vec![1, 1, 0],
                vec![2, 0, 0],
            ]
        );
    }

    #[test]
    fn single_ap_has_one_composition() {
        assert_eq!(loads(Compositions::new(7, 1)), vec![vec![7]]);
        assert_eq!(composition_count(7, 1), Some(1));
    }

    #[test]
    fn zero_terminals_has_all_zero_composition() {
        assert_eq!(loads(Compositions::new(0, 3)), vec![vec![0, 0, 0]]);
        assert_eq!(composition_count(0, 3), Some(1));
    }

    #[test]
    fn zero_aps_has_no_composition() {
        assert_eq!(Compositions::new(4, 0).count(), 0);
        assert_eq!(composition_count(4, 0), Some(0));
    }

    #[test]
    fn known_counts() {
        assert_eq!(composition_count(100, 3), Some(5151));
        assert_eq!(composition_count(100, 5), Some(4_598_126));
        assert_eq!(composition_count(6, 3), Some(28));
    }

    #[test]
    fn counts_near_u128_limit_are_exact() {
        // Multiplying before dividing would overflow on these even though
        // the counts themselves fit.
        assert_eq!(
            composition_count(1_000_000, 8),
            Some(198_418_254_032_143_246_033_089_089_907_145_450_001)
        );
        assert_eq!(
            composition_count(10_000_000_000_000, 4),
            Some(166_666_666_666_766_666_666_666_685_000_000_000_001)
        );
        assert_eq!(
            composition_count(2830, 15),
            Some(25_158_670_950_716_648_128_165_115_637_015_969_528)
        );
    }

    #[test]
    fn count_overflow_is_reported() {
        assert_eq!(composition_count(usize::MAX / 2, 64), None);
    }

    #[test]
    fn capacity_filter_drops_overfull_blocks() {
        let feasible = loads(feasible_distributions(&[2, 2, 2], 6));
        assert_eq!(feasible, vec![vec![2, 2, 2]]);

        let feasible = loads(feasible_distributions(&[1, 3], 4));
        assert_eq!(feasible, vec![vec![1, 3]]);

        assert_eq!(feasible_distributions(&[1, 1], 3).count(), 0);
    }

    proptest! {
        #[test]
        fn prop_compositions_sum_to_terminal_count(n in 0usize..12, m in 1usize..5) {
            for dist in Compositions::new(n, m) {
                prop_assert_eq!(dist.ap_count(), m);
                prop_assert_eq!(dist.total(), n);
            }
        }

        #[test]
        fn prop_raw_count_matches_binomial(n in 0usize..12, m in 1usize..5) {
            let counted = Compositions::new(n, m).count() as u128;
            prop_assert_eq!(Some(counted), composition_count(n, m));
        }

        #[test]
        fn prop_compositions_are_distinct(n in 0usize..9, m in 1usize..4) {
            let all = loads(Compositions::new(n, m));
            let unique: std::collections::HashSet<_> = all.iter().cloned().collect();
            prop_assert_eq!(unique.len(), all.len());
        }

        #[test]
        fn prop_feasible_respects_capacity(
            n in 0usize..10,
            caps in proptest::collection::vec(0usize..6, 1..4),
        ) {
            for dist in feasible_distributions(&caps, n) {
                prop_assert!(dist.fits(&caps));
                prop_assert_eq!(dist.total(), n);
            }
        }
    }
}
