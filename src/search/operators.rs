//! Breeding operators: selection, crossover, and mutation.
//!
//! All stochastic choices run through [`SearchRng`], a seedable wrapper, so
//! a search can be replayed exactly from a fixed seed.

use rand::prelude::*;

/// Random number generator wrapper for the breeding operators.
pub struct SearchRng {
    rng: StdRng,
}

impl SearchRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Pick a pool index, biased toward the head (the best candidates).
    ///
    /// Draws `round(z)` with `z ~ Normal(0, pool_len / 6)` and resamples
    /// until the index lands in `[0, pool_len)`. Candidates near the head
    /// are drawn most often, while every index keeps nonzero probability.
    pub fn select_index(&mut self, pool_len: usize) -> usize {
        assert!(pool_len > 0, "selection from an empty pool");

        let sd = pool_len as f64 / 6.0;
        loop {
            let z: f64 = self.rng.sample(rand_distr::StandardNormal);
            let index = (z * sd).round();
            if index >= 0.0 && index < pool_len as f64 {
                return index as usize;
            }
        }
    }

    /// Uniform per-gene crossover.
    ///
    /// Each position of the child inherits from either parent on a fair
    /// coin. The child is one shorter than the shorter parent.
    pub fn crossover<A: Clone>(&mut self, parent1: &[A], parent2: &[A]) -> Vec<A> {
        let len = parent1.len().min(parent2.len()).saturating_sub(1);
        let mut child = Vec::with_capacity(len);
        for i in 0..len {
            if self.rng.gen_bool(0.5) {
                child.push(parent1[i].clone());
            } else {
                child.push(parent2[i].clone());
            }
        }
        child
    }

    /// Per-gene point mutation.
    ///
    /// Each kept position is replaced by a fresh sample with probability
    /// `1/odds`, otherwise copied unchanged. The output drops the input's
    /// last element, shrinking by one like crossover does.
    pub fn mutate<A: Clone>(
        &mut self,
        acts: &[A],
        odds: u32,
        mut sample: impl FnMut() -> A,
    ) -> Vec<A> {
        let len = acts.len().saturating_sub(1);
        let mut result = Vec::with_capacity(len);
        for act in &acts[..len] {
            if self.rng.gen_range(0..odds) == 0 {
                result.push(sample());
            } else {
                result.push(act.clone());
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut rng = SearchRng::new(11);
        for pool_len in [1, 2, 5, 100] {
            for _ in 0..1000 {
                assert!(rng.select_index(pool_len) < pool_len);
            }
        }
    }

    #[test]
    fn test_selection_favors_the_head() {
        let mut rng = SearchRng::new(3);
        let pool_len = 50;
        let mut counts = vec![0usize; pool_len];
        for _ in 0..20_000 {
            counts[rng.select_index(pool_len)] += 1;
        }
        assert!(counts[0] > counts[pool_len - 1]);
        // The head should dominate clearly, not just by sampling noise.
        assert!(counts[0] > 10 * counts[pool_len - 1].max(1));
    }

    #[test]
    #[should_panic(expected = "selection from an empty pool")]
    fn test_selection_on_empty_pool_panics() {
        SearchRng::new(0).select_index(0);
    }

    #[test]
    fn test_crossover_mixes_both_parents() {
        let mut rng = SearchRng::new(5);
        let p1 = vec![0u8; 200];
        let p2 = vec![1u8; 200];
        let child = rng.crossover(&p1, &p2);

        assert_eq!(child.len(), 199);
        assert!(child.contains(&0));
        assert!(child.contains(&1));
    }

    #[test]
    fn test_mutation_rate_matches_odds() {
        let mut rng = SearchRng::new(42);
        let input = vec![0u8; 66_000];
        let mutated = rng.mutate(&input, 66, || 1u8);

        let replaced = mutated.iter().filter(|&&a| a == 1).count();
        let expected = mutated.len() / 66;
        // Within a third of the expected count over ~66k trials.
        let tolerance = expected / 3;
        assert!(
            replaced.abs_diff(expected) < tolerance,
            "{replaced} replacements, expected about {expected}"
        );
    }

    #[test]
    fn test_mutation_drops_the_last_element() {
        let mut rng = SearchRng::new(1);
        // odds high enough that replacement is effectively off
        let out = rng.mutate(&[10u8, 20, 30], u32::MAX, || 99);
        assert_eq!(out, vec![10, 20]);
    }

    #[test]
    fn test_degenerate_lengths() {
        let mut rng = SearchRng::new(1);
        assert!(rng.crossover::<u8>(&[], &[1, 2]).is_empty());
        assert!(rng.crossover(&[1u8], &[2, 3]).is_empty());
        assert!(rng.mutate::<u8>(&[], 66, || 0).is_empty());
        assert!(rng.mutate(&[7u8], 66, || 0).is_empty());
    }

    proptest! {
        #[test]
        fn prop_crossover_shrinks_the_shorter_parent_by_one(
            p1 in proptest::collection::vec(any::<u8>(), 1..200),
            p2 in proptest::collection::vec(any::<u8>(), 1..200),
            seed in any::<u64>(),
        ) {
            let child = SearchRng::new(seed).crossover(&p1, &p2);
            prop_assert_eq!(child.len(), p1.len().min(p2.len()) - 1);
        }

        #[test]
        fn prop_mutation_shrinks_by_one(
            acts in proptest::collection::vec(any::<u8>(), 1..200),
            seed in any::<u64>(),
        ) {
            let out = SearchRng::new(seed).mutate(&acts, 66, || 0);
            prop_assert_eq!(out.len(), acts.len() - 1);
        }

        #[test]
        fn prop_crossover_genes_come_from_a_parent(
            p1 in proptest::collection::vec(any::<u8>(), 2..100),
            p2 in proptest::collection::vec(any::<u8>(), 2..100),
            seed in any::<u64>(),
        ) {
            let child = SearchRng::new(seed).crossover(&p1, &p2);
            for (i, gene) in child.iter().enumerate() {
                prop_assert!(*gene == p1[i] || *gene == p2[i]);
            }
        }
    }
}
