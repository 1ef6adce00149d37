//! Parent selection.
//!
//! [`BinaryTournament`] is the NSGA-II parent-sampling scheme: two
//! uniform draws, the better by rank-then-crowding wins.

use crate::pareto::rank_then_crowding;
use crate::solution::Population;
use rand::Rng;
use std::cmp::Ordering;

/// Chooses one parent index from the population.
///
/// All draws come from the engine's single shared seedable random
/// source so a fixed seed reproduces the run end to end.
pub trait SelectionOperator {
    /// Returns the index of the selected parent.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    fn select<R: Rng>(&self, population: &Population, rng: &mut R) -> usize;
}

/// Binary tournament under the rank+crowding total order.
///
/// Samples two members independently and uniformly (not necessarily
/// distinct) and returns the better one. Members must carry rank and
/// crowding distance from the most recent survivor selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryTournament;

impl SelectionOperator for BinaryTournament {
    fn select<R: Rng>(&self, population: &Population, rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        let n = population.len();
        let first = rng.random_range(0..n);
        let second = rng.random_range(0..n);

        match rank_then_crowding(&population[first], &population[second]) {
            Ordering::Greater => second,
            _ => first,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pareto::sort_by_dominance;
    use crate::solution::{Gene, Solution};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ranked_population(objectives: &[&[f64]]) -> Population {
        let mut pop = Population::new();
        for objs in objectives {
            let mut s = Solution::new(vec![Gene::new(0, 0, 9)]);
            s.set_objectives(objs.to_vec());
            pop.push(s);
        }
        sort_by_dominance(&mut pop);
        pop
    }

    #[test]
    fn test_tournament_favors_lower_rank() {
        // After the dominance sort, index 0 is the only rank-0 member.
        let pop = ranked_population(&[&[5.0, 5.0], &[1.0, 1.0], &[3.0, 3.0], &[4.0, 4.0]]);
        assert_eq!(pop[0].objectives(), [1.0, 1.0]);

        let mut rng = StdRng::seed_from_u64(42);
        let mut best_count = 0u32;
        let n = 10_000;
        for _ in 0..n {
            if BinaryTournament.select(&pop, &mut rng) == 0 {
                best_count += 1;
            }
        }
        // P(best wins) = 1 - (3/4)^2 = 7/16.
        assert!(
            best_count > 3_800,
            "expected the rank-0 member to win >38% of tournaments, got {best_count}/{n}"
        );
    }

    #[test]
    fn test_tournament_single_member() {
        let pop = ranked_population(&[&[2.0, 2.0]]);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(BinaryTournament.select(&pop, &mut rng), 0);
    }

    #[test]
    fn test_tournament_uniform_over_equal_members() {
        // Two mutually non-dominating members, both with infinite
        // crowding: every tournament is a tie, won by the first draw.
        let pop = ranked_population(&[&[1.0, 5.0], &[5.0, 1.0]]);
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = [0u32; 2];
        let n = 10_000;
        for _ in 0..n {
            counts[BinaryTournament.select(&pop, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 4_000, "expected a near-uniform split, got {counts:?}");
        }
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop = Population::new();
        let mut rng = StdRng::seed_from_u64(42);
        BinaryTournament.select(&pop, &mut rng);
    }
}
