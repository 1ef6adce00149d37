//! Genetic variation operators.
//!
//! Crossover and mutation for fixed-length integer genotypes:
//!
//! - [`SinglePointCrossover`]: exchange gene sub-sequences at one cut
//! - [`IntegerFlipMutation`]: per-gene uniform resampling
//! - [`NeutralMutation`]: predicate-gated resampling applied to parents
//!   before crossover, for diversity injection
//!
//! Operators never edit a solution another holder can observe: crossover
//! produces fresh unevaluated children, and mutation only runs on
//! children (or parent copies) that have not been evaluated yet.

use crate::config::CrossoverPoint;
use crate::problem::Problem;
use crate::solution::Solution;
use rand::Rng;

/// Recombines two parents into two children.
pub trait CrossoverOperator {
    /// Produces two fresh, unevaluated children.
    ///
    /// Takes `&mut self` so implementations may carry per-call state
    /// such as the previous cut index.
    fn recombine<R: Rng>(
        &mut self,
        parent1: &Solution,
        parent2: &Solution,
        rng: &mut R,
    ) -> (Solution, Solution);
}

/// Perturbs one unevaluated solution in place.
pub trait MutationOperator {
    fn mutate<R: Rng>(&self, solution: &mut Solution, rng: &mut R);
}

/// Single-point crossover over equal-length genotypes.
///
/// With the configured probability, a cut index in `[1, L-1]` is chosen
/// (fixed or drawn per call) and the children exchange the gene
/// sub-sequences past the cut; otherwise the children are unmodified
/// parent copies. When cut repetition is forbidden, a freshly drawn cut
/// is redrawn until it differs from the previous call's cut (only
/// possible for `L > 2`).
#[derive(Debug, Clone)]
pub struct SinglePointCrossover {
    probability: f64,
    point: CrossoverPoint,
    allow_repetition: bool,
    last_cut: Option<usize>,
}

impl SinglePointCrossover {
    /// Creates the operator.
    pub fn new(probability: f64, point: CrossoverPoint, allow_repetition: bool) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            point,
            allow_repetition,
            last_cut: None,
        }
    }

    fn pick_cut<R: Rng>(&mut self, length: usize, rng: &mut R) -> usize {
        let cut = match self.point {
            CrossoverPoint::Fixed(p) => p.clamp(1, length - 1),
            CrossoverPoint::Random => {
                let mut cut = rng.random_range(1..length);
                if !self.allow_repetition && length > 2 {
                    while Some(cut) == self.last_cut {
                        cut = rng.random_range(1..length);
                    }
                }
                cut
            }
        };
        self.last_cut = Some(cut);
        cut
    }
}

impl CrossoverOperator for SinglePointCrossover {
    fn recombine<R: Rng>(
        &mut self,
        parent1: &Solution,
        parent2: &Solution,
        rng: &mut R,
    ) -> (Solution, Solution) {
        let length = parent1.num_variables();
        assert_eq!(
            length,
            parent2.num_variables(),
            "parents must have equal genotype length"
        );

        if length < 2 || rng.random_range(0.0..1.0) >= self.probability {
            return (
                Solution::new(parent1.genotype().to_vec()),
                Solution::new(parent2.genotype().to_vec()),
            );
        }

        let cut = self.pick_cut(length, rng);
        let mut child1 = parent1.genotype()[..cut].to_vec();
        child1.extend_from_slice(&parent2.genotype()[cut..]);
        let mut child2 = parent2.genotype()[..cut].to_vec();
        child2.extend_from_slice(&parent1.genotype()[cut..]);

        (Solution::new(child1), Solution::new(child2))
    }
}

/// Integer-flip mutation: each gene is independently replaced, with the
/// configured probability, by a fresh uniform draw from its own domain.
#[derive(Debug, Clone, Copy)]
pub struct IntegerFlipMutation {
    probability: f64,
}

impl IntegerFlipMutation {
    /// Creates the operator with a per-gene probability.
    pub fn new(probability: f64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
        }
    }
}

impl MutationOperator for IntegerFlipMutation {
    fn mutate<R: Rng>(&self, solution: &mut Solution, rng: &mut R) {
        for gene in solution.genotype_mut() {
            if rng.random_range(0.0..1.0) < self.probability {
                *gene = gene.resampled(rng);
            }
        }
    }
}

/// Neutral mutation: per-gene resampling accepted only when the
/// problem's neutrality criterion approves the replacement.
///
/// Applied to parent copies before crossover when enabled in the run
/// configuration. With the default criterion (nothing is neutral) this
/// is a no-op.
#[derive(Debug, Clone, Copy)]
pub struct NeutralMutation {
    probability: f64,
}

impl NeutralMutation {
    /// Creates the operator with a per-gene probability.
    pub fn new(probability: f64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
        }
    }

    /// Runs the pass over one solution.
    pub fn apply<P: Problem, R: Rng>(&self, problem: &P, solution: &mut Solution, rng: &mut R) {
        for locus in 0..solution.num_variables() {
            if rng.random_range(0.0..1.0) < self.probability {
                let candidate = solution.genotype()[locus].resampled(rng).value();
                if problem.is_neutral(solution.genotype(), locus, candidate) {
                    let replacement = solution.genotype()[locus].with_value(candidate);
                    solution.genotype_mut()[locus] = replacement;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;
    use crate::solution::{Gene, Population};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn genotype(values: &[i64]) -> Vec<Gene> {
        values.iter().map(|&v| Gene::new(v, 0, 9)).collect()
    }

    fn values(solution: &Solution) -> Vec<i64> {
        solution.genotype().iter().map(|g| g.value()).collect()
    }

    // ---- Single-point crossover ----

    #[test]
    fn test_crossover_fixed_cut_exchanges_tails() {
        let p1 = Solution::new(genotype(&[1, 1, 1, 1]));
        let p2 = Solution::new(genotype(&[2, 2, 2, 2]));
        let mut op = SinglePointCrossover::new(1.0, CrossoverPoint::Fixed(2), true);
        let mut rng = StdRng::seed_from_u64(42);

        let (c1, c2) = op.recombine(&p1, &p2, &mut rng);
        assert_eq!(values(&c1), vec![1, 1, 2, 2]);
        assert_eq!(values(&c2), vec![2, 2, 1, 1]);
    }

    #[test]
    fn test_crossover_children_are_unevaluated() {
        let mut p1 = Solution::new(genotype(&[1, 2, 3]));
        p1.set_objectives(vec![6.0]);
        let p2 = Solution::new(genotype(&[4, 5, 6]));
        let mut op = SinglePointCrossover::new(1.0, CrossoverPoint::Random, true);
        let mut rng = StdRng::seed_from_u64(42);

        let (c1, c2) = op.recombine(&p1, &p2, &mut rng);
        assert!(!c1.is_evaluated());
        assert!(!c2.is_evaluated());
    }

    #[test]
    fn test_crossover_zero_probability_copies_parents() {
        let p1 = Solution::new(genotype(&[1, 2, 3]));
        let p2 = Solution::new(genotype(&[4, 5, 6]));
        let mut op = SinglePointCrossover::new(0.0, CrossoverPoint::Random, true);
        let mut rng = StdRng::seed_from_u64(42);

        let (c1, c2) = op.recombine(&p1, &p2, &mut rng);
        assert_eq!(values(&c1), vec![1, 2, 3]);
        assert_eq!(values(&c2), vec![4, 5, 6]);
    }

    #[test]
    fn test_crossover_preserves_gene_multiset() {
        let p1 = Solution::new(genotype(&[1, 2, 3, 4, 5]));
        let p2 = Solution::new(genotype(&[5, 4, 3, 2, 1]));
        let mut op = SinglePointCrossover::new(1.0, CrossoverPoint::Random, true);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let (c1, c2) = op.recombine(&p1, &p2, &mut rng);
            for i in 0..5 {
                let mut pair = [c1.genotype()[i].value(), c2.genotype()[i].value()];
                pair.sort_unstable();
                let mut expected = [p1.genotype()[i].value(), p2.genotype()[i].value()];
                expected.sort_unstable();
                assert_eq!(pair, expected, "locus {i} lost a parental gene");
            }
        }
    }

    #[test]
    fn test_crossover_forbidden_repetition_never_reuses_cut() {
        let p1 = Solution::new(genotype(&[1, 1, 1, 1, 1, 1]));
        let p2 = Solution::new(genotype(&[2, 2, 2, 2, 2, 2]));
        let mut op = SinglePointCrossover::new(1.0, CrossoverPoint::Random, false);
        let mut rng = StdRng::seed_from_u64(42);

        let mut previous = None;
        for _ in 0..200 {
            op.recombine(&p1, &p2, &mut rng);
            let cut = op.last_cut.expect("crossover applied, cut recorded");
            if let Some(prev) = previous {
                assert_ne!(cut, prev, "consecutive cuts repeated");
            }
            previous = Some(cut);
        }
    }

    #[test]
    fn test_crossover_length_two_cuts_at_one() {
        let p1 = Solution::new(genotype(&[1, 1]));
        let p2 = Solution::new(genotype(&[2, 2]));
        let mut op = SinglePointCrossover::new(1.0, CrossoverPoint::Random, false);
        let mut rng = StdRng::seed_from_u64(42);

        let (c1, c2) = op.recombine(&p1, &p2, &mut rng);
        assert_eq!(values(&c1), vec![1, 2]);
        assert_eq!(values(&c2), vec![2, 1]);
    }

    #[test]
    #[should_panic(expected = "equal genotype length")]
    fn test_crossover_unequal_lengths_panics() {
        let p1 = Solution::new(genotype(&[1, 2]));
        let p2 = Solution::new(genotype(&[1, 2, 3]));
        let mut op = SinglePointCrossover::new(1.0, CrossoverPoint::Random, true);
        let mut rng = StdRng::seed_from_u64(42);
        op.recombine(&p1, &p2, &mut rng);
    }

    // ---- Integer-flip mutation ----

    #[test]
    fn test_mutation_zero_probability_is_noop() {
        let mut s = Solution::new(genotype(&[1, 2, 3]));
        let mut rng = StdRng::seed_from_u64(42);
        IntegerFlipMutation::new(0.0).mutate(&mut s, &mut rng);
        assert_eq!(values(&s), vec![1, 2, 3]);
    }

    #[test]
    fn test_mutation_stays_in_domain() {
        let mut rng = StdRng::seed_from_u64(42);
        let op = IntegerFlipMutation::new(1.0);
        for _ in 0..100 {
            let mut s = Solution::new(genotype(&[0, 5, 9]));
            op.mutate(&mut s, &mut rng);
            for g in s.genotype() {
                assert!((0..=9).contains(&g.value()));
            }
        }
    }

    #[test]
    fn test_mutation_eventually_changes_genes() {
        let mut rng = StdRng::seed_from_u64(42);
        let op = IntegerFlipMutation::new(1.0);
        let mut changed = false;
        for _ in 0..20 {
            let mut s = Solution::new(genotype(&[5, 5, 5, 5, 5]));
            op.mutate(&mut s, &mut rng);
            if values(&s) != vec![5, 5, 5, 5, 5] {
                changed = true;
                break;
            }
        }
        assert!(changed, "full-rate mutation never altered a genotype");
    }

    // ---- Neutral mutation ----

    struct ParityNeutral;

    impl Problem for ParityNeutral {
        fn new_random_solutions<R: Rng>(&self, n: usize, rng: &mut R) -> Population {
            let mut pop = Population::with_capacity(n);
            for _ in 0..n {
                pop.push(Solution::random(3, 0, 9, rng));
            }
            pop
        }

        fn evaluate(&self, population: &mut Population) -> Result<(), EvalError> {
            for s in population.iter_mut() {
                s.set_objectives(vec![0.0]);
            }
            Ok(())
        }

        fn num_objectives(&self) -> usize {
            1
        }

        fn num_variables(&self) -> usize {
            3
        }

        fn is_neutral(&self, genotype: &[Gene], locus: usize, candidate: i64) -> bool {
            // Same parity = same (toy) phenotype expression.
            genotype[locus].value() % 2 == candidate % 2
        }
    }

    #[test]
    fn test_neutral_mutation_preserves_parity() {
        let mut rng = StdRng::seed_from_u64(42);
        let op = NeutralMutation::new(1.0);
        for _ in 0..50 {
            let mut s = Solution::new(genotype(&[2, 5, 8]));
            op.apply(&ParityNeutral, &mut s, &mut rng);
            let v = values(&s);
            assert_eq!(v[0] % 2, 0);
            assert_eq!(v[1] % 2, 1);
            assert_eq!(v[2] % 2, 0);
        }
    }

    #[test]
    fn test_neutral_mutation_can_change_values() {
        let mut rng = StdRng::seed_from_u64(42);
        let op = NeutralMutation::new(1.0);
        let mut changed = false;
        for _ in 0..50 {
            let mut s = Solution::new(genotype(&[2, 5, 8]));
            op.apply(&ParityNeutral, &mut s, &mut rng);
            if values(&s) != vec![2, 5, 8] {
                changed = true;
                break;
            }
        }
        assert!(changed, "neutral mutation never injected diversity");
    }

    struct NothingNeutral;

    impl Problem for NothingNeutral {
        fn new_random_solutions<R: Rng>(&self, _n: usize, _rng: &mut R) -> Population {
            Population::new()
        }

        fn evaluate(&self, _population: &mut Population) -> Result<(), EvalError> {
            Ok(())
        }

        fn num_objectives(&self) -> usize {
            1
        }

        fn num_variables(&self) -> usize {
            3
        }
    }

    #[test]
    fn test_neutral_mutation_default_criterion_is_noop() {
        let mut rng = StdRng::seed_from_u64(42);
        let op = NeutralMutation::new(1.0);
        let mut s = Solution::new(genotype(&[2, 5, 8]));
        op.apply(&NothingNeutral, &mut s, &mut rng);
        assert_eq!(values(&s), vec![2, 5, 8]);
    }
}
