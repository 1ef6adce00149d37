//! External collaborator traits.
//!
//! The engine is a black-box optimizer: everything domain-specific —
//! genotype construction, genotype-to-phenotype mapping, scoring — lives
//! behind [`Problem`]. A problem implementation will typically delegate
//! scoring to a [`FitnessEvaluator`]; the engine itself never calls the
//! evaluator directly.

use crate::error::EvalError;
use crate::solution::{Gene, Population};
use rand::Rng;

/// A multi-objective optimization problem.
///
/// Implementations own the genotype layout (length, per-locus domains)
/// and the mapping from genotype to objective values. All objectives
/// are minimized.
pub trait Problem {
    /// Creates `n` random, unevaluated solutions.
    ///
    /// Genotype length and gene domains must match
    /// [`num_variables`](Problem::num_variables) and stay fixed for the
    /// whole run.
    fn new_random_solutions<R: Rng>(&self, n: usize, rng: &mut R) -> Population;

    /// Populates the objective vector of every member.
    ///
    /// The call is synchronous from the engine's perspective; the
    /// implementation may parallelize internally but must return only
    /// once every member carries a full objective vector of length
    /// [`num_objectives`](Problem::num_objectives) — partial results are
    /// not a supported contract. A fault (e.g. an unmappable genotype)
    /// aborts the run; the engine never retries.
    fn evaluate(&self, population: &mut Population) -> Result<(), EvalError>;

    /// Number of objectives per evaluated solution.
    fn num_objectives(&self) -> usize;

    /// Genotype length.
    fn num_variables(&self) -> usize;

    /// Neutrality predicate for [`NeutralMutation`](crate::operators::NeutralMutation).
    ///
    /// Returns whether replacing the gene at `locus` with `candidate`
    /// leaves the fitness-relevant phenotype expression unchanged. The
    /// criterion is problem-specific; the default considers nothing
    /// neutral, which turns neutral mutation into a no-op.
    fn is_neutral(&self, _genotype: &[Gene], _locus: usize, _candidate: i64) -> bool {
        false
    }
}

/// Scores a single phenotype state. Used *by* problem implementations,
/// never called by the engine.
pub trait FitnessEvaluator<S> {
    /// Scores a simulation/phenotype state. Lower is better.
    fn evaluate(&self, state: &S) -> f64;

    /// Sentinel returned when a phenotype cannot be scored at all.
    fn worst_fitness(&self) -> f64;

    /// Identifier for reporting.
    fn name(&self) -> &str;
}
