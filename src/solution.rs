//! Candidate-solution data model.
//!
//! A [`Gene`] is one integer locus with a fixed domain, a [`Solution`]
//! pairs a fixed-length genotype with its objective vector, and a
//! [`Population`] is an ordered, growable collection of solutions.
//!
//! Solutions are value records: operators never edit a live solution that
//! another holder can observe — children are produced fresh each
//! generation and the whole population is replaced wholesale.

use crate::pareto::{self, Dominance};
use rand::Rng;

/// A single integer locus with a fixed inclusive domain `[lower, upper]`.
///
/// The domain is fixed for the run; mutation produces a replacement
/// `Gene`, never an in-place edit visible to other holders (`Gene` is
/// `Copy`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gene {
    value: i64,
    lower: i64,
    upper: i64,
}

impl Gene {
    /// Creates a gene with the given value and domain.
    ///
    /// The value is clamped into `[lower, upper]`.
    ///
    /// # Panics
    /// Panics if `lower > upper`.
    pub fn new(value: i64, lower: i64, upper: i64) -> Self {
        assert!(lower <= upper, "gene domain must satisfy lower <= upper");
        Self {
            value: value.clamp(lower, upper),
            lower,
            upper,
        }
    }

    /// Creates a gene with a value drawn uniformly from `[lower, upper]`.
    pub fn random<R: Rng>(lower: i64, upper: i64, rng: &mut R) -> Self {
        assert!(lower <= upper, "gene domain must satisfy lower <= upper");
        Self {
            value: rng.random_range(lower..=upper),
            lower,
            upper,
        }
    }

    /// The current value.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Lower domain bound (inclusive).
    pub fn lower(&self) -> i64 {
        self.lower
    }

    /// Upper domain bound (inclusive).
    pub fn upper(&self) -> i64 {
        self.upper
    }

    /// Returns a replacement gene with a fresh uniform value from the
    /// same domain.
    pub fn resampled<R: Rng>(&self, rng: &mut R) -> Self {
        Self {
            value: rng.random_range(self.lower..=self.upper),
            lower: self.lower,
            upper: self.upper,
        }
    }

    /// Returns a replacement gene carrying `value`, clamped to this
    /// gene's domain.
    pub fn with_value(&self, value: i64) -> Self {
        Self {
            value: value.clamp(self.lower, self.upper),
            lower: self.lower,
            upper: self.upper,
        }
    }
}

/// One candidate: a fixed-length genotype plus its objective vector.
///
/// The objective vector is empty until the external evaluator populates
/// it; a solution is invalid for dominance and crowding computations
/// until then (see [`is_evaluated`](Solution::is_evaluated)).
///
/// `rank` and `crowding_distance` are transient attributes written
/// during survivor selection. A crowding distance is only meaningful as
/// a ranking key within the front it was computed on.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    genotype: Vec<Gene>,
    objectives: Vec<f64>,
    rank: usize,
    crowding_distance: f64,
}

impl Solution {
    /// Creates an unevaluated solution from a genotype.
    pub fn new(genotype: Vec<Gene>) -> Self {
        Self {
            genotype,
            objectives: Vec::new(),
            rank: 0,
            crowding_distance: 0.0,
        }
    }

    /// Creates an unevaluated solution with `length` genes drawn
    /// uniformly from the shared domain `[lower, upper]`.
    pub fn random<R: Rng>(length: usize, lower: i64, upper: i64, rng: &mut R) -> Self {
        let genotype = (0..length)
            .map(|_| Gene::random(lower, upper, rng))
            .collect();
        Self::new(genotype)
    }

    /// The genotype as an immutable slice.
    pub fn genotype(&self) -> &[Gene] {
        &self.genotype
    }

    /// Mutable access to the genotype.
    ///
    /// Writing through this invalidates any previously stored objective
    /// vector; callers (the genetic operators) only touch unevaluated
    /// children.
    pub fn genotype_mut(&mut self) -> &mut [Gene] {
        &mut self.genotype
    }

    /// Genotype length.
    pub fn num_variables(&self) -> usize {
        self.genotype.len()
    }

    /// The objective vector. Empty until evaluated.
    pub fn objectives(&self) -> &[f64] {
        &self.objectives
    }

    /// The `i`-th objective value.
    ///
    /// # Panics
    /// Panics if the solution is unevaluated or `i` is out of range.
    pub fn objective(&self, i: usize) -> f64 {
        self.objectives[i]
    }

    /// Stores the objective vector. Called by the external evaluator.
    pub fn set_objectives(&mut self, objectives: Vec<f64>) {
        self.objectives = objectives;
    }

    /// Whether the objective vector has been populated.
    pub fn is_evaluated(&self) -> bool {
        !self.objectives.is_empty()
    }

    /// Non-dominance rank (front index) from the last fronts extraction.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Crowding distance from the last assignment over this solution's
    /// front.
    pub fn crowding_distance(&self) -> f64 {
        self.crowding_distance
    }

    pub(crate) fn set_rank(&mut self, rank: usize) {
        self.rank = rank;
    }

    pub(crate) fn set_crowding_distance(&mut self, distance: f64) {
        self.crowding_distance = distance;
    }
}

/// Ordered, growable collection of solutions.
///
/// Order is significant only after an explicit sort: algorithms that
/// rely on "first element = best" (elite copying, statistics) require
/// the population to have been sorted immediately beforehand, and that
/// dependency is part of their contract.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population {
    solutions: Vec<Solution>,
}

impl Population {
    /// Creates an empty population.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty population with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            solutions: Vec::with_capacity(capacity),
        }
    }

    /// Number of member solutions.
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Whether the population has no members.
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Appends a solution.
    pub fn push(&mut self, solution: Solution) {
        self.solutions.push(solution);
    }

    /// Drops members past `len`, keeping the first `len` in order.
    pub fn truncate(&mut self, len: usize) {
        self.solutions.truncate(len);
    }

    /// Borrow the `index`-th member.
    pub fn get(&self, index: usize) -> Option<&Solution> {
        self.solutions.get(index)
    }

    /// Borrow the `index`-th member mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Solution> {
        self.solutions.get_mut(index)
    }

    /// The members as a slice.
    pub fn as_slice(&self) -> &[Solution] {
        &self.solutions
    }

    /// Iterates over members.
    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.solutions.iter()
    }

    /// Iterates mutably over members.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Solution> {
        self.solutions.iter_mut()
    }

    /// Sorts members with the given comparator.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Solution, &Solution) -> std::cmp::Ordering,
    {
        self.solutions.sort_by(compare);
    }

    /// Collapses this population in place to its non-dominated subset
    /// (the rank-0 front). Relative order of survivors is preserved.
    ///
    /// Idempotent: applying it to an already non-dominated set is a
    /// no-op.
    pub fn reduce_to_non_dominated(&mut self) {
        let keep: Vec<bool> = self
            .solutions
            .iter()
            .map(|candidate| {
                !self.solutions.iter().any(|other| {
                    pareto::dominance(other.objectives(), candidate.objectives())
                        == Dominance::Dominates
                })
            })
            .collect();
        let mut index = 0;
        self.solutions.retain(|_| {
            let kept = keep[index];
            index += 1;
            kept
        });
    }
}

impl From<Vec<Solution>> for Population {
    fn from(solutions: Vec<Solution>) -> Self {
        Self { solutions }
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Solution;

    fn index(&self, index: usize) -> &Solution {
        &self.solutions[index]
    }
}

impl Extend<Solution> for Population {
    fn extend<T: IntoIterator<Item = Solution>>(&mut self, iter: T) {
        self.solutions.extend(iter);
    }
}

impl IntoIterator for Population {
    type Item = Solution;
    type IntoIter = std::vec::IntoIter<Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.into_iter()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}
