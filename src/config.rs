//! Run configuration.
//!
//! [`EvolutionConfig`] holds every parameter of a run. It is fixed at
//! engine construction and never mutated mid-run.

use crate::error::Error;

/// Survivor-selection policy applied at the end of each generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SurvivorPolicy {
    /// Union the parent and child populations, then reduce to the
    /// target size.
    Merge,

    /// Copy the top `elite_size` parents (by dominance sort) into the
    /// child population, then reduce to the target size.
    #[default]
    Elitist,
}

/// How the single-point crossover cut index is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverPoint {
    /// Draw a fresh cut in `[1, L-1]` per call.
    #[default]
    Random,

    /// Always cut at this index (clamped into `[1, L-1]`).
    Fixed(usize),
}

/// Configuration for one evolutionary run.
///
/// # Defaults
///
/// ```
/// use moge::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use moge::{EvolutionConfig, SurvivorPolicy};
///
/// let config = EvolutionConfig::default()
///     .with_population_size(200)
///     .with_survivor_policy(SurvivorPolicy::Merge)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionConfig {
    /// Target number of solutions held at generation boundaries.
    pub population_size: usize,

    /// Generation budget: the run terminates once this many generations
    /// have completed (unless stopped earlier).
    pub max_generations: usize,

    /// Per-gene probability of integer-flip mutation (0.0–1.0).
    ///
    /// A common setting is `1 / genotype_length`; see
    /// [`for_problem`](Self::for_problem).
    pub mutation_probability: f64,

    /// Probability of applying crossover to a parent pair (0.0–1.0).
    /// When not applied, the children are unmodified parent copies.
    pub crossover_probability: f64,

    /// Number of top-ranked parents copied into the child population
    /// under [`SurvivorPolicy::Elitist`].
    pub elite_size: usize,

    /// Whether parents receive a neutral-mutation pass before crossover.
    ///
    /// Only effective when the problem supplies a neutrality criterion
    /// (see [`Problem::is_neutral`](crate::Problem::is_neutral)).
    pub neutral_mutation: bool,

    /// Survivor-selection policy. Elitist by default.
    pub survivor_policy: SurvivorPolicy,

    /// Crossover cut-index policy.
    pub crossover_point: CrossoverPoint,

    /// Whether consecutive randomly drawn cuts may repeat the previous
    /// cut index.
    pub allow_cut_repetition: bool,

    /// Random seed for reproducibility. A fixed seed reproduces an
    /// identical run; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            mutation_probability: 0.1,
            crossover_probability: 0.9,
            elite_size: 10,
            neutral_mutation: false,
            survivor_policy: SurvivorPolicy::default(),
            crossover_point: CrossoverPoint::default(),
            allow_cut_repetition: true,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Defaults tuned to a genotype length: mutation probability
    /// `1 / num_variables`.
    pub fn for_problem(num_variables: usize) -> Self {
        Self {
            mutation_probability: 1.0 / num_variables.max(1) as f64,
            ..Self::default()
        }
    }

    /// Sets the target population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the per-gene mutation probability (clamped to `[0, 1]`).
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover probability (clamped to `[0, 1]`).
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the elite size.
    pub fn with_elite_size(mut self, n: usize) -> Self {
        self.elite_size = n;
        self
    }

    /// Enables or disables the neutral-mutation pass on parents.
    pub fn with_neutral_mutation(mut self, enabled: bool) -> Self {
        self.neutral_mutation = enabled;
        self
    }

    /// Sets the survivor-selection policy.
    pub fn with_survivor_policy(mut self, policy: SurvivorPolicy) -> Self {
        self.survivor_policy = policy;
        self
    }

    /// Sets the crossover cut-index policy.
    pub fn with_crossover_point(mut self, point: CrossoverPoint) -> Self {
        self.crossover_point = point;
        self
    }

    /// Allows or forbids consecutive reuse of the same random cut index.
    pub fn with_cut_repetition(mut self, allowed: bool) -> Self {
        self.allow_cut_repetition = allowed;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), Error> {
        if self.population_size < 2 {
            return Err(Error::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(Error::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if self.elite_size >= self.population_size {
            return Err(Error::InvalidConfig(
                "elite_size must be smaller than population_size".into(),
            ));
        }
        if let CrossoverPoint::Fixed(0) = self.crossover_point {
            return Err(Error::InvalidConfig(
                "a fixed crossover point must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
