//! Multi-objective evolutionary optimizer core.
//!
//! Evolves a population of fixed-length integer-vector genotypes toward
//! a Pareto-optimal set across several minimized objectives, using
//! NSGA-II-style survivor selection under a grammatical-evolution-style
//! genotype representation. The grammar that maps genotypes to runnable
//! phenotypes and the domain fitness evaluator are external
//! collaborators behind the [`Problem`] trait; this crate is the
//! optimizer itself.
//!
//! # Components
//!
//! - [`solution`]: [`Gene`] / [`Solution`] / [`Population`] data model
//! - [`pareto`]: dominance, fronts extraction, crowding distance
//! - [`selection`], [`operators`]: binary tournament, single-point
//!   crossover, integer-flip and neutral mutation
//! - [`runner`]: the [`Engine`] generation loop and survivor policies
//! - [`stats`]: per-generation objective-vector series
//!
//! # Example
//!
//! ```ignore
//! use moge::{Engine, EvolutionConfig};
//!
//! let config = EvolutionConfig::for_problem(problem.num_variables())
//!     .with_population_size(100)
//!     .with_max_generations(250)
//!     .with_seed(42);
//! let mut engine = Engine::new(&problem, config)?;
//! engine.initialize()?;
//! let pareto_front = engine.execute()?;
//! ```
//!
//! A fixed seed reproduces a run bit-for-bit: every operator draws from
//! the engine's single seedable random source.
//!
//! # References
//!
//! - Deb et al. (2002), *A Fast and Elitist Multiobjective GA: NSGA-II*
//! - Ryan, Collins & O'Neill (1998), *Grammatical Evolution: Evolving
//!   Programs for an Arbitrary Language*

pub mod config;
pub mod error;
pub mod operators;
pub mod pareto;
pub mod problem;
pub mod runner;
pub mod selection;
pub mod solution;
pub mod stats;

pub use config::{CrossoverPoint, EvolutionConfig, SurvivorPolicy};
pub use error::{Error, EvalError};
pub use operators::{
    CrossoverOperator, IntegerFlipMutation, MutationOperator, NeutralMutation,
    SinglePointCrossover,
};
pub use pareto::Dominance;
pub use problem::{FitnessEvaluator, Problem};
pub use runner::{reduce, Engine, EngineState, Observer};
pub use selection::{BinaryTournament, SelectionOperator};
pub use solution::{Gene, Population, Solution};
pub use stats::Statistics;
