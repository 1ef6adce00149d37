//! The evolution engine: generation loop and survivor selection.
//!
//! [`Engine`] orchestrates one run end to end:
//! initialization → (selection → neutral mutation → crossover →
//! mutation → evaluation → survivor selection) per generation, with
//! statistics collection and observer notifications after every step.

use crate::config::{EvolutionConfig, SurvivorPolicy};
use crate::error::Error;
use crate::operators::{
    CrossoverOperator, IntegerFlipMutation, MutationOperator, NeutralMutation,
    SinglePointCrossover,
};
use crate::pareto;
use crate::problem::Problem;
use crate::selection::{BinaryTournament, SelectionOperator};
use crate::solution::Population;
use crate::stats::Statistics;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lifecycle state of an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, population not yet created.
    Uninitialized,
    /// Initial population created and evaluated.
    Initialized,
    /// Generation loop in progress.
    Running,
    /// Run complete; the population has been collapsed to its rank-0
    /// front.
    Terminated,
}

/// Advisory progress notifications.
///
/// Observers are injected at construction time; no engine behavior
/// depends on a subscriber's response.
pub trait Observer {
    /// Called once when the generation loop starts.
    fn on_start(&mut self) {}

    /// Called after every completed generation with the new generation
    /// index and the surviving population.
    fn on_generation(&mut self, _generation: usize, _population: &Population) {}

    /// Called once when the run terminates.
    fn on_end(&mut self) {}
}

/// NSGA-II-style reduction of a population to `max_size` members.
///
/// Extracts ranked fronts, assigns crowding distances within each front,
/// and appends whole fronts in rank order while the running total stays
/// below `max_size`; once a front's addition meets or exceeds the limit,
/// no further fronts are added. An overfull result is then ordered by
/// rank-then-crowding and trimmed from the tail. Crowding distances used
/// for that truncation are the ones computed on each member's original
/// front, not recomputed against the truncated mixture.
///
/// Always returns exactly `min(max_size, population.len())` members and
/// retains all of front 0 whenever it fits.
pub fn reduce(mut population: Population, max_size: usize) -> Population {
    let fronts = pareto::extract_fronts(&mut population);

    let mut reduced = Population::with_capacity(max_size);
    for front in &fronts {
        if reduced.len() >= max_size {
            break;
        }
        pareto::assign_crowding_distance(&mut population, front);
        for &i in front {
            reduced.push(population[i].clone());
        }
    }

    if reduced.len() > max_size {
        reduced.sort_by(pareto::rank_then_crowding);
        reduced.truncate(max_size);
    }
    reduced
}

/// Multi-objective evolutionary engine.
///
/// Single-threaded, synchronous generation loop over a population that
/// is replaced wholesale each generation. All randomness flows through
/// one seedable [`StdRng`], so a fixed seed reproduces a run
/// bit-for-bit.
///
/// # Usage
///
/// ```ignore
/// let mut engine = Engine::new(&problem, EvolutionConfig::default().with_seed(42))?;
/// engine.initialize()?;
/// let pareto_front = engine.execute()?;
/// ```
pub struct Engine<'a, P, S = BinaryTournament, C = SinglePointCrossover, M = IntegerFlipMutation>
where
    P: Problem,
    S: SelectionOperator,
    C: CrossoverOperator,
    M: MutationOperator,
{
    problem: &'a P,
    config: EvolutionConfig,
    selection: S,
    crossover: C,
    mutation: M,
    neutral_mutation: NeutralMutation,
    rng: StdRng,
    population: Population,
    generation: usize,
    state: EngineState,
    statistics: Statistics,
    stop: Arc<AtomicBool>,
    observers: Vec<Box<dyn Observer>>,
}

impl<'a, P: Problem> Engine<'a, P> {
    /// Creates an engine with the standard operator set: binary
    /// tournament selection, single-point crossover, and integer-flip
    /// mutation, all parameterized from `config`.
    pub fn new(problem: &'a P, config: EvolutionConfig) -> Result<Self, Error> {
        let crossover = SinglePointCrossover::new(
            config.crossover_probability,
            config.crossover_point,
            config.allow_cut_repetition,
        );
        let mutation = IntegerFlipMutation::new(config.mutation_probability);
        Self::with_operators(problem, config, BinaryTournament, crossover, mutation)
    }
}

impl<'a, P, S, C, M> Engine<'a, P, S, C, M>
where
    P: Problem,
    S: SelectionOperator,
    C: CrossoverOperator,
    M: MutationOperator,
{
    /// Creates an engine with custom operator variants.
    pub fn with_operators(
        problem: &'a P,
        config: EvolutionConfig,
        selection: S,
        crossover: C,
        mutation: M,
    ) -> Result<Self, Error> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let neutral_mutation = NeutralMutation::new(config.mutation_probability);
        let statistics = Statistics::new(config.population_size);
        Ok(Self {
            problem,
            config,
            selection,
            crossover,
            mutation,
            neutral_mutation,
            rng: StdRng::seed_from_u64(seed),
            population: Population::new(),
            generation: 0,
            state: EngineState::Uninitialized,
            statistics,
            stop: Arc::new(AtomicBool::new(false)),
            observers: Vec::new(),
        })
    }

    /// Registers a progress observer.
    pub fn add_observer(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Handle for cooperative cancellation. Setting the flag stops the
    /// run at the next generation boundary; a step is never interrupted
    /// mid-flight.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Current generation index (0 until the first step completes).
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The current working population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Statistics collected so far.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Creates and evaluates the initial population and assigns crowding
    /// distances over the whole (unranked) initial set.
    pub fn initialize(&mut self) -> Result<(), Error> {
        self.population = self
            .problem
            .new_random_solutions(self.config.population_size, &mut self.rng);
        self.problem.evaluate(&mut self.population)?;

        let everyone: Vec<usize> = (0..self.population.len()).collect();
        pareto::assign_crowding_distance(&mut self.population, &everyone);

        self.generation = 0;
        self.state = EngineState::Initialized;
        Ok(())
    }

    /// Runs the generation loop until the budget is exhausted or the
    /// stop flag is observed, then returns the rank-0 front.
    pub fn execute(&mut self) -> Result<&Population, Error> {
        if self.state != EngineState::Initialized {
            return Err(Error::InvalidState("execute() requires initialize() first"));
        }
        self.state = EngineState::Running;

        tracing::info!(
            population_size = self.config.population_size,
            max_generations = self.config.max_generations,
            "evolution started"
        );
        for observer in self.observers.iter_mut() {
            observer.on_start();
        }

        let mut next_percentage_report = 10;
        while !self.stop.load(Ordering::Relaxed)
            && self.generation < self.config.max_generations
        {
            self.step()?;

            let percentage = self.generation * 100 / self.config.max_generations;
            if percentage >= next_percentage_report {
                tracing::info!(
                    generation = self.generation,
                    "{percentage}% of the generation budget performed"
                );
                next_percentage_report += 10;
            }

            self.statistics.record(&self.population);

            let generation = self.generation;
            for observer in self.observers.iter_mut() {
                observer.on_generation(generation, &self.population);
            }
        }

        self.state = EngineState::Terminated;
        for observer in self.observers.iter_mut() {
            observer.on_end();
        }
        tracing::info!(generation = self.generation, "evolution finished");

        Ok(self.current_solution())
    }

    /// Performs one generation.
    ///
    /// The generation counter advances first; a degenerate population
    /// (fewer than 2 members) is logged and produces no offspring for
    /// that generation while the counter still advances.
    pub fn step(&mut self) -> Result<(), Error> {
        self.generation += 1;

        if self.population.len() < 2 {
            tracing::error!(
                generation = self.generation,
                size = self.population.len(),
                "population too small to breed; skipping offspring this generation"
            );
            return Ok(());
        }

        let target = self.config.population_size;
        let mut children = Population::with_capacity(target + self.config.elite_size);
        while children.len() < target {
            let first = self.selection.select(&self.population, &mut self.rng);
            let second = self.selection.select(&self.population, &mut self.rng);
            let mut parent1 = self.population[first].clone();
            let mut parent2 = self.population[second].clone();

            if self.config.neutral_mutation {
                self.neutral_mutation
                    .apply(self.problem, &mut parent1, &mut self.rng);
                self.neutral_mutation
                    .apply(self.problem, &mut parent2, &mut self.rng);
            }

            let (child1, child2) = self.crossover.recombine(&parent1, &parent2, &mut self.rng);
            children.push(child1);
            if children.len() < target {
                children.push(child2);
            }
        }

        for child in children.iter_mut() {
            self.mutation.mutate(child, &mut self.rng);
        }

        self.problem.evaluate(&mut children)?;

        self.population = match self.config.survivor_policy {
            SurvivorPolicy::Merge => {
                let mut mixed = self.population.clone();
                mixed.extend(children);
                reduce(mixed, target)
            }
            SurvivorPolicy::Elitist => {
                pareto::sort_by_dominance(&mut self.population);
                for i in 0..self.config.elite_size {
                    children.push(self.population[i].clone());
                }
                reduce(children, target)
            }
        };

        tracing::debug!(
            generation = self.generation,
            max_generations = self.config.max_generations,
            size = self.population.len(),
            "generation complete"
        );
        Ok(())
    }

    /// Collapses the working population in place to its rank-0 front and
    /// returns it: the published result is the non-dominated set, not
    /// the whole working population.
    pub fn current_solution(&mut self) -> &Population {
        self.population.reduce_to_non_dominated();
        &self.population
    }
}
