//! Per-generation statistics bookkeeping.
//!
//! [`Statistics`] records one entry per completed generation:
//! absolute-best, best, average, and worst objective vectors. The series
//! are exposed read-only; the core performs no rendering.

use crate::pareto::{dominance, Dominance};
use crate::solution::Population;

/// Objective-vector series collected after each generation.
///
/// [`record`](Statistics::record) assumes the population has just been
/// sorted by dominance: the first member is the best-ranked solution and
/// the last is the positionally worst. That precondition is part of the
/// contract, not incidental.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statistics {
    population_size: usize,
    absolute_best: Option<Vec<f64>>,
    absolute_best_objectives: Vec<Vec<f64>>,
    best_objectives: Vec<Vec<f64>>,
    average_objectives: Vec<Vec<f64>>,
    worst_objectives: Vec<Vec<f64>>,
}

impl Statistics {
    /// Creates an empty collector for a run with the given configured
    /// population size.
    pub fn new(population_size: usize) -> Self {
        Self {
            population_size,
            ..Self::default()
        }
    }

    /// Appends one generation's entry from a dominance-sorted population.
    pub fn record(&mut self, population: &Population) {
        let Some(current_best) = population.get(0) else {
            return;
        };

        // Absolute best advances only on a strict dominance win.
        let improved = match &self.absolute_best {
            None => true,
            Some(incumbent) => {
                dominance(current_best.objectives(), incumbent) == Dominance::Dominates
            }
        };
        if improved {
            self.absolute_best = Some(current_best.objectives().to_vec());
        }
        self.absolute_best_objectives.push(
            self.absolute_best
                .clone()
                .expect("absolute_best set on first record"),
        );

        self.best_objectives.push(current_best.objectives().to_vec());

        // Per-objective mean over the configured target size, not the
        // actual member count. An undersized population therefore yields
        // a skewed average; inherited behavior, kept as-is.
        let num_objectives = current_best.objectives().len();
        let mut average = vec![0.0f64; num_objectives];
        for solution in population.iter() {
            for (i, &value) in solution.objectives().iter().enumerate() {
                average[i] += value;
            }
        }
        for value in average.iter_mut() {
            *value /= self.population_size as f64;
        }
        self.average_objectives.push(average);

        let worst = &population[population.len() - 1];
        self.worst_objectives.push(worst.objectives().to_vec());
    }

    /// Number of generations recorded so far.
    pub fn generations_recorded(&self) -> usize {
        self.best_objectives.len()
    }

    /// Running absolute-best series, one entry per generation.
    pub fn absolute_best_objectives(&self) -> &[Vec<f64>] {
        &self.absolute_best_objectives
    }

    /// Per-generation best (top-ranked member) objective vectors.
    pub fn best_objectives(&self) -> &[Vec<f64>] {
        &self.best_objectives
    }

    /// Per-generation average objective vectors.
    pub fn average_objectives(&self) -> &[Vec<f64>] {
        &self.average_objectives
    }

    /// Per-generation worst objective vectors (last positional member of
    /// the sorted population — an artifact of the sort order, not a
    /// guaranteed Pareto-worst individual).
    pub fn worst_objectives(&self) -> &[Vec<f64>] {
        &self.worst_objectives
    }
}
