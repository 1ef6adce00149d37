//! Pareto machinery: dominance, fronts extraction, crowding distance.
//!
//! All objectives are **minimized**: lower values are better.
//!
//! # Algorithms
//!
//! - [`extract_fronts`]: fast non-dominated sorting (Deb et al., 2002)
//! - [`assign_crowding_distance`]: per-front diversity metric
//! - [`rank_then_crowding`]: the NSGA-II total order used by tournament
//!   selection and boundary-front truncation
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic
//!   Algorithm: NSGA-II", IEEE Trans. Evolutionary Computation 6(2)

use crate::solution::{Population, Solution};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::cmp::Ordering;

/// Pairwise Pareto-dominance relation between two objective vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// The left vector strictly dominates the right.
    Dominates,
    /// The right vector strictly dominates the left.
    DominatedBy,
    /// Neither dominates the other.
    NonDominated,
}

impl Dominance {
    /// Maps the relation to an [`Ordering`]: `Less` if the left side
    /// dominates, `Greater` if the right side does, `Equal` otherwise.
    ///
    /// The `Equal` case means *mutually non-dominating*, not equivalent;
    /// callers needing a total order must apply a secondary key such as
    /// [`rank_then_crowding`].
    pub fn as_ordering(self) -> Ordering {
        match self {
            Dominance::Dominates => Ordering::Less,
            Dominance::DominatedBy => Ordering::Greater,
            Dominance::NonDominated => Ordering::Equal,
        }
    }
}

/// Compares two objective vectors for Pareto dominance (minimization).
///
/// `a` strictly dominates `b` iff `a[i] <= b[i]` for every objective
/// and `a[i] < b[i]` for at least one.
pub fn dominance(a: &[f64], b: &[f64]) -> Dominance {
    debug_assert_eq!(
        a.len(),
        b.len(),
        "objective vectors must have equal length"
    );

    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Dominates,
        (false, true) => Dominance::DominatedBy,
        _ => Dominance::NonDominated,
    }
}

/// Total order over ranked solutions: ascending front rank first, ties
/// broken by descending crowding distance (more isolated preferred).
///
/// Both solutions must carry rank and crowding distance from a prior
/// [`extract_fronts`] / [`assign_crowding_distance`] pass.
pub fn rank_then_crowding(a: &Solution, b: &Solution) -> Ordering {
    a.rank().cmp(&b.rank()).then_with(|| {
        b.crowding_distance()
            .partial_cmp(&a.crowding_distance())
            .unwrap_or(Ordering::Equal)
    })
}

/// Upper-triangle dominance relations: row `i` holds `(j, relation)` for
/// every `j > i`.
#[cfg(feature = "parallel")]
fn dominance_rows(objectives: &[&[f64]]) -> Vec<Vec<(usize, Dominance)>> {
    (0..objectives.len())
        .into_par_iter()
        .map(|i| {
            ((i + 1)..objectives.len())
                .map(|j| (j, dominance(objectives[i], objectives[j])))
                .collect()
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn dominance_rows(objectives: &[&[f64]]) -> Vec<Vec<(usize, Dominance)>> {
    (0..objectives.len())
        .map(|i| {
            ((i + 1)..objectives.len())
                .map(|j| (j, dominance(objectives[i], objectives[j])))
                .collect()
        })
        .collect()
}

/// Partitions a population into ranked non-dominated fronts.
///
/// Front 0 is exactly the non-dominated subset, front 1 is non-dominated
/// among the remainder, and so on. Every member's transient rank is
/// updated; the returned fronts hold member indices into `population`.
///
/// Every member of the input ends up in exactly one front. Cost is
/// O(n²·m); with the `parallel` feature the pairwise pass is computed
/// across rayon workers with identical results.
pub fn extract_fronts(population: &mut Population) -> Vec<Vec<usize>> {
    let n = population.len();
    if n == 0 {
        return Vec::new();
    }

    let mut domination_count = vec![0usize; n];
    let mut dominated: Vec<Vec<usize>> = vec![Vec::new(); n];

    {
        let objectives: Vec<&[f64]> = population.iter().map(|s| s.objectives()).collect();
        for (i, row) in dominance_rows(&objectives).into_iter().enumerate() {
            for (j, relation) in row {
                match relation {
                    Dominance::Dominates => {
                        dominated[i].push(j);
                        domination_count[j] += 1;
                    }
                    Dominance::DominatedBy => {
                        dominated[j].push(i);
                        domination_count[i] += 1;
                    }
                    Dominance::NonDominated => {}
                }
            }
        }
    }

    let front_0: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    let mut fronts = vec![front_0];

    loop {
        let current = fronts
            .last()
            .expect("fronts starts with front 0 and is never emptied");
        let mut next_front = Vec::new();

        for &i in current {
            for &j in &dominated[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    next_front.push(j);
                }
            }
        }

        if next_front.is_empty() {
            break;
        }
        fronts.push(next_front);
    }

    for (rank, front) in fronts.iter().enumerate() {
        for &i in front {
            population
                .get_mut(i)
                .expect("front indices are in range")
                .set_rank(rank);
        }
    }

    fronts
}

/// Assigns crowding distances over one front.
///
/// For each objective dimension independently, the front is sorted by
/// that objective; the two boundary members receive infinity and every
/// interior member accumulates `(next - prev) / (max - min)`. A
/// degenerate dimension (`max == min`) contributes zero for every
/// member, never a division fault. A front of size 1 or 2 gets infinity
/// throughout.
///
/// Distances must be recomputed whenever front membership changes; a
/// value computed on one front is invalid on another.
pub fn assign_crowding_distance(population: &mut Population, front: &[usize]) {
    let n = front.len();
    if n == 0 {
        return;
    }
    if n <= 2 {
        for &i in front {
            population
                .get_mut(i)
                .expect("front indices are in range")
                .set_crowding_distance(f64::INFINITY);
        }
        return;
    }

    let m = population[front[0]].objectives().len();
    // Contributions indexed by position within the front.
    let mut distances = vec![0.0f64; n];

    for obj_idx in 0..m {
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            population[front[a]]
                .objective(obj_idx)
                .partial_cmp(&population[front[b]].objective(obj_idx))
                .unwrap_or(Ordering::Equal)
        });

        let min_val = population[front[order[0]]].objective(obj_idx);
        let max_val = population[front[order[n - 1]]].objective(obj_idx);
        let range = max_val - min_val;
        if range > 0.0 {
            distances[order[0]] = f64::INFINITY;
            distances[order[n - 1]] = f64::INFINITY;
            for k in 1..(n - 1) {
                let prev = population[front[order[k - 1]]].objective(obj_idx);
                let next = population[front[order[k + 1]]].objective(obj_idx);
                distances[order[k]] += (next - prev) / range;
            }
        }
    }

    for (k, &i) in front.iter().enumerate() {
        population
            .get_mut(i)
            .expect("front indices are in range")
            .set_crowding_distance(distances[k]);
    }
}

/// Ranks the whole population and sorts it best-first.
///
/// Extracts fronts, assigns crowding distances within each front, then
/// sorts by [`rank_then_crowding`]. After this call the first member is
/// the best-ranked solution and the last is the positionally worst.
pub fn sort_by_dominance(population: &mut Population) {
    let fronts = extract_fronts(population);
    for front in &fronts {
        assign_crowding_distance(population, front);
    }
    population.sort_by(rank_then_crowding);
}
