//! # Ranking and global-best bookkeeping
//!
//! Populations are ranked by fitness ascending. A [`Rank`] picks an element of
//! the ranking, with negative values counting from the worst end. Every
//! function that hands out a best solution returns an owned clone, so later
//! changes to the population never reach a stored best.
//!
//! ## Example
//!
//! ```rust
//! use optkernel::ranking::{update_global_best, Rank};
//! use optkernel::solution::Solution;
//!
//! let mut g_best = Solution::new(vec![0.0], 5.0);
//! let population = vec![
//!     Solution::new(vec![1.0], 7.0),
//!     Solution::new(vec![2.0], 3.0),
//! ];
//!
//! g_best = update_global_best(&population, Rank::BEST, &g_best).unwrap();
//! assert_eq!(g_best.fitness, 3.0);
//! ```

use tracing::{debug, info};

use crate::error::{KernelError, OptionExt, Result};
use crate::problem::LogLevel;
use crate::solution::{compare_fitness, Solution};

/// A position in a population ranked by fitness ascending.
///
/// `Rank(0)` is the best solution, `Rank(-1)` the worst.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rank(pub isize);

impl Rank {
    pub const BEST: Rank = Rank(0);
    pub const WORST: Rank = Rank(-1);

    /// Resolves the rank against a population of `len` elements.
    pub fn resolve(self, len: usize) -> Result<usize> {
        let Rank(rank) = self;
        let index = if rank < 0 {
            len.checked_sub(rank.unsigned_abs())
        } else {
            Some(rank as usize).filter(|&i| i < len)
        };
        index.ok_or_else_kernel(|| KernelError::RankOutOfRange { rank, len })
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::BEST
    }
}

impl From<isize> for Rank {
    fn from(rank: isize) -> Self {
        Rank(rank)
    }
}

/// Sorts the population by fitness ascending. The sort is stable.
pub fn sort_population(mut population: Vec<Solution>) -> Vec<Solution> {
    population.sort_by(|a, b| compare_fitness(a.fitness, b.fitness));
    population
}

fn pick(sorted: &[Solution], rank: Rank) -> Result<Solution> {
    if sorted.is_empty() {
        return Err(KernelError::EmptyPopulation);
    }
    Ok(sorted[rank.resolve(sorted.len())?].clone())
}

/// Returns a copy of the solution at `rank` without reordering the input.
pub fn global_best_solution(population: &[Solution], rank: Rank) -> Result<Solution> {
    let sorted = sort_population(population.to_vec());
    pick(&sorted, rank)
}

/// Sorts the population and returns it with a copy of the solution at `rank`.
pub fn sorted_population_and_best(
    population: Vec<Solution>,
    rank: Rank,
) -> Result<(Vec<Solution>, Solution)> {
    let sorted = sort_population(population);
    let best = pick(&sorted, rank)?;
    Ok((sorted, best))
}

/// Returns the new global best: the candidate at `rank` if its fitness is
/// strictly lower than `g_best`'s, otherwise a copy of `g_best`.
pub fn update_global_best(
    population: &[Solution],
    rank: Rank,
    g_best: &Solution,
) -> Result<Solution> {
    let candidate = global_best_solution(population, rank)?;
    Ok(keep_better(candidate, g_best))
}

/// Sorts the population and returns it with the updated global best.
pub fn update_sorted_population_and_global_best(
    population: Vec<Solution>,
    rank: Rank,
    g_best: &Solution,
) -> Result<(Vec<Solution>, Solution)> {
    let (sorted, candidate) = sorted_population_and_best(population, rank)?;
    Ok((sorted, keep_better(candidate, g_best)))
}

fn keep_better(candidate: Solution, g_best: &Solution) -> Solution {
    if candidate.is_better_than(g_best) {
        debug!(
            previous = g_best.fitness,
            current = candidate.fitness,
            "global best improved"
        );
        candidate
    } else {
        g_best.clone()
    }
}

/// Tracks the global best of a run and the best fitness after every
/// generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct BestTracker {
    best: Option<Solution>,
    history: Vec<f64>,
    log_level: LogLevel,
}

impl BestTracker {
    pub fn new(log_level: LogLevel) -> Self {
        Self {
            best: None,
            history: Vec::new(),
            log_level,
        }
    }

    /// Folds one generation into the tracker and returns the current best.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` if `population` is empty; the tracker is left
    /// unchanged.
    pub fn observe(&mut self, population: &[Solution]) -> Result<&Solution> {
        let candidate = global_best_solution(population, Rank::BEST)?;
        let best = match self.best.take() {
            Some(previous) => keep_better(candidate, &previous),
            None => candidate,
        };
        self.history.push(best.fitness);

        let generation = self.history.len() - 1;
        match self.log_level {
            LogLevel::Minimal => info!(generation, fitness = best.fitness, "best so far"),
            LogLevel::Verbose => info!(
                generation,
                fitness = best.fitness,
                position = ?best.position,
                "best so far"
            ),
            LogLevel::None => {}
        }

        Ok(&*self.best.insert(best))
    }

    pub fn best(&self) -> Option<&Solution> {
        self.best.as_ref()
    }

    /// Best fitness after each observed generation.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Consumes the tracker, returning the best solution and the history.
    pub fn into_parts(self) -> (Option<Solution>, Vec<f64>) {
        (self.best, self.history)
    }
}
