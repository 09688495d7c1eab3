//! # Solution
//!
//! A candidate position together with its fitness. Fitness is always the
//! transformed value, so lower is better in both minimize and maximize mode.

use std::cmp::Ordering;

/// A candidate solution.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// The position in the search space.
    pub position: Vec<f64>,
    /// The transformed fitness of the position.
    pub fitness: f64,
}

impl Solution {
    pub fn new(position: Vec<f64>, fitness: f64) -> Self {
        Self { position, fitness }
    }

    /// Whether this solution is strictly better than `other`.
    pub fn is_better_than(&self, other: &Solution) -> bool {
        self.fitness < other.fitness
    }
}

/// Orders fitness values ascending, placing NaN after every number.
pub fn compare_fitness(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        _ => Ordering::Less,
    })
}
