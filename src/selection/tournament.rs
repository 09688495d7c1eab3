//! K-way tournament selection over a population of solutions.

use crate::error::{KernelError, Result};
use crate::rng::RandomNumberGenerator;
use crate::solution::{compare_fitness, Solution};

/// How many individuals enter a k-way tournament.
///
/// Smaller tournaments lead to more exploration, larger ones to more
/// exploitation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TournamentSize {
    /// An absolute number of participants.
    Count(usize),
    /// A share of the population in `(0, 1)`, truncated to a count.
    Fraction(f64),
}

impl TournamentSize {
    /// Resolves the size against a population of `population_size`.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` for a fraction outside `(0, 1)` and `Sampling`
    /// if the resolved count exceeds the population.
    pub fn resolve(self, population_size: usize) -> Result<usize> {
        let k = match self {
            TournamentSize::Count(k) => k,
            TournamentSize::Fraction(f) if f > 0.0 && f < 1.0 => {
                (f * population_size as f64) as usize
            }
            TournamentSize::Fraction(f) => {
                return Err(KernelError::Configuration(format!(
                    "Tournament fraction must lie in (0, 1), got {}",
                    f
                )))
            }
        };

        if k > population_size {
            return Err(KernelError::Sampling(format!(
                "Tournament size {} exceeds population size {}",
                k, population_size
            )));
        }
        Ok(k)
    }
}

impl Default for TournamentSize {
    fn default() -> Self {
        TournamentSize::Fraction(0.2)
    }
}

impl From<usize> for TournamentSize {
    fn from(k: usize) -> Self {
        TournamentSize::Count(k)
    }
}

impl From<f64> for TournamentSize {
    /// Values strictly between 0 and 1 are fractions; anything else is
    /// truncated to a count.
    fn from(k: f64) -> Self {
        if k > 0.0 && k < 1.0 {
            TournamentSize::Fraction(k)
        } else {
            TournamentSize::Count(k.max(0.0) as usize)
        }
    }
}

/// Runs a k-way tournament and returns the `output` best participants.
///
/// `k` distinct individuals are sampled without replacement, sorted by fitness
/// ascending, and the first `min(output, k)` are returned as copies.
///
/// # Examples
///
/// ```
/// use optkernel::rng::RandomNumberGenerator;
/// use optkernel::selection::{kway_tournament, TournamentSize};
/// use optkernel::solution::Solution;
///
/// let population: Vec<Solution> = (0..10)
///     .map(|i| Solution::new(vec![i as f64], (10 - i) as f64))
///     .collect();
/// let mut rng = RandomNumberGenerator::from_seed(1);
///
/// let parents = kway_tournament(&population, TournamentSize::Count(4), 2, &mut rng).unwrap();
/// assert_eq!(parents.len(), 2);
/// assert!(parents[0].fitness <= parents[1].fitness);
/// ```
///
/// # Errors
///
/// Returns `EmptyPopulation` for an empty population and the errors of
/// [`TournamentSize::resolve`].
pub fn kway_tournament(
    population: &[Solution],
    k: TournamentSize,
    output: usize,
    rng: &mut RandomNumberGenerator,
) -> Result<Vec<Solution>> {
    if population.is_empty() {
        return Err(KernelError::EmptyPopulation);
    }

    let k = k.resolve(population.len())?;
    let mut participants: Vec<&Solution> = rng
        .sample_indices(population.len(), k)?
        .into_iter()
        .map(|i| &population[i])
        .collect();
    participants.sort_by(|a, b| compare_fitness(a.fitness, b.fitness));

    Ok(participants.into_iter().take(output).cloned().collect())
}
