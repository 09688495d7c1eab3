//! Fitness-proportional roulette-wheel selection for minimized fitness.

use tracing::trace;

use crate::error::{KernelError, Result};
use crate::rng::RandomNumberGenerator;

/// Selects an index by roulette wheel over fitness values where lower is better.
///
/// The values are min-max scaled to `[0, 1]` and inverted, so the best value
/// gets weight 1 and the worst weight 0. A spin is drawn uniformly from
/// `[0, total weight)` and the first index whose running weight sum exceeds
/// the spin is returned. When every value is equal the weights are undefined
/// and an index is drawn uniformly instead. Negative values are fine.
///
/// # Examples
///
/// ```
/// use optkernel::rng::RandomNumberGenerator;
/// use optkernel::selection::roulette_wheel_index;
///
/// let mut rng = RandomNumberGenerator::from_seed(3);
/// let idx = roulette_wheel_index(&[0.5, 0.8, 0.3, 0.9, 0.1], &mut rng).unwrap();
/// assert!(idx < 5);
/// ```
///
/// # Errors
///
/// Returns `EmptyPopulation` for an empty slice and `InvalidNumericValue`
/// if any value is NaN or infinite.
pub fn roulette_wheel_index(fitness: &[f64], rng: &mut RandomNumberGenerator) -> Result<usize> {
    let weights = selection_weights(fitness)?;

    let Some(weights) = weights else {
        trace!(len = fitness.len(), "zero fitness range, selecting uniformly");
        return Ok(rng.index(fitness.len()));
    };

    let total: f64 = weights.iter().sum();
    let spin = rng.unit() * total;

    let mut running = 0.0;
    for (i, &weight) in weights.iter().enumerate() {
        running += weight;
        if running > spin {
            return Ok(i);
        }
    }

    // Rounding can leave the running sum at or just under the spin. Fall back
    // to the last index that carries weight.
    Ok(weights.iter().rposition(|&w| w > 0.0).unwrap_or(0))
}

/// Inverted min-max weights, or `None` when all values are equal.
fn selection_weights(fitness: &[f64]) -> Result<Option<Vec<f64>>> {
    if fitness.is_empty() {
        return Err(KernelError::EmptyPopulation);
    }
    if let Some(bad) = fitness.iter().find(|f| !f.is_finite()) {
        return Err(KernelError::InvalidNumericValue(format!(
            "Roulette wheel selection requires finite fitness values, got {}",
            bad
        )));
    }

    let min = fitness.iter().copied().fold(f64::INFINITY, f64::min);
    let max = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Halved operands keep the range finite for any finite inputs.
    let half_range = max / 2.0 - min / 2.0;
    if half_range == 0.0 {
        return Ok(None);
    }

    Ok(Some(
        fitness
            .iter()
            .map(|&f| 1.0 - (f / 2.0 - min / 2.0) / half_range)
            .collect(),
    ))
}
