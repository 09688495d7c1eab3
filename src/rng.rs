//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the random-number context of an
//! optimization run. Every stochastic kernel operation draws from the
//! generator it is handed, so two runs seeded alike produce identical
//! sequences and independent runs never share generator state.
//!
//! ## Example
//!
//! ```rust
//! use optkernel::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let numbers = rng.fetch_uniform(0.0, 1.0, 5);
//!
//! assert_eq!(numbers.len(), 5);
//! assert!(numbers.iter().all(|n| (0.0..=1.0).contains(n)));
//! ```

use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::error::{KernelError, Result};

/// A wrapper around the `rand` crate's `StdRng` that provides the draws the
/// kernel needs: uniform reals, normal variates and index samples.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible runs, tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws a real number uniformly from the closed interval `[low, high]`.
    ///
    /// A degenerate interval (`low == high`) yields `low`.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        debug_assert!(low <= high, "uniform called with low > high");
        self.rng.gen_range(low..=high)
    }

    /// Draws a real number uniformly from `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Draws one uniform value per dimension, each within `[lower[i], upper[i]]`.
    pub fn uniform_between(&mut self, lower: &[f64], upper: &[f64]) -> Vec<f64> {
        lower
            .iter()
            .zip(upper)
            .map(|(&low, &high)| self.uniform(low, high))
            .collect()
    }

    /// Generates a specified number of random floating-point numbers within the given range.
    ///
    /// # Parameters
    ///
    /// - `from`: The lower bound of the range (inclusive).
    /// - `to`: The upper bound of the range (inclusive).
    /// - `num`: The number of random numbers to generate.
    pub fn fetch_uniform(&mut self, from: f64, to: f64, num: usize) -> Vec<f64> {
        (0..num).map(|_| self.uniform(from, to)).collect()
    }

    /// Draws a normal variate with the given mean and scale.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNumericValue` if `scale` is negative or not finite.
    pub fn normal(&mut self, mean: f64, scale: f64) -> Result<f64> {
        if !(scale >= 0.0) {
            return Err(KernelError::InvalidNumericValue(format!(
                "Normal scale must be non-negative, got {}",
                scale
            )));
        }
        let distribution = Normal::new(mean, scale).map_err(|e| {
            KernelError::InvalidNumericValue(format!(
                "Cannot build normal distribution N({}, {}): {}",
                mean, scale, e
            ))
        })?;
        Ok(distribution.sample(&mut self.rng))
    }

    /// Draws an index uniformly from `0..len`.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index called with an empty range");
        self.rng.gen_range(0..len)
    }

    /// Samples `amount` distinct indices from `0..len` without replacement.
    ///
    /// # Errors
    ///
    /// Returns `Sampling` if `amount` exceeds `len`.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Result<Vec<usize>> {
        if amount > len {
            return Err(KernelError::Sampling(format!(
                "Cannot sample {} distinct indices from {} candidates",
                amount, len
            )));
        }
        Ok(index::sample(&mut self.rng, len, amount).into_vec())
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_uniform_with_negative_range() {
        let mut rng = RandomNumberGenerator::new();
        let result = rng.fetch_uniform(-1.0, 1.0, 3);

        assert_eq!(result.len(), 3);

        for &num in result.iter() {
            assert!((-1.0..=1.0).contains(&num));
        }
    }

    #[test]
    fn test_fetch_uniform_with_empty_result() {
        let mut rng = RandomNumberGenerator::new();
        let result = rng.fetch_uniform(1.0, 2.0, 0);

        assert!(result.is_empty());
    }

    #[test]
    fn test_uniform_degenerate_interval() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        assert_eq!(rng.uniform(4.0, 4.0), 4.0);
    }

    #[test]
    fn test_uniform_between_respects_each_dimension() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let lower = [0.0, -10.0, 5.0];
        let upper = [1.0, -9.0, 5.0];

        for _ in 0..100 {
            let sample = rng.uniform_between(&lower, &upper);
            assert_eq!(sample.len(), 3);
            for i in 0..3 {
                assert!(sample[i] >= lower[i] && sample[i] <= upper[i]);
            }
        }
    }

    #[test]
    fn test_clone() {
        let mut rng1 = RandomNumberGenerator::from_seed(42);
        let mut rng2 = rng1.clone();

        // Both RNGs should generate the same sequence after cloning
        let nums1 = rng1.fetch_uniform(0.0, 1.0, 5);
        let nums2 = rng2.fetch_uniform(0.0, 1.0, 5);

        assert_eq!(nums1, nums2);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RandomNumberGenerator::from_seed(99);
        let mut b = RandomNumberGenerator::from_seed(99);

        for _ in 0..10 {
            assert_eq!(a.unit(), b.unit());
            assert_eq!(a.normal(0.0, 1.0).unwrap(), b.normal(0.0, 1.0).unwrap());
        }
    }

    #[test]
    fn test_normal_rejects_invalid_scale() {
        let mut rng = RandomNumberGenerator::from_seed(0);
        assert!(matches!(
            rng.normal(0.0, f64::NAN),
            Err(KernelError::InvalidNumericValue(_))
        ));
        assert!(matches!(
            rng.normal(0.0, -1.0),
            Err(KernelError::InvalidNumericValue(_))
        ));
        assert!(rng.normal(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_sample_indices() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let mut indices = rng.sample_indices(10, 4).unwrap();
        assert_eq!(indices.len(), 4);
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), 4);
        assert!(indices.iter().all(|&i| i < 10));

        assert!(matches!(
            rng.sample_indices(3, 4),
            Err(KernelError::Sampling(_))
        ));
    }
}
