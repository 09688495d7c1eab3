//! # Bounds
//!
//! Per-dimension search-space limits. A `Bounds` value can only be obtained
//! through a validating constructor, so every holder may rely on equal-length
//! finite vectors with `lower[i] <= upper[i]`.

use crate::error::{ensure_dimension, KernelError, Result};
use crate::rng::RandomNumberGenerator;

/// Lower and upper limit used when no bounds are configured.
pub const DEFAULT_LIMIT: f64 = 1.0;

/// The accepted ways of describing bounds in a configuration.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BoundsSpec {
    /// Per-dimension vectors. A pair of one-element vectors is broadcast to the
    /// configured dimension.
    Explicit { lower: Vec<f64>, upper: Vec<f64> },
    /// One pair applied to every dimension.
    Scalar { lower: f64, upper: f64 },
    /// `[-1, 1]` on every dimension.
    #[default]
    Default,
}

impl BoundsSpec {
    /// Resolves the description into validated bounds.
    ///
    /// `dimension` is required for `Scalar`, `Default` and broadcast
    /// `Explicit` bounds; for other `Explicit` bounds it is optional but must
    /// agree with the vector length when present.
    pub fn resolve(&self, dimension: Option<usize>) -> Result<Bounds> {
        match self {
            BoundsSpec::Explicit { lower, upper } => {
                if lower.len() != upper.len() {
                    return Err(KernelError::Configuration(format!(
                        "Lower bound and upper bound need to be the same length ({} vs {})",
                        lower.len(),
                        upper.len()
                    )));
                }
                if lower.len() == 1 {
                    let dimension = required_dimension(dimension)?;
                    return Bounds::new(vec![lower[0]; dimension], vec![upper[0]; dimension]);
                }
                match dimension {
                    Some(0) => Err(zero_dimension()),
                    Some(d) if d != lower.len() => Err(KernelError::Configuration(format!(
                        "Configured dimension {} does not match bounds of length {}",
                        d,
                        lower.len()
                    ))),
                    _ => Bounds::new(lower.clone(), upper.clone()),
                }
            }
            BoundsSpec::Scalar { lower, upper } => {
                let dimension = required_dimension(dimension)?;
                Bounds::new(vec![*lower; dimension], vec![*upper; dimension])
            }
            BoundsSpec::Default => {
                let dimension = required_dimension(dimension)?;
                Bounds::new(vec![-DEFAULT_LIMIT; dimension], vec![DEFAULT_LIMIT; dimension])
            }
        }
    }
}

fn zero_dimension() -> KernelError {
    KernelError::Configuration("Problem dimension must be greater than zero".to_string())
}

fn required_dimension(dimension: Option<usize>) -> Result<usize> {
    match dimension {
        None => Err(KernelError::Configuration(
            "Problem dimension must be specified for these bounds".to_string(),
        )),
        Some(0) => Err(zero_dimension()),
        Some(d) => Ok(d),
    }
}

/// Validated per-dimension bounds.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Creates bounds from per-dimension vectors.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the vectors are empty, differ in length,
    /// contain non-finite values or have `lower[i] > upper[i]`.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if lower.is_empty() {
            return Err(zero_dimension());
        }
        if lower.len() != upper.len() {
            return Err(KernelError::Configuration(format!(
                "Lower bound and upper bound need to be the same length ({} vs {})",
                lower.len(),
                upper.len()
            )));
        }
        for (i, (&low, &high)) in lower.iter().zip(&upper).enumerate() {
            if !low.is_finite() || !high.is_finite() {
                return Err(KernelError::Configuration(format!(
                    "Bounds of dimension {} must be finite, got [{}, {}]",
                    i, low, high
                )));
            }
            if low > high {
                return Err(KernelError::Configuration(format!(
                    "Lower bound {} exceeds upper bound {} in dimension {}",
                    low, high, i
                )));
            }
        }
        Ok(Self { lower, upper })
    }

    /// Number of dimensions.
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Whether every component of `position` lies within its bounds.
    pub fn contains(&self, position: &[f64]) -> bool {
        position.len() == self.dimension()
            && position
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&x, (&low, &high))| low <= x && x <= high)
    }

    /// Draws a position uniformly from the box.
    pub fn sample(&self, rng: &mut RandomNumberGenerator) -> Vec<f64> {
        rng.uniform_between(&self.lower, &self.upper)
    }

    /// Checks the length of `position` against the dimension.
    pub fn check(&self, position: &[f64]) -> Result<()> {
        ensure_dimension(position, self.dimension())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Bounds {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            lower: Vec<f64>,
            upper: Vec<f64>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Bounds::new(raw.lower, raw.upper).map_err(serde::de::Error::custom)
    }
}
