//! Levy-flight step generators based on Mantegna's algorithm.
//!
//! A step magnitude is drawn as `s = u / |v|^(1/beta)` with
//! `u ~ N(0, sigma_u^2)` and `v ~ N(0, 1)`, which approximates a symmetric
//! stable distribution with stability exponent `beta`.

use std::f64::consts::PI;

use crate::bounds::Bounds;
use crate::error::{ensure_dimension, KernelError, Result};
use crate::rng::RandomNumberGenerator;
use crate::special::gamma;

const DEFAULT_BETA: f64 = 1.0;
const DEFAULT_STEP: f64 = 0.001;
const NUDGE_COEFFICIENT: f64 = 0.01;

const FIXED_BETA: f64 = 1.5;
const FIXED_ALPHA: f64 = 0.01;

/// Standard deviation of the numerator variate in Mantegna's algorithm.
pub fn mantegna_sigma(beta: f64) -> f64 {
    let numerator = gamma(1.0 + beta) * (PI * beta / 2.0).sin();
    let denominator = gamma((1.0 + beta) / 2.0) * beta * 2f64.powf((beta - 1.0) / 2.0);
    (numerator / denominator).powf(1.0 / beta)
}

/// What a Levy flight returns.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevyOutput {
    /// The step itself.
    #[default]
    Raw,
    /// `position + 1/sqrt(epoch + 1) * sign(U(-0.5, 0.5)) * step`; the step
    /// shrinks as the run progresses.
    Decaying { epoch: usize },
    /// `position + 0.01 * step`.
    Nudge,
}

/// Parameters of the general Levy flight.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevyFlight {
    beta: f64,
    step: f64,
}

impl Default for LevyFlight {
    fn default() -> Self {
        Self {
            beta: DEFAULT_BETA,
            step: DEFAULT_STEP,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for LevyFlight {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            beta: f64,
            step: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        LevyFlight::new(raw.beta, raw.step).map_err(serde::de::Error::custom)
    }
}

impl LevyFlight {
    /// Creates a Levy flight with stability exponent `beta` and step-size
    /// coefficient `step`.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` unless `0 < beta <= 2` and `step` is finite.
    pub fn new(beta: f64, step: f64) -> Result<Self> {
        if !(beta > 0.0 && beta <= 2.0) {
            return Err(KernelError::Configuration(format!(
                "Levy stability exponent must lie in (0, 2], got {}",
                beta
            )));
        }
        if !step.is_finite() {
            return Err(KernelError::Configuration(format!(
                "Levy step size must be finite, got {}",
                step
            )));
        }
        Ok(Self { beta, step })
    }

    /// Same exponent, different step-size coefficient.
    pub fn with_step(self, step: f64) -> Result<Self> {
        Self::new(self.beta, step)
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Draws `s = u / |v|^(1/beta)`.
    ///
    /// `u` is drawn with scale `sigma_u^2`, matching the parameterisation
    /// the dependent algorithms were tuned with.
    fn magnitude(&self, rng: &mut RandomNumberGenerator) -> Result<f64> {
        let sigma_u = mantegna_sigma(self.beta);
        let u = rng.normal(0.0, sigma_u.powi(2))?;
        let v = rng.normal(0.0, 1.0)?;
        Ok(u / v.abs().powf(1.0 / self.beta))
    }

    /// Generates a step relative to `best` and applies the output policy.
    ///
    /// The step is `U(lower, upper) * step * s * (position - best)`, with one
    /// magnitude `s` shared by every dimension and one uniform factor per
    /// dimension.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if either position has the wrong length.
    pub fn generate(
        &self,
        bounds: &Bounds,
        position: &[f64],
        best: &[f64],
        output: LevyOutput,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<f64>> {
        bounds.check(position)?;
        bounds.check(best)?;

        let s = self.magnitude(rng)?;
        let levy: Vec<f64> = position
            .iter()
            .zip(best)
            .zip(bounds.lower().iter().zip(bounds.upper()))
            .map(|((&x, &b), (&low, &high))| {
                rng.uniform(low, high) * self.step * s * (x - b)
            })
            .collect();

        let coefficient = match output {
            LevyOutput::Raw => return Ok(levy),
            LevyOutput::Decaying { epoch } => {
                let direction = sign(rng.unit() - 0.5);
                direction / (epoch as f64 + 1.0).sqrt()
            }
            LevyOutput::Nudge => NUDGE_COEFFICIENT,
        };

        Ok(position
            .iter()
            .zip(&levy)
            .map(|(&x, &l)| x + coefficient * l)
            .collect())
    }
}

fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Levy flight with the exponent fixed at 1.5 and coefficient 0.01:
/// `position + 0.01 * b * (position - best)`.
///
/// `b` is drawn as `N(0, sigma_u^2) / sqrt(|N(0, 1)|)^(1/1.5)`. This variant
/// is separate from [`LevyFlight`] and its constants are part of its contract.
///
/// # Errors
///
/// Returns `DimensionMismatch` if `best` and `position` differ in length.
pub fn levy_flight_fixed(
    position: &[f64],
    best: &[f64],
    rng: &mut RandomNumberGenerator,
) -> Result<Vec<f64>> {
    ensure_dimension(best, position.len())?;

    let sigma_u = mantegna_sigma(FIXED_BETA);
    let u = rng.normal(0.0, sigma_u.powi(2))?;
    let v = rng.normal(0.0, 1.0)?;
    let b = u / v.abs().sqrt().powf(1.0 / FIXED_BETA);

    Ok(position
        .iter()
        .zip(best)
        .map(|(&x, &g)| x + FIXED_ALPHA * b * (x - g))
        .collect())
}
