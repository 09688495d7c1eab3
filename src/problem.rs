//! # Problem configuration
//!
//! The `KernelOptions` struct represents the immutable configuration of one
//! optimization run: bounds, dimensionality, optimization mode, the batch size
//! propagated to consuming algorithms and the reporting level.
//!
//! ## Example
//!
//! ```rust
//! use optkernel::problem::{BoundsSpec, KernelOptions, LogLevel, Mode};
//!
//! // Ten dimensions in [-5, 5], maximizing.
//! let options = KernelOptions::builder()
//!     .bounds(BoundsSpec::Scalar { lower: -5.0, upper: 5.0 })
//!     .dimension(10)
//!     .mode(Mode::Maximize)
//!     .log_level(LogLevel::Minimal)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.dimension(), 10);
//!
//! // No bounds: [-1, 1] on every dimension.
//! let options = KernelOptions::builder().dimension(3).build().unwrap();
//! assert_eq!(options.bounds().upper(), &[1.0, 1.0, 1.0]);
//! ```
//!
//! ## Objective
//!
//! Any `Fn(&[f64]) -> f64` is an [`Objective`]; implement the trait directly
//! for objectives that carry state.

pub use crate::bounds::{Bounds, BoundsSpec};
use crate::error::{KernelError, Result};

/// Offset added to the raw objective before taking the reciprocal in
/// maximize mode.
pub const EPSILON: f64 = 1e-9;

const DEFAULT_BATCH_SIZE: usize = 10;

/// The function being optimized. It returns the raw objective value; the
/// kernel applies the min/max transform.
pub trait Objective {
    fn evaluate(&self, position: &[f64]) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64,
{
    fn evaluate(&self, position: &[f64]) -> f64 {
        self(position)
    }
}

/// Whether the raw objective is minimized or maximized.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Minimize,
    Maximize,
}

impl Mode {
    /// Converts a raw objective value into fitness, where lower is always better.
    ///
    /// Minimization keeps the value; maximization uses `1 / (raw + EPSILON)`.
    pub fn transform(self, raw: f64) -> f64 {
        match self {
            Mode::Minimize => raw,
            Mode::Maximize => 1.0 / (raw + EPSILON),
        }
    }
}

/// Reporting level handed to consuming algorithms and to the best tracker.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Verbose,
    Minimal,
    #[default]
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct KernelOptions {
    bounds: Bounds,
    mode: Mode,
    batch_size: usize,
    log_level: LogLevel,
}

impl KernelOptions {
    /// Creates options from already validated bounds.
    pub fn new(bounds: Bounds, mode: Mode) -> Self {
        Self {
            bounds,
            mode,
            batch_size: DEFAULT_BATCH_SIZE,
            log_level: LogLevel::None,
        }
    }

    /// Returns a builder for creating a `KernelOptions` instance.
    pub fn builder() -> KernelOptionsBuilder {
        KernelOptionsBuilder::default()
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn dimension(&self) -> usize {
        self.bounds.dimension()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Batch size for consumers that evaluate in batches. Not interpreted by the kernel.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Whether the run was configured for verbose reporting.
    pub fn verbose(&self) -> bool {
        self.log_level == LogLevel::Verbose
    }
}

/// Builder for `KernelOptions`.
///
/// Provides a fluent interface; all validation happens in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct KernelOptionsBuilder {
    bounds: Option<BoundsSpec>,
    dimension: Option<usize>,
    mode: Option<Mode>,
    batch_size: Option<usize>,
    log_level: Option<LogLevel>,
}

impl KernelOptionsBuilder {
    /// Sets the bounds description.
    pub fn bounds(mut self, value: BoundsSpec) -> Self {
        self.bounds = Some(value);
        self
    }

    /// Sets per-dimension bounds.
    pub fn explicit_bounds(self, lower: Vec<f64>, upper: Vec<f64>) -> Self {
        self.bounds(BoundsSpec::Explicit { lower, upper })
    }

    /// Sets the problem dimension.
    pub fn dimension(mut self, value: usize) -> Self {
        self.dimension = Some(value);
        self
    }

    /// Sets the optimization mode.
    pub fn mode(mut self, value: Mode) -> Self {
        self.mode = Some(value);
        self
    }

    /// Sets the batch size.
    pub fn batch_size(mut self, value: usize) -> Self {
        self.batch_size = Some(value);
        self
    }

    /// Sets the log level.
    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Maps the verbose toggle onto a log level.
    pub fn verbose(self, value: bool) -> Self {
        self.log_level(if value {
            LogLevel::Verbose
        } else {
            LogLevel::None
        })
    }

    /// Builds and validates the `KernelOptions` instance.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the bounds cannot be resolved for the
    /// requested dimension or the batch size is zero.
    pub fn build(self) -> Result<KernelOptions> {
        let bounds = self.bounds.unwrap_or_default().resolve(self.dimension)?;

        let batch_size = self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE);
        if batch_size == 0 {
            return Err(KernelError::Configuration(
                "Batch size cannot be zero".to_string(),
            ));
        }

        Ok(KernelOptions {
            bounds,
            mode: self.mode.unwrap_or_default(),
            batch_size,
            log_level: self.log_level.unwrap_or_default(),
        })
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for KernelOptions {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            bounds: Bounds,
            mode: Mode,
            batch_size: usize,
            log_level: LogLevel,
        }

        let raw = Raw::deserialize(deserializer)?;
        KernelOptions::builder()
            .explicit_bounds(raw.bounds.lower().to_vec(), raw.bounds.upper().to_vec())
            .mode(raw.mode)
            .batch_size(raw.batch_size)
            .log_level(raw.log_level)
            .build()
            .map_err(serde::de::Error::custom)
    }
}
