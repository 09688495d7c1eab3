//! # Error Types
//!
//! This module defines the error type shared by every kernel operation.
//! Configuration problems are reported when the options are built, never by
//! aborting the process; call-site problems such as wrong-length positions or
//! an oversized tournament are reported by the operation that received them.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use optkernel::error::{KernelError, Result};
//!
//! fn checked_dimension(dimension: usize) -> Result<usize> {
//!     if dimension == 0 {
//!         return Err(KernelError::Configuration(
//!             "Dimension must be greater than zero".to_string(),
//!         ));
//!     }
//!     Ok(dimension)
//! }
//!
//! assert!(checked_dimension(0).is_err());
//! assert_eq!(checked_dimension(3).unwrap(), 3);
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use optkernel::error::{KernelError, OptionExt};
//!
//! fn lowest(values: &[f64]) -> optkernel::error::Result<f64> {
//!     values
//!         .iter()
//!         .copied()
//!         .reduce(f64::min)
//!         .ok_or_else_kernel(|| KernelError::EmptyPopulation)
//! }
//!
//! assert!(lowest(&[]).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur in the optimization kernel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Error that occurs when an invalid configuration or parameter is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a position does not have the problem's dimensionality.
    #[error("Dimension mismatch: expected {expected} components, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Error that occurs when a rank does not address an element of the population.
    #[error("Rank {rank} is out of range for a population of {len}")]
    RankOutOfRange { rank: isize, len: usize },

    /// Error that occurs when a sampling request cannot be satisfied.
    #[error("Sampling error: {0}")]
    Sampling(String),

    /// Error that occurs when NaN or otherwise unusable values are encountered.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),
}

/// A specialized Result type for kernel operations.
pub type Result<T> = std::result::Result<T, KernelError>;

/// Extension trait for Option to convert to Result with a kernel error.
pub trait OptionExt<T> {
    /// Converts an Option to a Result using a closure to generate the error.
    fn ok_or_else_kernel<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> KernelError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_kernel<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> KernelError,
    {
        self.ok_or_else(err_fn)
    }
}

/// Checks that `position` has exactly `expected` components.
pub(crate) fn ensure_dimension(position: &[f64], expected: usize) -> Result<()> {
    if position.len() != expected {
        return Err(KernelError::DimensionMismatch {
            expected,
            actual: position.len(),
        });
    }
    Ok(())
}
