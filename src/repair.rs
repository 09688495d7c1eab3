//! # Boundary repair
//!
//! Policies that map an out-of-range position back into the search box.
//! Both policies leave in-range components untouched.

use crate::bounds::Bounds;
use crate::error::{KernelError, Result};
use crate::rng::RandomNumberGenerator;

/// How out-of-range components are brought back into bounds.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepairPolicy {
    /// Set the component to the nearest bound.
    #[default]
    Clamp,
    /// Redraw the component uniformly within its bounds.
    Random,
}

/// Repairs `position` in place.
///
/// # Errors
///
/// Returns `DimensionMismatch` for a wrong-length position and
/// `InvalidNumericValue` if a component is NaN. On error `position` is left
/// unchanged.
pub fn amend_in_place(
    bounds: &Bounds,
    position: &mut [f64],
    policy: RepairPolicy,
    rng: &mut RandomNumberGenerator,
) -> Result<()> {
    bounds.check(position)?;
    if let Some(i) = position.iter().position(|x| x.is_nan()) {
        return Err(KernelError::InvalidNumericValue(format!(
            "Cannot repair NaN component at dimension {}",
            i
        )));
    }

    let limits = bounds.lower().iter().zip(bounds.upper());
    for (x, (&low, &high)) in position.iter_mut().zip(limits) {
        if *x >= low && *x <= high {
            continue;
        }
        *x = match policy {
            RepairPolicy::Clamp => (*x).clamp(low, high),
            RepairPolicy::Random => rng.uniform(low, high),
        };
    }
    Ok(())
}

/// Returns a repaired copy of `position`.
pub fn amend_position(
    bounds: &Bounds,
    position: &[f64],
    policy: RepairPolicy,
    rng: &mut RandomNumberGenerator,
) -> Result<Vec<f64>> {
    let mut repaired = position.to_vec();
    amend_in_place(bounds, &mut repaired, policy, rng)?;
    Ok(repaired)
}
