use crate::bounds::Bounds;
use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Reflects `position` through the best-known point:
/// `lower + upper - best + r * (best - position)`.
///
/// # Errors
///
/// Returns `DimensionMismatch` if either position has the wrong length.
pub fn opposition_position_with(
    bounds: &Bounds,
    position: &[f64],
    best: &[f64],
    r: f64,
) -> Result<Vec<f64>> {
    bounds.check(position)?;
    bounds.check(best)?;

    Ok(bounds
        .lower()
        .iter()
        .zip(bounds.upper())
        .zip(position.iter().zip(best))
        .map(|((&low, &high), (&x, &b))| low + high - b + r * (b - x))
        .collect())
}

/// Opposition-based reflection with a single `r ~ U[0, 1)` drawn from `rng`.
pub fn create_opposition_position(
    bounds: &Bounds,
    position: &[f64],
    best: &[f64],
    rng: &mut RandomNumberGenerator,
) -> Result<Vec<f64>> {
    bounds.check(position)?;
    bounds.check(best)?;
    let r = rng.unit();
    opposition_position_with(bounds, position, best, r)
}
