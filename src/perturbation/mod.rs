//! # Perturbation
//!
//! Generators of stochastic variation: Levy flights for occasional long
//! jumps and opposition-based reflection through the best-known point.
//! Outputs are not repaired; apply a [`RepairPolicy`](crate::repair::RepairPolicy)
//! afterwards when the caller needs in-bounds positions.
pub mod levy;
pub mod opposition;

pub use levy::{levy_flight_fixed, mantegna_sigma, LevyFlight, LevyOutput};
pub use opposition::{create_opposition_position, opposition_position_with};
