//! # Selection
//!
//! Stochastic selection operators. Both work on transformed fitness, so lower
//! values are always preferred.
pub mod roulette;
pub mod tournament;

pub use roulette::roulette_wheel_index;
pub use tournament::{kway_tournament, TournamentSize};
