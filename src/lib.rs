pub mod bounds;
pub mod error;
pub mod kernel;
pub mod perturbation;
pub mod problem;
pub mod ranking;
pub mod repair;
pub mod rng;
pub mod selection;
pub mod solution;
pub mod special;

// Re-export commonly used types for convenience
pub use bounds::{Bounds, BoundsSpec};
pub use error::{KernelError, OptionExt, Result};
pub use kernel::OptimizationKernel;
pub use perturbation::{LevyFlight, LevyOutput};
pub use problem::{KernelOptions, KernelOptionsBuilder, LogLevel, Mode, Objective, EPSILON};
pub use ranking::{BestTracker, Rank};
pub use repair::RepairPolicy;
pub use rng::RandomNumberGenerator;
pub use selection::TournamentSize;
pub use solution::Solution;
