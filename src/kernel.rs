//! # OptimizationKernel
//!
//! The `OptimizationKernel` bundles the immutable problem configuration with
//! the random-number context of one run. Consuming algorithms build one
//! kernel per run and call into it from their own generation loop.
//!
//! ## Example
//!
//! ```rust
//! use optkernel::kernel::OptimizationKernel;
//! use optkernel::perturbation::{LevyFlight, LevyOutput};
//! use optkernel::problem::{KernelOptions, Mode};
//! use optkernel::ranking::{update_global_best, Rank};
//! use optkernel::repair::RepairPolicy;
//! use optkernel::rng::RandomNumberGenerator;
//!
//! let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
//! let options = KernelOptions::builder()
//!     .explicit_bounds(vec![-5.0, -5.0], vec![5.0, 5.0])
//!     .build()
//!     .unwrap();
//! let rng = RandomNumberGenerator::from_seed(1);
//! let mut kernel = OptimizationKernel::new(sphere, options, rng);
//!
//! let mut population = kernel.create_population(20);
//! let mut g_best = kernel.create_solution(Mode::Minimize);
//! let flight = LevyFlight::default();
//!
//! for epoch in 0..10 {
//!     for solution in population.iter_mut() {
//!         let output = LevyOutput::Decaying { epoch };
//!         let moved = kernel
//!             .levy_flight(&flight, &solution.position, &g_best.position, output)
//!             .unwrap();
//!         let moved = kernel.amend_position(&moved, RepairPolicy::Clamp).unwrap();
//!         let fitness = kernel.evaluate(&moved).unwrap();
//!         if fitness < solution.fitness {
//!             solution.position = moved;
//!             solution.fitness = fitness;
//!         }
//!     }
//!     g_best = update_global_best(&population, Rank::BEST, &g_best).unwrap();
//! }
//!
//! let lowest = population.iter().map(|s| s.fitness).fold(f64::INFINITY, f64::min);
//! assert!(g_best.fitness <= lowest);
//! ```

use tracing::{debug, trace, warn};

use crate::bounds::Bounds;
use crate::error::Result;
use crate::perturbation::{self, LevyFlight, LevyOutput};
use crate::problem::{KernelOptions, Mode, Objective};
use crate::ranking::BestTracker;
use crate::repair::{self, RepairPolicy};
use crate::rng::RandomNumberGenerator;
use crate::selection::{self, TournamentSize};
use crate::solution::Solution;

/// Minimum number of evaluations before the parallel population methods use
/// the rayon pool.
#[cfg(feature = "parallel")]
pub const PARALLEL_THRESHOLD: usize = 1000;

/// Problem configuration and random-number context of one optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationKernel<O> {
    objective: O,
    options: KernelOptions,
    rng: RandomNumberGenerator,
}

impl<O> OptimizationKernel<O>
where
    O: Objective,
{
    /// Creates a kernel from validated options and an injected generator.
    pub fn new(objective: O, options: KernelOptions, rng: RandomNumberGenerator) -> Self {
        debug!(
            dimension = options.dimension(),
            mode = ?options.mode(),
            batch_size = options.batch_size(),
            "optimization kernel created"
        );
        Self {
            objective,
            options,
            rng,
        }
    }

    pub fn options(&self) -> &KernelOptions {
        &self.options
    }

    pub fn bounds(&self) -> &Bounds {
        self.options.bounds()
    }

    pub fn dimension(&self) -> usize {
        self.options.dimension()
    }

    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// The run's random-number context, for caller-side draws that must stay
    /// on the same stream.
    pub fn rng_mut(&mut self) -> &mut RandomNumberGenerator {
        &mut self.rng
    }

    /// A tracker for the run's global best, reporting at the configured level.
    pub fn best_tracker(&self) -> BestTracker {
        BestTracker::new(self.options.log_level())
    }

    fn transformed(&self, position: &[f64], mode: Mode) -> f64 {
        let fitness = mode.transform(self.objective.evaluate(position));
        if fitness.is_nan() {
            warn!(?position, "objective produced NaN fitness");
        }
        fitness
    }

    /// Draws a uniform position within bounds and evaluates it under `mode`.
    pub fn create_solution(&mut self, mode: Mode) -> Solution {
        let position = self.options.bounds().sample(&mut self.rng);
        let fitness = self.transformed(&position, mode);
        trace!(fitness, "solution created");
        Solution::new(position, fitness)
    }

    /// Creates `size` solutions under the configured mode.
    pub fn create_population(&mut self, size: usize) -> Vec<Solution> {
        let mode = self.options.mode();
        (0..size).map(|_| self.create_solution(mode)).collect()
    }

    /// Fitness of `position` under `mode`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the position has the wrong length.
    pub fn fitness_of_position(&self, position: &[f64], mode: Mode) -> Result<f64> {
        self.options.bounds().check(position)?;
        Ok(self.transformed(position, mode))
    }

    /// Fitness of the position of `solution` under `mode`.
    pub fn fitness_of_solution(&self, solution: &Solution, mode: Mode) -> Result<f64> {
        self.fitness_of_position(&solution.position, mode)
    }

    /// Fitness of `position` under the configured mode.
    pub fn evaluate(&self, position: &[f64]) -> Result<f64> {
        self.fitness_of_position(position, self.options.mode())
    }

    /// Evaluates positions under the configured mode.
    pub fn evaluate_population(&self, positions: Vec<Vec<f64>>) -> Result<Vec<Solution>> {
        positions
            .into_iter()
            .map(|position| {
                let fitness = self.evaluate(&position)?;
                Ok(Solution::new(position, fitness))
            })
            .collect()
    }

    /// Returns a repaired copy of `position`.
    pub fn amend_position(&mut self, position: &[f64], policy: RepairPolicy) -> Result<Vec<f64>> {
        repair::amend_position(self.options.bounds(), position, policy, &mut self.rng)
    }

    /// Repairs `position` in place.
    pub fn amend_in_place(&mut self, position: &mut [f64], policy: RepairPolicy) -> Result<()> {
        repair::amend_in_place(self.options.bounds(), position, policy, &mut self.rng)
    }

    /// Roulette-wheel index over fitness values; see
    /// [`roulette_wheel_index`](selection::roulette_wheel_index).
    pub fn roulette_wheel_index(&mut self, fitness: &[f64]) -> Result<usize> {
        selection::roulette_wheel_index(fitness, &mut self.rng)
    }

    /// K-way tournament; see [`kway_tournament`](selection::kway_tournament).
    pub fn kway_tournament(
        &mut self,
        population: &[Solution],
        k: impl Into<TournamentSize>,
        output: usize,
    ) -> Result<Vec<Solution>> {
        selection::kway_tournament(population, k.into(), output, &mut self.rng)
    }

    /// Opposition-based reflection of `position` through `g_best`.
    pub fn create_opposition_position(
        &mut self,
        position: &[f64],
        g_best: &Solution,
    ) -> Result<Vec<f64>> {
        perturbation::create_opposition_position(
            self.options.bounds(),
            position,
            &g_best.position,
            &mut self.rng,
        )
    }

    /// General Levy flight; see [`LevyFlight::generate`].
    pub fn levy_flight(
        &mut self,
        flight: &LevyFlight,
        position: &[f64],
        best: &[f64],
        output: LevyOutput,
    ) -> Result<Vec<f64>> {
        flight.generate(self.options.bounds(), position, best, output, &mut self.rng)
    }

    /// Fixed-exponent Levy flight; see [`levy_flight_fixed`](perturbation::levy_flight_fixed).
    pub fn levy_flight_fixed(&mut self, position: &[f64], best: &[f64]) -> Result<Vec<f64>> {
        self.options.bounds().check(position)?;
        perturbation::levy_flight_fixed(position, best, &mut self.rng)
    }
}

#[cfg(feature = "parallel")]
impl<O> OptimizationKernel<O>
where
    O: Objective + Sync,
{
    /// Like [`create_population`](Self::create_population), evaluating on the
    /// rayon pool once `size` reaches [`PARALLEL_THRESHOLD`]. Positions are
    /// still drawn sequentially, so the result equals the sequential one for
    /// the same seed.
    pub fn create_population_parallel(&mut self, size: usize) -> Vec<Solution> {
        use rayon::prelude::*;

        if size < PARALLEL_THRESHOLD {
            return self.create_population(size);
        }

        let mode = self.options.mode();
        let positions: Vec<Vec<f64>> = (0..size)
            .map(|_| self.options.bounds().sample(&mut self.rng))
            .collect();

        let this = &*self;
        positions
            .into_par_iter()
            .map(|position| {
                let fitness = this.transformed(&position, mode);
                Solution::new(position, fitness)
            })
            .collect()
    }

    /// Like [`evaluate_population`](Self::evaluate_population), on the rayon
    /// pool for large inputs.
    pub fn evaluate_population_parallel(&self, positions: Vec<Vec<f64>>) -> Result<Vec<Solution>> {
        use rayon::prelude::*;

        if positions.len() < PARALLEL_THRESHOLD {
            return self.evaluate_population(positions);
        }

        positions
            .into_par_iter()
            .map(|position| {
                let fitness = self.evaluate(&position)?;
                Ok(Solution::new(position, fitness))
            })
            .collect()
    }
}
