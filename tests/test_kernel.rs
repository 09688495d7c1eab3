use optkernel::{
    error::KernelError,
    kernel::OptimizationKernel,
    perturbation::{LevyFlight, LevyOutput},
    problem::{KernelOptions, LogLevel, Mode, Objective, EPSILON},
    ranking::{update_global_best, update_sorted_population_and_global_best, Rank},
    repair::RepairPolicy,
    rng::RandomNumberGenerator,
    selection::TournamentSize,
    solution::Solution,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

// Sphere objective that counts how often it was evaluated
#[derive(Clone)]
struct CountingSphere {
    evaluations: Arc<AtomicUsize>,
}

impl CountingSphere {
    fn new() -> Self {
        Self {
            evaluations: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn get_evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }
}

impl Objective for CountingSphere {
    fn evaluate(&self, position: &[f64]) -> f64 {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        position.iter().map(|x| x * x).sum()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn options(mode: Mode) -> KernelOptions {
    KernelOptions::builder()
        .bounds(optkernel::BoundsSpec::Scalar {
            lower: -10.0,
            upper: 10.0,
        })
        .dimension(4)
        .mode(mode)
        .log_level(LogLevel::Minimal)
        .build()
        .unwrap()
}

/// A small tournament/opposition/Levy loop that exercises every primitive.
fn run(seed: u64, epochs: usize) -> (Vec<f64>, Solution, usize) {
    let objective = CountingSphere::new();
    let mut kernel = OptimizationKernel::new(
        objective.clone(),
        options(Mode::Minimize),
        RandomNumberGenerator::from_seed(seed),
    );
    let mut tracker = kernel.best_tracker();
    let flight = LevyFlight::new(1.0, 0.5).unwrap();

    let mut population = kernel.create_population(20);
    let mut g_best = tracker.observe(&population).unwrap().clone();

    for epoch in 0..epochs {
        let mut offspring = Vec::with_capacity(population.len());
        for solution in &population {
            let parents = kernel
                .kway_tournament(&population, TournamentSize::Fraction(0.2), 2)
                .unwrap();
            let mut child: Vec<f64> = parents[0]
                .position
                .iter()
                .zip(&parents[1].position)
                .map(|(a, b)| (a + b) / 2.0)
                .collect();

            if kernel.rng_mut().unit() < 0.3 {
                child = kernel.create_opposition_position(&child, &g_best).unwrap();
            } else {
                let output = LevyOutput::Decaying { epoch };
                child = kernel
                    .levy_flight(&flight, &child, &g_best.position, output)
                    .unwrap();
            }
            kernel.amend_in_place(&mut child, RepairPolicy::Random).unwrap();

            let fitness = kernel.evaluate(&child).unwrap();
            if fitness < solution.fitness {
                offspring.push(Solution::new(child, fitness));
            } else {
                offspring.push(solution.clone());
            }
        }

        let (sorted, best) =
            update_sorted_population_and_global_best(offspring, Rank::BEST, &g_best).unwrap();
        population = sorted;
        g_best = best;
        tracker.observe(&population).unwrap();
    }

    let (_, history) = tracker.into_parts();
    (history, g_best, objective.get_evaluations())
}

#[test]
fn test_global_best_is_monotonic() {
    init_tracing();
    let (history, g_best, _) = run(7, 30);

    assert_eq!(history.len(), 31);
    for pair in history.windows(2) {
        assert!(pair[1] <= pair[0], "best fitness increased: {:?}", pair);
    }
    assert_eq!(*history.last().unwrap(), g_best.fitness);
    assert!(history[30] < history[0]);
}

#[test]
fn test_runs_are_reproducible_per_seed() {
    let (history_a, best_a, evaluations_a) = run(11, 10);
    let (history_b, best_b, evaluations_b) = run(11, 10);
    assert_eq!(history_a, history_b);
    assert_eq!(best_a, best_b);
    assert_eq!(evaluations_a, evaluations_b);
    // 20 initial solutions plus one evaluation per child
    assert_eq!(evaluations_a, 20 + 10 * 20);
}

#[test]
fn test_independent_kernels_do_not_interfere() {
    let mut a = OptimizationKernel::new(
        CountingSphere::new(),
        options(Mode::Minimize),
        RandomNumberGenerator::from_seed(5),
    );
    let mut b = OptimizationKernel::new(
        CountingSphere::new(),
        options(Mode::Minimize),
        RandomNumberGenerator::from_seed(5),
    );

    // draining one kernel's stream leaves the other untouched
    let _ = a.create_population(50);
    let mut fresh = OptimizationKernel::new(
        CountingSphere::new(),
        options(Mode::Minimize),
        RandomNumberGenerator::from_seed(5),
    );
    assert_eq!(
        b.create_solution(Mode::Minimize),
        fresh.create_solution(Mode::Minimize)
    );
}

#[test]
fn test_maximize_mode_ranks_larger_objective_first() {
    let objective = |x: &[f64]| x[0];
    let options = KernelOptions::builder()
        .explicit_bounds(vec![0.0], vec![10.0])
        .dimension(1)
        .mode(Mode::Maximize)
        .build()
        .unwrap();
    let kernel = OptimizationKernel::new(objective, options, RandomNumberGenerator::from_seed(0));

    let population = kernel
        .evaluate_population(vec![vec![1.0], vec![9.0], vec![4.0]])
        .unwrap();
    let best = update_global_best(
        &population,
        Rank::BEST,
        &Solution::new(vec![0.0], f64::INFINITY),
    )
    .unwrap();

    assert_eq!(best.position, vec![9.0]);
    assert_eq!(best.fitness, 1.0 / (9.0 + EPSILON));
}

#[test]
fn test_stored_best_is_isolated_from_population() {
    let mut kernel = OptimizationKernel::new(
        CountingSphere::new(),
        options(Mode::Minimize),
        RandomNumberGenerator::from_seed(2),
    );
    let mut population = kernel.create_population(10);
    let g_best = Solution::new(vec![0.0; 4], f64::INFINITY);
    let g_best = update_global_best(&population, Rank::BEST, &g_best).unwrap();
    let snapshot = g_best.clone();

    for solution in population.iter_mut() {
        solution.position.iter_mut().for_each(|x| *x = 99.0);
        solution.fitness = -1.0;
    }

    assert_eq!(g_best, snapshot);
}

#[test]
fn test_call_site_errors() {
    let mut kernel = OptimizationKernel::new(
        CountingSphere::new(),
        options(Mode::Minimize),
        RandomNumberGenerator::from_seed(2),
    );
    let population = kernel.create_population(3);

    assert!(matches!(
        kernel.kway_tournament(&population, TournamentSize::Count(4), 2),
        Err(KernelError::Sampling(_))
    ));
    assert!(matches!(
        kernel.amend_position(&[0.0; 3], RepairPolicy::Clamp),
        Err(KernelError::DimensionMismatch {
            expected: 4,
            actual: 3
        })
    ));
    assert_eq!(
        kernel.roulette_wheel_index(&[]),
        Err(KernelError::EmptyPopulation)
    );
}
