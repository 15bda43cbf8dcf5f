//! SA execution loop.

use super::config::SaConfig;
use crate::error::TspResult;
use crate::problem::TspProblem;
use crate::random::rng_from;
use crate::solver::{
    is_cancelled, AlgorithmInfo, CancelFlag, HistoryPoint, ProgressFn, SolveResult, TspSolver,
};
use rand::seq::index;
use rand::Rng;
use std::time::Instant;
use tracing::{debug, trace};

/// History and progress are reported every this many iterations.
pub const SA_HISTORY_INTERVAL: usize = 100;

/// Move statistics of a single SA run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SaStats {
    /// Accepted moves, including improvements.
    pub accepted_moves: usize,

    /// Strictly improving moves.
    pub improving_moves: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,
}

/// Simulated Annealing over TSP tours.
///
/// Neighbors swap two distinct tour positions. Improving neighbors are
/// always accepted; worsening ones with probability
/// `exp((current - neighbor) / T)` (Metropolis criterion).
///
/// # Examples
///
/// ```
/// use u_tsp::problem::TspProblem;
/// use u_tsp::sa::{SaConfig, SaSolver};
/// use u_tsp::solver::TspSolver;
///
/// let problem = TspProblem::from_seed(15, 7).unwrap();
/// let solver = SaSolver::new(&problem, SaConfig::default().with_seed(1)).unwrap();
/// let result = solver.solve();
/// assert!(problem.cost(&result.best_route).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SaSolver<'a> {
    problem: &'a TspProblem,
    config: SaConfig,
}

impl<'a> SaSolver<'a> {
    /// Binds a validated configuration to `problem`.
    pub fn new(problem: &'a TspProblem, config: SaConfig) -> TspResult<Self> {
        config.validate()?;
        Ok(Self { problem, config })
    }

    pub fn config(&self) -> &SaConfig {
        &self.config
    }

    /// Runs SA and also returns move statistics.
    pub fn run(
        &self,
        on_progress: Option<ProgressFn<'_>>,
        cancel: Option<CancelFlag>,
    ) -> (SolveResult, SaStats) {
        let started = Instant::now();
        let config = &self.config;
        let problem = self.problem;
        let n = problem.num_cities();
        let mut on_progress = on_progress;
        let mut rng = rng_from(config.seed);

        let mut current = problem.random_route(&mut rng);
        let mut current_cost = problem.tour_length(&current);
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = config.initial_temperature;
        let mut iteration = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;

        let mut history = Vec::with_capacity(config.max_iterations / SA_HISTORY_INTERVAL + 2);
        history.push(HistoryPoint {
            iteration: 0,
            best_cost,
        });

        debug!(
            cities = n,
            initial_cost = current_cost,
            initial_temperature = temperature,
            "simulated annealing started"
        );

        while temperature > config.min_temperature && iteration < config.max_iterations {
            if is_cancelled(&cancel) {
                cancelled = true;
                debug!(iteration, best_cost, "simulated annealing cancelled");
                break;
            }

            let picked = index::sample(&mut rng, n, 2);
            let (i, j) = (picked.index(0), picked.index(1));
            current.swap(i, j);
            let neighbor_cost = problem.tour_length(&current);

            // Metropolis acceptance criterion
            let accept = if neighbor_cost < current_cost {
                improving_moves += 1;
                true
            } else {
                let probability = ((current_cost - neighbor_cost) / temperature).exp();
                rng.random_range(0.0..1.0) < probability
            };

            if accept {
                current_cost = neighbor_cost;
                accepted_moves += 1;
                if current_cost < best_cost {
                    best.copy_from_slice(&current);
                    best_cost = current_cost;
                }
            } else {
                current.swap(i, j);
            }

            temperature *= config.cooling_rate;
            iteration += 1;

            if iteration.is_multiple_of(SA_HISTORY_INTERVAL) {
                history.push(HistoryPoint {
                    iteration,
                    best_cost,
                });
                trace!(iteration, best_cost, temperature, "sa sample");
                if let Some(callback) = on_progress.as_mut() {
                    callback(&best, best_cost, iteration);
                }
            }
        }

        history.push(HistoryPoint {
            iteration,
            best_cost,
        });

        let elapsed = started.elapsed();
        debug!(
            iterations = iteration,
            best_cost,
            accepted_moves,
            improving_moves,
            final_temperature = temperature,
            elapsed_ms = elapsed.as_millis() as u64,
            "simulated annealing finished"
        );

        let result = SolveResult {
            best_route: best,
            best_cost,
            history,
            iterations: iteration,
            cancelled,
            elapsed,
        };
        let stats = SaStats {
            accepted_moves,
            improving_moves,
            final_temperature: temperature,
        };
        (result, stats)
    }
}

impl TspSolver for SaSolver<'_> {
    fn solve_with(
        &self,
        on_progress: Option<ProgressFn<'_>>,
        cancel: Option<CancelFlag>,
    ) -> SolveResult {
        self.run(on_progress, cancel).0
    }

    fn algorithm_info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "Simulated Annealing",
            parameters: vec![
                ("initial_temp", self.config.initial_temperature),
                ("cooling_rate", self.config.cooling_rate),
                ("min_temp", self.config.min_temperature),
                ("max_iterations", self.config.max_iterations as f64),
            ],
        }
    }
}
