//! WOA execution loop.
//!
//! # Algorithm (per iteration `t = 1..=T`)
//!
//! 1. `a = a_max − t·a_max/T`
//! 2. For each whale: draw `A = 2aU − a`, `C = 2U'`, `p`
//!    - `p < 0.5`, `|A| < 1` → encircling toward the leader
//!    - `p < 0.5`, `|A| ≥ 1` → search toward a random other whale
//!    - `p ≥ 0.5` → spiral toward the leader, `l ∈ [−1, 1]`
//! 3. Apply the chosen swap prefix, re-evaluate, offer to the leader
//!
//! The leader is sampled into the history every 10 iterations.

use super::config::WoaConfig;
use super::operators::{
    apply_swaps, encircling_swaps, search_swaps, spiral_factor, spiral_swaps, swap_sequence,
    WhaleMove,
};
use super::types::{Leader, Whale};
use crate::error::TspResult;
use crate::problem::TspProblem;
use crate::random::rng_from;
use crate::solver::{
    is_cancelled, AlgorithmInfo, CancelFlag, HistoryPoint, ProgressFn, SolveResult, TspSolver,
};
use rand::Rng;
use std::time::Instant;
use tracing::{debug, trace};

/// History and progress are reported every this many iterations.
pub const WOA_HISTORY_INTERVAL: usize = 10;

/// How often each move operator fired during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WoaStats {
    pub encircling_moves: usize,
    pub search_moves: usize,
    pub spiral_moves: usize,
    /// Moves that produced a new leader.
    pub leader_updates: usize,
}

impl WoaStats {
    fn record(&mut self, mv: WhaleMove) {
        match mv {
            WhaleMove::Encircling => self.encircling_moves += 1,
            WhaleMove::SearchForPrey => self.search_moves += 1,
            WhaleMove::Spiral => self.spiral_moves += 1,
        }
    }

    /// Total whale updates.
    pub fn total_moves(&self) -> usize {
        self.encircling_moves + self.search_moves + self.spiral_moves
    }
}

/// Discrete Whale Optimization Algorithm over TSP tours.
///
/// # Examples
///
/// ```
/// use u_tsp::problem::TspProblem;
/// use u_tsp::solver::TspSolver;
/// use u_tsp::woa::{WoaConfig, WoaSolver};
///
/// let problem = TspProblem::from_seed(12, 3).unwrap();
/// let config = WoaConfig::default()
///     .with_num_whales(10)
///     .with_max_iterations(50)
///     .with_seed(1);
/// let result = WoaSolver::new(&problem, config).unwrap().solve();
/// assert_eq!(result.iterations, 50);
/// assert_eq!(result.history.len(), 1 + 50 / 10 + 1);
/// ```
#[derive(Debug, Clone)]
pub struct WoaSolver<'a> {
    problem: &'a TspProblem,
    config: WoaConfig,
}

impl<'a> WoaSolver<'a> {
    /// Binds a validated configuration to `problem`.
    pub fn new(problem: &'a TspProblem, config: WoaConfig) -> TspResult<Self> {
        config.validate()?;
        Ok(Self { problem, config })
    }

    pub fn config(&self) -> &WoaConfig {
        &self.config
    }

    /// Runs WOA and also returns per-operator statistics.
    pub fn run(
        &self,
        on_progress: Option<ProgressFn<'_>>,
        cancel: Option<CancelFlag>,
    ) -> (SolveResult, WoaStats) {
        self.hunt(on_progress, &mut || is_cancelled(&cancel))
    }

    /// The search loop. `should_stop` is polled before every whale update.
    fn hunt(
        &self,
        on_progress: Option<ProgressFn<'_>>,
        should_stop: &mut dyn FnMut() -> bool,
    ) -> (SolveResult, WoaStats) {
        let started = Instant::now();
        let config = &self.config;
        let problem = self.problem;
        let mut on_progress = on_progress;
        let mut rng = rng_from(config.seed);
        let mut stats = WoaStats::default();

        let mut spawn = || {
            let position = problem.random_route(&mut rng);
            let fitness = problem.tour_length(&position);
            Whale { position, fitness }
        };
        let first = spawn();
        let mut leader = Leader::new(first.position.clone(), first.fitness);
        let mut whales = Vec::with_capacity(config.num_whales);
        whales.push(first);
        for _ in 1..config.num_whales {
            let whale = spawn();
            leader.offer(&whale.position, whale.fitness);
            whales.push(whale);
        }

        let mut history =
            Vec::with_capacity(config.max_iterations / WOA_HISTORY_INTERVAL + 2);
        history.push(HistoryPoint {
            iteration: 0,
            best_cost: leader.fitness(),
        });

        debug!(
            cities = problem.num_cities(),
            whales = whales.len(),
            initial_best = leader.fitness(),
            "whale optimization started"
        );

        let max_iter = config.max_iterations;
        let decay = config.a_max / max_iter as f64;
        let mut completed = 0usize;
        let mut cancelled = false;

        'search: for t in 1..=max_iter {
            let a = config.a_max - t as f64 * decay;

            for w in 0..whales.len() {
                if should_stop() {
                    cancelled = true;
                    debug!(iteration = t, whale = w, "whale optimization cancelled");
                    break 'search;
                }

                let coef_a = 2.0 * a * rng.random_range(0.0..1.0) - a;
                let coef_c = 2.0 * rng.random_range(0.0..1.0);
                let p = rng.random_range(0.0..1.0);
                let mv = WhaleMove::select(coef_a, p);

                let current = &whales[w].position;
                let (swaps, count) = match mv {
                    WhaleMove::Encircling => {
                        let swaps = swap_sequence(current, leader.position());
                        let k = encircling_swaps(coef_a, coef_c, swaps.len());
                        (swaps, k)
                    }
                    WhaleMove::SearchForPrey => {
                        let other = pick_other(w, whales.len(), &mut rng);
                        let swaps = swap_sequence(current, &whales[other].position);
                        let k = search_swaps(coef_a, coef_c, swaps.len());
                        (swaps, k)
                    }
                    WhaleMove::Spiral => {
                        let l = rng.random_range(-1.0..=1.0);
                        let swaps = swap_sequence(current, leader.position());
                        let k = spiral_swaps(spiral_factor(config.spiral_constant, l), swaps.len());
                        (swaps, k)
                    }
                };

                let whale = &mut whales[w];
                apply_swaps(&mut whale.position, &swaps[..count]);
                whale.fitness = problem.tour_length(&whale.position);
                stats.record(mv);
                if leader.offer(&whale.position, whale.fitness) {
                    stats.leader_updates += 1;
                }
            }

            completed = t;

            if t.is_multiple_of(WOA_HISTORY_INTERVAL) {
                history.push(HistoryPoint {
                    iteration: t,
                    best_cost: leader.fitness(),
                });
                trace!(iteration = t, best_cost = leader.fitness(), a, "woa sample");
                if let Some(callback) = on_progress.as_mut() {
                    callback(leader.position(), leader.fitness(), t);
                }
            }
        }

        history.push(HistoryPoint {
            iteration: completed,
            best_cost: leader.fitness(),
        });

        let elapsed = started.elapsed();
        debug!(
            iterations = completed,
            best_cost = leader.fitness(),
            encircling = stats.encircling_moves,
            search = stats.search_moves,
            spiral = stats.spiral_moves,
            elapsed_ms = elapsed.as_millis() as u64,
            "whale optimization finished"
        );

        let (best_route, best_cost) = leader.into_parts();
        let result = SolveResult {
            best_route,
            best_cost,
            history,
            iterations: completed,
            cancelled,
            elapsed,
        };
        (result, stats)
    }
}

/// Uniformly picks a whale index other than `me`; with a single whale,
/// returns `me`.
fn pick_other<R: Rng>(me: usize, population: usize, rng: &mut R) -> usize {
    if population < 2 {
        return me;
    }
    let r = rng.random_range(0..population - 1);
    if r >= me {
        r + 1
    } else {
        r
    }
}

impl TspSolver for WoaSolver<'_> {
    fn solve_with(
        &self,
        on_progress: Option<ProgressFn<'_>>,
        cancel: Option<CancelFlag>,
    ) -> SolveResult {
        self.run(on_progress, cancel).0
    }

    fn algorithm_info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: "Whale Optimization Algorithm (WOA)",
            parameters: vec![
                ("num_whales", self.config.num_whales as f64),
                ("max_iterations", self.config.max_iterations as f64),
                ("spiral_constant", self.config.spiral_constant),
                ("a_max", self.config.a_max),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TspError;
    use crate::random::create_rng;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn unit_square() -> TspProblem {
        TspProblem::from_coords(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]])
            .expect("valid square")
    }

    fn small_config(max_iterations: usize) -> WoaConfig {
        WoaConfig::default()
            .with_num_whales(15)
            .with_max_iterations(max_iterations)
            .with_seed(42)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let problem = unit_square();
        let err = WoaSolver::new(&problem, WoaConfig::default().with_num_whales(0)).unwrap_err();
        assert!(matches!(err, TspError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_unit_square_optimal() {
        let problem = unit_square();
        let config = WoaConfig::default()
            .with_num_whales(30)
            .with_max_iterations(200)
            .with_seed(42);
        let result = WoaSolver::new(&problem, config).expect("valid").solve();

        assert!(
            result.best_cost <= 4.01,
            "expected optimal square tour, got {}",
            result.best_cost
        );
        let cost = problem.cost(&result.best_route).expect("valid route");
        assert!((cost - result.best_cost).abs() < 1e-9);
    }

    #[test]
    fn test_history_length_and_monotone() {
        let problem = TspProblem::from_seed(20, 5).expect("valid");
        for max_iterations in [10, 95, 200] {
            let solver = WoaSolver::new(&problem, small_config(max_iterations)).expect("valid");
            let result = solver.solve();

            assert_eq!(result.iterations, max_iterations);
            assert_eq!(result.history.len(), 1 + max_iterations / 10 + 1);
            assert_eq!(result.history.last().map(|h| h.iteration), Some(max_iterations));
            for window in result.history.windows(2) {
                assert!(
                    window[1].best_cost <= window[0].best_cost,
                    "leader fitness should be non-increasing: {} > {}",
                    window[1].best_cost,
                    window[0].best_cost
                );
            }
        }
    }

    #[test]
    fn test_progress_cadence_and_leader_view() {
        let problem = TspProblem::from_seed(15, 9).expect("valid");
        let solver = WoaSolver::new(&problem, small_config(50)).expect("valid");

        let mut seen = Vec::new();
        let mut on_progress = |route: &[usize], cost: f64, iteration: usize| {
            let check = problem.cost(route).expect("leader is a valid route");
            assert!((check - cost).abs() < 1e-9);
            seen.push((iteration, cost));
        };
        let result = solver.solve_with(Some(&mut on_progress), None);

        let iterations: Vec<usize> = seen.iter().map(|&(i, _)| i).collect();
        assert_eq!(iterations, vec![10, 20, 30, 40, 50]);
        for window in seen.windows(2) {
            assert!(window[1].1 <= window[0].1);
        }
        assert_eq!(seen.last().map(|&(_, c)| c), Some(result.best_cost));
    }

    #[test]
    fn test_improves_random_instance() {
        let problem = TspProblem::from_seed(25, 13).expect("valid");
        let solver = WoaSolver::new(&problem, small_config(300)).expect("valid");
        let (result, stats) = solver.run(None, None);

        assert!(result.best_cost < result.history[0].best_cost);
        assert_eq!(stats.total_moves(), 15 * 300);
        assert!(stats.encircling_moves > 0);
        assert!(stats.search_moves > 0);
        assert!(stats.spiral_moves > 0);
        assert!(stats.leader_updates > 0);
    }

    #[test]
    fn test_single_whale() {
        let problem = TspProblem::from_seed(10, 21).expect("valid");
        let config = WoaConfig::default()
            .with_num_whales(1)
            .with_max_iterations(100)
            .with_seed(3);
        let result = WoaSolver::new(&problem, config).expect("valid").solve();

        assert!(!result.cancelled);
        assert_eq!(result.iterations, 100);
        let cost = problem.cost(&result.best_route).expect("valid route");
        assert!((cost - result.best_cost).abs() < 1e-9);
    }

    #[test]
    fn test_cancel_before_start() {
        let problem = TspProblem::from_seed(10, 4).expect("valid");
        let solver = WoaSolver::new(&problem, small_config(500)).expect("valid");

        let cancel = Arc::new(AtomicBool::new(true));
        let result = solver.solve_with(None, Some(cancel));

        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.history.len(), 2);
        assert!(problem.cost(&result.best_route).is_ok());
    }

    #[test]
    fn test_cancel_from_progress_callback() {
        let problem = TspProblem::from_seed(10, 4).expect("valid");
        let solver = WoaSolver::new(&problem, small_config(500)).expect("valid");

        let cancel = Arc::new(AtomicBool::new(false));
        let flag = cancel.clone();
        let mut on_progress = |_: &[usize], _: f64, iteration: usize| {
            if iteration == 20 {
                flag.store(true, Ordering::Relaxed);
            }
        };
        let result = solver.solve_with(Some(&mut on_progress), Some(cancel));

        assert!(result.cancelled);
        assert_eq!(result.iterations, 20);
        // initial + samples at 10 and 20 + final
        assert_eq!(result.history.len(), 4);
    }

    #[test]
    fn test_cancel_mid_population_sweep() {
        let problem = TspProblem::from_seed(12, 6).expect("valid");
        let solver = WoaSolver::new(&problem, small_config(50)).expect("valid");

        // Stop before whale 5 of iteration 3 (15 whales per iteration).
        let stop_at = 2 * 15 + 5 + 1;
        let mut polls = 0usize;
        let mut should_stop = || {
            polls += 1;
            polls >= stop_at
        };
        let (result, stats) = solver.hunt(None, &mut should_stop);

        assert!(result.cancelled);
        assert_eq!(result.iterations, 2);
        assert_eq!(stats.total_moves(), 2 * 15 + 5);
        let cost = problem.cost(&result.best_route).expect("valid leader route");
        assert!((cost - result.best_cost).abs() < 1e-9);
        assert_eq!(
            result.history.last().copied(),
            Some(HistoryPoint {
                iteration: 2,
                best_cost: result.best_cost
            })
        );
    }

    #[test]
    fn test_leader_seeded_when_all_costs_tie() {
        // Collinear cities: both distinct tours have the same length.
        let problem =
            TspProblem::from_coords(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]).expect("valid");
        let config = WoaConfig::default()
            .with_num_whales(3)
            .with_max_iterations(5)
            .with_seed(8);
        let result = WoaSolver::new(&problem, config).expect("valid").solve();

        assert_eq!(result.best_route.len(), 3);
        assert!((result.best_cost - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_seed_reproducible() {
        let problem = TspProblem::from_seed(18, 2).expect("valid");
        let solver = WoaSolver::new(&problem, small_config(60)).expect("valid");
        let a = solver.solve();
        let b = solver.solve();
        assert_eq!(a.best_route, b.best_route);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_concurrent_solves_share_problem() {
        let problem = TspProblem::from_seed(15, 30).expect("valid");
        let results: Vec<SolveResult> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..3)
                .map(|seed| {
                    let problem = &problem;
                    s.spawn(move || {
                        let config = small_config(40).with_seed(seed);
                        WoaSolver::new(problem, config).expect("valid").solve()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("solver thread panicked"))
                .collect()
        });
        for result in results {
            assert!(problem.cost(&result.best_route).is_ok());
        }
    }

    #[test]
    fn test_pick_other_never_self() {
        let mut rng = create_rng(1);
        for me in 0..5 {
            for _ in 0..50 {
                let other = pick_other(me, 5, &mut rng);
                assert_ne!(other, me);
                assert!(other < 5);
            }
        }
        assert_eq!(pick_other(0, 1, &mut rng), 0);
    }

    #[test]
    fn test_algorithm_info() {
        let problem = unit_square();
        let solver = WoaSolver::new(&problem, WoaConfig::default()).expect("valid");
        let info = solver.algorithm_info();
        assert_eq!(info.name, "Whale Optimization Algorithm (WOA)");
        assert_eq!(info.parameter("num_whales"), Some(30.0));
        assert_eq!(info.parameter("a_max"), Some(2.0));
    }
}
