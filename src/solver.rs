//! Contract shared by the SA and WOA solvers.
//!
//! A caller builds a solver against a [`TspProblem`](crate::problem::TspProblem),
//! then calls [`TspSolver::solve`] or [`TspSolver::solve_with`] to run it to
//! completion on the current thread. Long runs can report progress through a
//! callback and be stopped early through a shared cancellation flag.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Progress sink: `(best_route, best_cost, iteration)`.
///
/// The route is a read-only view of the solver's current best; copy it if
/// it must outlive the call.
pub type ProgressFn<'a> = &'a mut dyn FnMut(&[usize], f64, usize);

/// Cooperative cancellation flag. Set it to `true` from any thread to stop
/// a running solve at the next iteration boundary.
pub type CancelFlag = Arc<AtomicBool>;

pub(crate) fn is_cancelled(cancel: &Option<CancelFlag>) -> bool {
    cancel
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// One convergence sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HistoryPoint {
    /// Iteration at which the sample was taken (0 = after initialization).
    pub iteration: usize,
    /// Best cost found up to that iteration.
    pub best_cost: f64,
}

/// Outcome of a solve.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SolveResult {
    /// Best tour found.
    pub best_route: Vec<usize>,

    /// Length of the best tour.
    pub best_cost: f64,

    /// Sampled convergence history: the initial state, periodic samples,
    /// and a final sample.
    pub history: Vec<HistoryPoint>,

    /// Completed iterations.
    pub iterations: usize,

    /// Whether the run stopped early because the cancel flag was set.
    pub cancelled: bool,

    /// Wall-clock time spent inside the solve.
    pub elapsed: Duration,
}

/// Name and configured parameters of a solver, for reporting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub parameters: Vec<(&'static str, f64)>,
}

impl AlgorithmInfo {
    /// Looks up a parameter by name.
    pub fn parameter(&self, key: &str) -> Option<f64> {
        self.parameters
            .iter()
            .find(|(k, _)| *k == key)
            .map(|&(_, v)| v)
    }
}

impl fmt::Display for AlgorithmInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (i, (key, value)) in self.parameters.iter().enumerate() {
            let sep = if i == 0 { " (" } else { ", " };
            write!(f, "{sep}{key}={value}")?;
        }
        if !self.parameters.is_empty() {
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// A TSP metaheuristic bound to one problem instance.
///
/// Implementations keep all per-run search state local to `solve_with`, so
/// one solver can be run repeatedly and several solvers can share a problem.
pub trait TspSolver {
    /// Runs to completion (or cancellation).
    fn solve_with(
        &self,
        on_progress: Option<ProgressFn<'_>>,
        cancel: Option<CancelFlag>,
    ) -> SolveResult;

    /// Describes the algorithm and its configured parameters.
    fn algorithm_info(&self) -> AlgorithmInfo;

    /// Runs to completion without progress reporting or cancellation.
    fn solve(&self) -> SolveResult {
        self.solve_with(None, None)
    }
}
