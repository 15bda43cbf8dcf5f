//! Euclidean Travelling Salesman Problem solved with two metaheuristics.
//!
//! - **Simulated Annealing (SA)**: single-trajectory search with
//!   temperature-controlled acceptance of worsening swap moves.
//! - **Whale Optimization Algorithm (WOA)**: population-based search whose
//!   encircling, spiral, and search-for-prey updates are carried into
//!   permutation space through swap sequences.
//!
//! Both solvers share the [`solver::TspSolver`] contract: run to completion
//! on the calling thread, optionally report progress through a callback,
//! stop early on a cooperative cancel flag, and return the best tour, its
//! length, and a sampled convergence history.
//!
//! # Example
//!
//! ```
//! use u_tsp::problem::TspProblem;
//! use u_tsp::sa::{SaConfig, SaSolver};
//! use u_tsp::solver::TspSolver;
//! use u_tsp::woa::{WoaConfig, WoaSolver};
//!
//! let problem = TspProblem::from_seed(20, 42).unwrap();
//!
//! let sa = SaSolver::new(&problem, SaConfig::for_instance_size(20).with_seed(1)).unwrap();
//! let woa = WoaSolver::new(
//!     &problem,
//!     WoaConfig::default().with_num_whales(10).with_max_iterations(100).with_seed(1),
//! )
//! .unwrap();
//!
//! for solver in [&sa as &dyn TspSolver, &woa] {
//!     let result = solver.solve();
//!     println!("{}: {:.2}", solver.algorithm_info(), result.best_cost);
//!     assert!(problem.cost(&result.best_route).is_ok());
//! }
//! ```
//!
//! # Architecture
//!
//! Library only. Presentation concerns (plotting, desktop UI, result
//! export) are left to callers, which work purely on the returned
//! [`solver::SolveResult`].

pub mod error;
pub mod problem;
pub mod random;
pub mod sa;
pub mod solver;
pub mod woa;

pub use error::{RouteViolation, TspError, TspResult};
