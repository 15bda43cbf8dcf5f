//! Discrete Whale Optimization Algorithm (WOA) for the TSP.
//!
//! A population of whales hunts around the best tour found so far (the
//! leader). The continuous WOA update rules are mapped onto tours by
//! applying a prefix of the swap sequence between a whale and its
//! reference tour; see [`operators`].
//!
//! # Key Types
//!
//! - [`WoaConfig`]: population size, iterations, spiral constant, `a_max`
//! - [`WoaSolver`]: runs the hunt on a [`TspProblem`](crate::problem::TspProblem)
//! - [`WoaStats`]: how often each move operator fired
//!
//! # References
//!
//! - Mirjalili & Lewis (2016), "The Whale Optimization Algorithm",
//!   *Advances in Engineering Software* 95, 51-67.

mod config;
pub mod operators;
mod runner;
mod types;

pub use config::WoaConfig;
pub use runner::{WoaSolver, WoaStats, WOA_HISTORY_INTERVAL};
pub use types::Leader;
