//! Simulated Annealing (SA) for the TSP.
//!
//! A single-trajectory search that accepts worsening moves with a
//! probability that shrinks as the temperature cools geometrically,
//! allowing the search to escape local optima early and settle late.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;

pub use config::SaConfig;
pub use runner::{SaSolver, SaStats, SA_HISTORY_INTERVAL};
