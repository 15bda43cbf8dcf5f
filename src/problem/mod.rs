//! Euclidean TSP problem model.
//!
//! - [`TspProblem`]: city coordinates, route validation, route cost
//! - [`DistanceMatrix`]: precomputed pairwise distances

mod matrix;
mod model;

pub use matrix::DistanceMatrix;
pub use model::TspProblem;
