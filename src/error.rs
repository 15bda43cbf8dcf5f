//! Error types.

use thiserror::Error;

/// Result alias for fallible operations in this crate.
pub type TspResult<T> = Result<T, TspError>;

/// Errors raised by problem construction, route validation, and solver
/// construction.
///
/// Cancelling a running solve is not an error; it yields a normal
/// [`SolveResult`](crate::solver::SolveResult) with `cancelled = true`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    /// A constructor parameter is out of range or malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A route is not a permutation of the problem's city indices.
    #[error("invalid route: {0}")]
    InvalidRoute(RouteViolation),
}

impl TspError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        TspError::InvalidConfiguration(msg.into())
    }
}

impl From<RouteViolation> for TspError {
    fn from(v: RouteViolation) -> Self {
        TspError::InvalidRoute(v)
    }
}

/// The first permutation invariant a route was found to break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RouteViolation {
    /// Route length differs from the number of cities.
    #[error("expected {expected} cities, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    /// A city index is not in `0..num_cities`.
    #[error("city index {city} out of range 0..{num_cities}")]
    OutOfRange { city: usize, num_cities: usize },

    /// A city index appears more than once.
    #[error("city {city} visited more than once")]
    Duplicate { city: usize },
}
