//! TSP instance: city coordinates, distances, and route evaluation.

use super::matrix::DistanceMatrix;
use crate::error::{RouteViolation, TspError, TspResult};
use crate::random::{create_rng, shuffle};
use rand::Rng;

/// A Euclidean TSP instance.
///
/// Holds the city coordinates and the precomputed distance matrix. Both are
/// immutable after construction, so a `TspProblem` can be shared by several
/// solvers running concurrently.
///
/// # Examples
///
/// ```
/// use u_tsp::problem::TspProblem;
///
/// let problem = TspProblem::from_coords(&[
///     [0.0, 0.0],
///     [1.0, 0.0],
///     [1.0, 1.0],
///     [0.0, 1.0],
/// ])
/// .unwrap();
///
/// assert_eq!(problem.num_cities(), 4);
/// assert!((problem.cost(&[0, 1, 2, 3]).unwrap() - 4.0).abs() < 1e-10);
/// assert!(problem.cost(&[0, 1, 1, 3]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TspProblem {
    coords: Vec<[f64; 2]>,
    distances: DistanceMatrix,
}

impl TspProblem {
    /// Fewer cities leave no combinatorial choice.
    pub const MIN_CITIES: usize = 3;

    /// Upper bound on instance size; the O(n²) matrix grows quickly.
    pub const MAX_CITIES: usize = 500;

    /// Side length of the square random coordinates are drawn from.
    pub const COORD_RANGE: f64 = 100.0;

    /// Generates `num_cities` cities uniformly in `[0, COORD_RANGE)²`.
    pub fn random<R: Rng>(num_cities: usize, rng: &mut R) -> TspResult<Self> {
        check_city_count(num_cities)?;
        let coords = (0..num_cities)
            .map(|_| {
                [
                    rng.random_range(0.0..Self::COORD_RANGE),
                    rng.random_range(0.0..Self::COORD_RANGE),
                ]
            })
            .collect();
        Self::build(coords)
    }

    /// Generates a reproducible random instance from `seed`.
    pub fn from_seed(num_cities: usize, seed: u64) -> TspResult<Self> {
        Self::random(num_cities, &mut create_rng(seed))
    }

    /// Builds an instance from explicit `(x, y)` coordinates.
    pub fn from_coords(coords: &[[f64; 2]]) -> TspResult<Self> {
        check_city_count(coords.len())?;
        Self::build(coords.to_vec())
    }

    /// Builds an instance from an N×2 table of coordinates.
    ///
    /// Fails with [`TspError::InvalidConfiguration`] if any row does not
    /// hold exactly two values.
    pub fn from_rows(rows: &[Vec<f64>]) -> TspResult<Self> {
        let coords = rows
            .iter()
            .enumerate()
            .map(|(i, row)| match row.as_slice() {
                &[x, y] => Ok([x, y]),
                _ => Err(TspError::config(format!(
                    "coordinates must have shape (n, 2), row {i} has {} values",
                    row.len()
                ))),
            })
            .collect::<TspResult<Vec<_>>>()?;
        Self::from_coords(&coords)
    }

    fn build(coords: Vec<[f64; 2]>) -> TspResult<Self> {
        if let Some(i) = coords
            .iter()
            .position(|c| !(c[0].is_finite() && c[1].is_finite()))
        {
            return Err(TspError::config(format!(
                "coordinates of city {i} are not finite"
            )));
        }
        let distances = DistanceMatrix::euclidean(&coords);
        if !distances.max_tour_bound().is_finite() {
            return Err(TspError::config(
                "coordinates are too far apart: tour lengths overflow",
            ));
        }
        Ok(Self { coords, distances })
    }

    /// Number of cities.
    pub fn num_cities(&self) -> usize {
        self.coords.len()
    }

    /// City coordinates, indexed by city.
    pub fn city_coords(&self) -> &[[f64; 2]] {
        &self.coords
    }

    /// The precomputed distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Distance between cities `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances.get(i, j)
    }

    /// Checks that `route` is a permutation of `0..num_cities`.
    pub fn validate_route(&self, route: &[usize]) -> TspResult<()> {
        let n = self.num_cities();
        if route.len() != n {
            return Err(RouteViolation::WrongLength {
                expected: n,
                actual: route.len(),
            }
            .into());
        }
        let mut seen = vec![false; n];
        for &city in route {
            if city >= n {
                return Err(RouteViolation::OutOfRange {
                    city,
                    num_cities: n,
                }
                .into());
            }
            if std::mem::replace(&mut seen[city], true) {
                return Err(RouteViolation::Duplicate { city }.into());
            }
        }
        Ok(())
    }

    /// Total length of the closed tour, including the edge from the last
    /// city back to the first.
    pub fn cost(&self, route: &[usize]) -> TspResult<f64> {
        self.validate_route(route)?;
        Ok(self.tour_length(route))
    }

    /// Tour length without validation, for routes the solvers build
    /// themselves.
    pub(crate) fn tour_length(&self, route: &[usize]) -> f64 {
        self.distances.tour_length(route)
    }

    /// Returns a uniformly random permutation of the city indices.
    pub fn random_route<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let mut route: Vec<usize> = (0..self.num_cities()).collect();
        shuffle(&mut route, rng);
        route
    }
}

fn check_city_count(n: usize) -> TspResult<()> {
    if n < TspProblem::MIN_CITIES {
        return Err(TspError::config(format!(
            "at least {} cities are required, got {n}",
            TspProblem::MIN_CITIES
        )));
    }
    if n > TspProblem::MAX_CITIES {
        return Err(TspError::config(format!(
            "at most {} cities are supported, got {n}",
            TspProblem::MAX_CITIES
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unit_square() -> TspProblem {
        TspProblem::from_coords(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]])
            .expect("valid square")
    }

    #[test]
    fn test_random_instance_in_bounds() {
        let p = TspProblem::from_seed(20, 42).expect("valid");
        assert_eq!(p.num_cities(), 20);
        for c in p.city_coords() {
            assert!((0.0..TspProblem::COORD_RANGE).contains(&c[0]));
            assert!((0.0..TspProblem::COORD_RANGE).contains(&c[1]));
        }
    }

    #[test]
    fn test_seeded_instances_match() {
        let a = TspProblem::from_seed(15, 123).expect("valid");
        let b = TspProblem::from_seed(15, 123).expect("valid");
        assert_eq!(a.city_coords(), b.city_coords());
    }

    #[test]
    fn test_too_few_cities() {
        let err = TspProblem::from_seed(2, 1).unwrap_err();
        assert!(matches!(err, TspError::InvalidConfiguration(_)));

        let err = TspProblem::from_coords(&[[0.0, 0.0], [1.0, 1.0]]).unwrap_err();
        assert!(matches!(err, TspError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_too_many_cities() {
        let err = TspProblem::from_seed(TspProblem::MAX_CITIES + 1, 1).unwrap_err();
        assert!(matches!(err, TspError::InvalidConfiguration(_)));
        assert!(TspProblem::from_seed(TspProblem::MAX_CITIES, 1).is_ok());
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![0.0, 0.0], vec![1.0, 0.0, 5.0], vec![1.0, 1.0]];
        let err = TspProblem::from_rows(&rows).unwrap_err();
        assert!(matches!(err, TspError::InvalidConfiguration(_)));

        let rows = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0]];
        assert_eq!(TspProblem::from_rows(&rows).expect("valid").num_cities(), 3);
    }

    #[test]
    fn test_non_finite_coords() {
        let err = TspProblem::from_coords(&[[0.0, 0.0], [f64::NAN, 0.0], [1.0, 1.0]]).unwrap_err();
        assert!(matches!(err, TspError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_overflowing_distances_rejected() {
        let err = TspProblem::from_coords(&[[-1e308, 0.0], [1e308, 0.0], [0.0, 1e308]])
            .unwrap_err();
        assert!(matches!(err, TspError::InvalidConfiguration(_)));

        // each distance is finite but a full tour overflows
        let err = TspProblem::from_coords(&[[0.0, 0.0], [1e308, 0.0], [0.0, 1e308]])
            .unwrap_err();
        assert!(matches!(err, TspError::InvalidConfiguration(_)));

        let p = TspProblem::from_coords(&[[0.0, 0.0], [1e100, 0.0], [0.0, 1e100]])
            .expect("large but finite");
        assert!(p.cost(&[0, 1, 2]).expect("valid").is_finite());
    }

    #[test]
    fn test_cost_unit_square() {
        let p = unit_square();
        assert!((p.cost(&[0, 1, 2, 3]).expect("valid") - 4.0).abs() < 1e-10);
        assert!((p.cost(&[3, 2, 1, 0]).expect("valid") - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_cost_rejects_missing_and_duplicate() {
        let p = unit_square();
        let err = p.cost(&[0, 1, 1, 3]).unwrap_err();
        assert_eq!(
            err,
            TspError::InvalidRoute(RouteViolation::Duplicate { city: 1 })
        );
    }

    #[test]
    fn test_cost_rejects_wrong_length() {
        let p = unit_square();
        assert_eq!(
            p.cost(&[0, 1, 2]).unwrap_err(),
            TspError::InvalidRoute(RouteViolation::WrongLength {
                expected: 4,
                actual: 3
            })
        );
        assert!(p.cost(&[]).is_err());
    }

    #[test]
    fn test_cost_rejects_out_of_range() {
        let p = unit_square();
        assert_eq!(
            p.cost(&[0, 1, 2, 4]).unwrap_err(),
            TspError::InvalidRoute(RouteViolation::OutOfRange {
                city: 4,
                num_cities: 4
            })
        );
    }

    #[test]
    fn test_distance_lookup() {
        let p = unit_square();
        assert!((p.distance(0, 2) - 2f64.sqrt()).abs() < 1e-10);
        assert_eq!(p.distance(1, 1), 0.0);
        assert!(p.distances().is_symmetric(1e-12));
    }

    proptest! {
        #[test]
        fn prop_random_route_is_permutation(n in 3usize..60, seed in any::<u64>()) {
            let p = TspProblem::from_seed(n, seed).expect("valid");
            let mut rng = create_rng(seed ^ 0x9e37);
            let mut route = p.random_route(&mut rng);
            prop_assert!(p.validate_route(&route).is_ok());
            route.sort_unstable();
            prop_assert_eq!(route, (0..n).collect::<Vec<_>>());
        }

        #[test]
        fn prop_cost_rotation_and_reversal_invariant(
            n in 3usize..40,
            seed in any::<u64>(),
            shift in 0usize..40,
        ) {
            let p = TspProblem::from_seed(n, seed).expect("valid");
            let mut rng = create_rng(seed.wrapping_add(1));
            let route = p.random_route(&mut rng);
            let base = p.cost(&route).expect("valid");

            let expected: f64 = (0..n)
                .map(|i| p.distance(route[i], route[(i + 1) % n]))
                .sum();
            prop_assert!(base >= 0.0);
            prop_assert!((base - expected).abs() < 1e-9);

            let mut rotated = route.clone();
            rotated.rotate_left(shift % n);
            prop_assert!((p.cost(&rotated).expect("valid") - base).abs() < 1e-9);

            let mut reversed = route;
            reversed.reverse();
            prop_assert!((p.cost(&reversed).expect("valid") - base).abs() < 1e-9);
        }
    }
}
