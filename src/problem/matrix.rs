//! Dense Euclidean distance matrix.

/// A dense n×n distance matrix stored in row-major order.
///
/// Built once from city coordinates and never mutated afterwards, so it can
/// be shared freely across threads.
///
/// # Examples
///
/// ```
/// use u_tsp::problem::DistanceMatrix;
///
/// let dm = DistanceMatrix::euclidean(&[[0.0, 0.0], [3.0, 4.0], [6.0, 8.0]]);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes pairwise Euclidean distances. O(n²).
    pub fn euclidean(coords: &[[f64; 2]]) -> Self {
        let n = coords.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = coords[i][0] - coords[j][0];
                let dy = coords[i][1] - coords[j][1];
                let d = dx.hypot(dy);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { data, size: n }
    }

    /// Returns the distance between cities `from` and `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of cities in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Upper bound on any tour length: the sum of every row's largest
    /// entry. Infinite when coordinates are so far apart that distances
    /// overflow.
    pub fn max_tour_bound(&self) -> f64 {
        self.data
            .chunks(self.size.max(1))
            .map(|row| row.iter().copied().fold(0.0, f64::max))
            .sum()
    }

    /// Length of the closed tour visiting `route` in order.
    ///
    /// Assumes every index is in range; route validity is checked by
    /// [`TspProblem::cost`](super::TspProblem::cost).
    pub fn tour_length(&self, route: &[usize]) -> f64 {
        match (route.first(), route.last()) {
            (Some(&first), Some(&last)) => {
                let open: f64 = route.windows(2).map(|w| self.get(w[0], w[1])).sum();
                open + self.get(last, first)
            }
            _ => 0.0,
        }
    }
}
