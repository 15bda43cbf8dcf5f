//! Permutation-space operators for the discrete WOA.
//!
//! The continuous WOA moves a whale by a scaled distance toward a reference
//! position. On tours, "distance" is the swap sequence that turns one tour
//! into another, and "moving a fraction of the way" means applying only a
//! prefix of that sequence.
//!
//! # Swap sequence
//!
//! - [`swap_sequence`]: ordered swaps transforming `source` into `target`
//! - [`apply_swaps`]: apply a (prefix of a) swap sequence in place
//!
//! # Move operators
//!
//! | Move | Reference | Swaps applied |
//! |------|-----------|---------------|
//! | Encircling | leader | `clamp(⌊\|A\|·C·len/4⌋, 1, len)` |
//! | Search for prey | random other whale | `clamp(⌊\|A\|·C·len/3⌋, 2, len)` |
//! | Spiral | leader | `clamp(⌊\|e^{bl}·cos 2πl\|·len/2⌋, 1, len)` |
//!
//! Counts never exceed `len`, so an empty sequence applies nothing.
//!
//! # References
//!
//! - Mirjalili & Lewis (2016), "The Whale Optimization Algorithm"

use std::f64::consts::PI;

/// Ordered list of index swaps.
pub type Swap = (usize, usize);

/// Computes the swaps that transform `source` into `target`.
///
/// Scans positions left to right; wherever the working copy disagrees with
/// `target`, the wanted city is swapped into place and the pair recorded.
/// The result is deterministic, has at most `n - 1` entries, and applying
/// it in full to a copy of `source` yields `target`.
///
/// # Panics
///
/// Panics if the routes differ in length or either one is not a
/// permutation of `0..n`.
///
/// # Examples
///
/// ```
/// use u_tsp::woa::operators::{apply_swaps, swap_sequence};
///
/// let source = [2, 0, 1, 3];
/// let target = [0, 1, 2, 3];
/// let swaps = swap_sequence(&source, &target);
/// assert_eq!(swaps, vec![(0, 1), (1, 2)]);
///
/// let mut route = source.to_vec();
/// apply_swaps(&mut route, &swaps);
/// assert_eq!(route, target);
/// ```
pub fn swap_sequence(source: &[usize], target: &[usize]) -> Vec<Swap> {
    let n = source.len();
    assert_eq!(n, target.len(), "routes must have equal length");
    assert!(
        is_permutation(source) && is_permutation(target),
        "routes must be permutations of 0..{n}"
    );

    let mut working = source.to_vec();
    let mut position = vec![0usize; n];
    for (i, &city) in working.iter().enumerate() {
        position[city] = i;
    }

    let mut swaps = Vec::new();
    for i in 0..n {
        let wanted = target[i];
        let here = working[i];
        if here != wanted {
            let j = position[wanted];
            working.swap(i, j);
            position[here] = j;
            position[wanted] = i;
            swaps.push((i, j));
        }
    }
    swaps
}

/// Whether `route` holds each of `0..route.len()` exactly once.
fn is_permutation(route: &[usize]) -> bool {
    let mut seen = vec![false; route.len()];
    route
        .iter()
        .all(|&city| city < seen.len() && !std::mem::replace(&mut seen[city], true))
}

/// Applies `swaps` to `route` in order.
pub fn apply_swaps(route: &mut [usize], swaps: &[Swap]) {
    for &(i, j) in swaps {
        route.swap(i, j);
    }
}

/// The three mutually exclusive WOA position updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum WhaleMove {
    /// Exploitation: shrink toward the leader.
    Encircling,
    /// Exploration: move toward a random other whale.
    SearchForPrey,
    /// Logarithmic spiral around the leader.
    Spiral,
}

impl WhaleMove {
    /// Picks the move from the coefficient `A` and the branch draw `p`.
    pub fn select(coef_a: f64, p: f64) -> Self {
        if p < 0.5 {
            if coef_a.abs() < 1.0 {
                WhaleMove::Encircling
            } else {
                WhaleMove::SearchForPrey
            }
        } else {
            WhaleMove::Spiral
        }
    }
}

/// `clamp(⌊raw⌋, floor, available)`, capped at `available`.
fn swap_budget(raw: f64, floor: usize, available: usize) -> usize {
    // float-to-int `as` saturates; NaN becomes 0
    let k = raw.floor() as usize;
    k.min(available).max(floor).min(available)
}

/// Number of leader-bound swaps for the encircling move.
pub fn encircling_swaps(coef_a: f64, coef_c: f64, available: usize) -> usize {
    swap_budget(coef_a.abs() * coef_c * available as f64 / 4.0, 1, available)
}

/// Number of swaps toward a random whale for the search-for-prey move.
pub fn search_swaps(coef_a: f64, coef_c: f64, available: usize) -> usize {
    swap_budget(coef_a.abs() * coef_c * available as f64 / 3.0, 2, available)
}

/// Spiral shape `e^{b·l} · cos(2πl)`.
pub fn spiral_factor(b: f64, l: f64) -> f64 {
    (b * l).exp() * (2.0 * PI * l).cos()
}

/// Number of leader-bound swaps for the spiral move.
pub fn spiral_swaps(factor: f64, available: usize) -> usize {
    swap_budget(factor.abs() * available as f64 / 2.0, 1, available)
}
