//! WOA configuration.

use crate::error::{TspError, TspResult};

/// Configuration for the Whale Optimization Algorithm.
///
/// # Examples
///
/// ```
/// use u_tsp::woa::WoaConfig;
///
/// let config = WoaConfig::default()
///     .with_num_whales(40)
///     .with_max_iterations(1500)
///     .with_spiral_constant(1.0)
///     .with_a_max(2.0)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WoaConfig {
    /// Population size. A single whale is legal.
    pub num_whales: usize,

    /// Number of iterations; the run always completes all of them unless
    /// cancelled.
    pub max_iterations: usize,

    /// Logarithmic spiral shape constant `b`.
    pub spiral_constant: f64,

    /// Starting value of the control coefficient `a`, which decays
    /// linearly to 0 over the run.
    pub a_max: f64,

    /// Random seed for reproducibility. `None` draws a fresh seed per solve.
    pub seed: Option<u64>,
}

impl Default for WoaConfig {
    fn default() -> Self {
        Self {
            num_whales: 30,
            max_iterations: 1000,
            spiral_constant: 1.0,
            a_max: 2.0,
            seed: None,
        }
    }
}

impl WoaConfig {
    pub fn with_num_whales(mut self, n: usize) -> Self {
        self.num_whales = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_spiral_constant(mut self, b: f64) -> Self {
        self.spiral_constant = b;
        self
    }

    pub fn with_a_max(mut self, a_max: f64) -> Self {
        self.a_max = a_max;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset scaled to the number of cities.
    ///
    /// - `n ≤ 20` → 30 whales, 1000 iterations
    /// - `n ≤ 50` → 40 whales, 1500 iterations
    /// - otherwise → 50 whales, 2000 iterations
    pub fn for_instance_size(num_cities: usize) -> Self {
        let (whales, iters) = if num_cities <= 20 {
            (30, 1000)
        } else if num_cities <= 50 {
            (40, 1500)
        } else {
            (50, 2000)
        };
        Self {
            num_whales: whales,
            max_iterations: iters,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> TspResult<()> {
        if self.num_whales == 0 {
            return Err(TspError::config("num_whales must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(TspError::config("max_iterations must be at least 1"));
        }
        if !(self.spiral_constant.is_finite() && self.spiral_constant > 0.0) {
            return Err(TspError::config(format!(
                "spiral constant b must be positive, got {}",
                self.spiral_constant
            )));
        }
        if !(self.a_max.is_finite() && self.a_max > 0.0) {
            return Err(TspError::config(format!(
                "a_max must be positive, got {}",
                self.a_max
            )));
        }
        Ok(())
    }
}
