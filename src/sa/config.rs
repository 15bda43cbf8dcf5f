//! SA configuration.

use crate::error::{TspError, TspResult};

/// Configuration for Simulated Annealing.
///
/// Cooling is geometric: `T_{k+1} = cooling_rate * T_k`, one neighbor
/// evaluation per temperature step.
///
/// # Examples
///
/// ```
/// use u_tsp::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(5000.0)
///     .with_cooling_rate(0.99)
///     .with_min_temperature(0.5)
///     .with_max_iterations(20_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Starting temperature. Higher values accept more worsening moves early.
    pub initial_temperature: f64,

    /// Geometric cooling factor in (0, 1). Higher = slower cooling.
    pub cooling_rate: f64,

    /// The run stops once the temperature drops to this value.
    pub min_temperature: f64,

    /// Hard iteration budget.
    pub max_iterations: usize,

    /// Random seed for reproducibility. `None` draws a fresh seed per solve.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 10_000.0,
            cooling_rate: 0.995,
            min_temperature: 1.0,
            max_iterations: 10_000,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset scaled to the number of cities.
    ///
    /// - `n ≤ 20` → T₀ = 10 000, rate 0.995, 10 000 iterations
    /// - `n ≤ 50` → T₀ = 15 000, rate 0.997, 20 000 iterations
    /// - otherwise → T₀ = 20 000, rate 0.998, 30 000 iterations
    pub fn for_instance_size(num_cities: usize) -> Self {
        let (t0, rate, iters) = if num_cities <= 20 {
            (10_000.0, 0.995, 10_000)
        } else if num_cities <= 50 {
            (15_000.0, 0.997, 20_000)
        } else {
            (20_000.0, 0.998, 30_000)
        };
        Self {
            initial_temperature: t0,
            cooling_rate: rate,
            max_iterations: iters,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> TspResult<()> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(TspError::config(format!(
                "initial_temperature must be positive, got {}",
                self.initial_temperature
            )));
        }
        if self.cooling_rate.is_nan() || self.cooling_rate <= 0.0 || self.cooling_rate >= 1.0 {
            return Err(TspError::config(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if self.min_temperature.is_nan() || self.min_temperature <= 0.0 {
            return Err(TspError::config(format!(
                "min_temperature must be positive, got {}",
                self.min_temperature
            )));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(TspError::config(format!(
                "min_temperature ({}) must be less than initial_temperature ({})",
                self.min_temperature, self.initial_temperature
            )));
        }
        if self.max_iterations == 0 {
            return Err(TspError::config("max_iterations must be at least 1"));
        }
        Ok(())
    }
}
