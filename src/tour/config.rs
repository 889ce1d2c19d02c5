//! Tour solver configuration.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::sa::CoolingSchedule;

/// Configuration for [`solve`](super::solve).
///
/// The wall-clock `time_budget` is the only cancellation mechanism; the
/// run also ends once the temperature reaches
/// `initial_temperature * final_temperature_ratio` or `max_iterations` is
/// hit.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use shelf_tour::tour::TourConfig;
///
/// let config = TourConfig::default()
///     .with_time_budget(Duration::from_secs(10))
///     .with_seed(42)
///     .with_restarts(4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct TourConfig {
    /// Wall-clock budget for the whole solve, restarts included.
    pub time_budget: Duration,

    /// Random seed. Restart `k` uses `seed + k`.
    pub seed: Option<u64>,

    pub cooling: CoolingSchedule,

    /// Starting temperature. `None` estimates it from sampled moves.
    pub initial_temperature: Option<f64>,

    /// Temperature floor as a fraction of the starting temperature.
    pub final_temperature_ratio: f64,

    /// Moves per temperature level. `None` scales with the item count.
    pub iterations_per_temperature: Option<usize>,

    /// Maximum moves per restart. 0 = no limit.
    pub max_iterations: usize,

    /// Shuffle positions `1..n` for the starting tour; identity otherwise.
    pub shuffle_initial: bool,

    /// Independent annealing runs; the best one wins.
    pub restarts: usize,

    /// Run restarts on the rayon pool.
    pub parallel: bool,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(60),
            seed: None,
            cooling: CoolingSchedule::Geometric { alpha: 0.95 },
            initial_temperature: None,
            final_temperature_ratio: 1e-4,
            iterations_per_temperature: None,
            max_iterations: 0,
            shuffle_initial: true,
            restarts: 1,
            parallel: true,
        }
    }
}

impl TourConfig {
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = Some(t);
        self
    }

    pub fn with_final_temperature_ratio(mut self, ratio: f64) -> Self {
        self.final_temperature_ratio = ratio;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = Some(n);
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_shuffle_initial(mut self, shuffle: bool) -> Self {
        self.shuffle_initial = shuffle;
        self
    }

    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Moves per temperature level for a tour over `n` items.
    pub(crate) fn inner_iterations(&self, n: usize) -> usize {
        self.iterations_per_temperature
            .unwrap_or_else(|| (10 * n).clamp(100, 20_000))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.restarts == 0 {
            return Err(Error::invalid_input("restarts must be at least 1"));
        }
        if !(self.final_temperature_ratio > 0.0 && self.final_temperature_ratio < 1.0) {
            return Err(Error::invalid_input(format!(
                "final_temperature_ratio must be in (0, 1), got {}",
                self.final_temperature_ratio
            )));
        }
        if let Some(t) = self.initial_temperature {
            if !(t > 0.0) || !t.is_finite() {
                return Err(Error::invalid_input(format!(
                    "initial_temperature must be positive and finite, got {t}"
                )));
            }
        }
        if self.iterations_per_temperature == Some(0) {
            return Err(Error::invalid_input(
                "iterations_per_temperature must be at least 1",
            ));
        }
        Ok(())
    }
}
