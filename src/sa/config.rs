//! Annealing parameters.

use std::time::Duration;

use crate::error::{Error, Result};

/// How the temperature falls between levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoolingSchedule {
    /// `T ← alpha · T` after every level.
    Geometric {
        /// In (0, 1); closer to 1 cools more slowly.
        alpha: f64,
    },

    /// Equal decrements from the starting temperature down to the floor.
    ///
    /// The number of levels is `max_iterations / iterations_per_temperature`
    /// under an iteration cap, 1000 otherwise.
    Linear,
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.95 }
    }
}

/// Parameters for a single [`SaRunner`](super::SaRunner) run.
///
/// A run ends on the first of: the wall-clock `time_budget` running out,
/// the temperature reaching `min_temperature`, or `max_iterations` moves.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use shelf_tour::sa::{SaConfig, CoolingSchedule};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(40.0)
///     .with_min_temperature(0.004)
///     .with_cooling(CoolingSchedule::Linear)
///     .with_max_iterations(100_000)
///     .with_time_budget(Duration::from_secs(5));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SaConfig {
    pub initial_temperature: f64,

    /// Floor; the run stops once the temperature falls to it.
    pub min_temperature: f64,

    pub cooling: CoolingSchedule,

    /// Moves tried at each temperature level.
    pub iterations_per_temperature: usize,

    /// Cap on total moves. 0 = no cap.
    pub max_iterations: usize,

    /// `None`, or a budget too large to represent as a deadline, means the
    /// run is never cut short by the clock.
    pub time_budget: Option<Duration>,

    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            min_temperature: 1e-6,
            cooling: CoolingSchedule::default(),
            iterations_per_temperature: 100,
            max_iterations: 0,
            time_budget: None,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let t0 = self.initial_temperature;
        if !(t0.is_finite() && t0 > 0.0) {
            return Err(Error::invalid_input(format!(
                "initial_temperature must be positive and finite, got {t0}"
            )));
        }
        if !(self.min_temperature > 0.0 && self.min_temperature < t0) {
            return Err(Error::invalid_input(format!(
                "min_temperature must lie in (0, {t0}), got {}",
                self.min_temperature
            )));
        }
        if self.iterations_per_temperature == 0 {
            return Err(Error::invalid_input(
                "iterations_per_temperature must be at least 1",
            ));
        }
        if let CoolingSchedule::Geometric { alpha } = self.cooling {
            if !(alpha > 0.0 && alpha < 1.0) {
                return Err(Error::invalid_input(format!(
                    "geometric alpha must be in (0, 1), got {alpha}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = SaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cooling, CoolingSchedule::Geometric { alpha: 0.95 });
        assert!(config.time_budget.is_none());
    }

    #[test]
    fn test_temperatures_must_be_ordered_and_positive() {
        for (t0, floor) in [(-1.0, 1e-3), (f64::NAN, 1e-3), (f64::INFINITY, 1e-3), (10.0, 20.0), (10.0, 0.0)] {
            let config = SaConfig::default()
                .with_initial_temperature(t0)
                .with_min_temperature(floor);
            assert!(
                matches!(config.validate(), Err(Error::InvalidInput(_))),
                "t0={t0} floor={floor}"
            );
        }
    }

    #[test]
    fn test_alpha_outside_unit_interval() {
        for alpha in [0.0, 1.0, 1.5, f64::NAN] {
            let config = SaConfig::default().with_cooling(CoolingSchedule::Geometric { alpha });
            assert!(config.validate().is_err(), "alpha={alpha}");
        }
    }

    #[test]
    fn test_linear_needs_no_parameters() {
        let config = SaConfig::default().with_cooling(CoolingSchedule::Linear);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_moves_per_level() {
        let config = SaConfig::default().with_iterations_per_temperature(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unbounded_budget_is_valid() {
        let config = SaConfig::default().with_time_budget(Duration::MAX);
        assert!(config.validate().is_ok());
    }
}
