//! Annealing tour solver.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use super::config::TourConfig;
use super::problem::{Permutation, TourProblem};
use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::sa::{SaConfig, SaProblem, SaRunner, StopReason};

/// Moves sampled when estimating the starting temperature.
const TEMPERATURE_SAMPLES: usize = 200;

/// Salt so the temperature sampler does not replay the run's own moves.
const SAMPLER_SALT: u64 = 0x5eed_7e3b;

/// A solved tour.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    /// Visiting order; position 0 comes first.
    pub permutation: Permutation,

    /// Closed-cycle length of `permutation`.
    pub length: f64,

    /// Length of the starting permutation of the winning run.
    pub initial_length: f64,

    /// Moves evaluated by the winning run.
    pub iterations: usize,

    /// `None` when the tour was trivial and no search ran.
    pub stop_reason: Option<StopReason>,
}

/// Solves an open-path tour over `matrix` with simulated annealing.
///
/// Always yields a tour once the input is valid: running out of time is
/// normal termination and returns the best permutation seen so far. With a
/// zero budget the starting permutation comes back unchanged.
///
/// # Errors
///
/// [`Error::DegenerateInput`] when the matrix has fewer than 2 positions,
/// [`Error::InvalidInput`] for a bad configuration.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use shelf_tour::distance::build;
/// use shelf_tour::tour::{solve, TourConfig};
///
/// let vectors = vec![vec![0.0], vec![3.0], vec![1.0], vec![2.0], vec![4.0]];
/// let matrix = build(&vectors, true).unwrap();
/// let config = TourConfig::default()
///     .with_time_budget(Duration::from_secs(5))
///     .with_seed(1);
/// let tour = solve(&matrix, &config).unwrap();
/// assert_eq!(tour.permutation[0], 0);
/// assert!(tour.length <= tour.initial_length + 1e-9);
/// ```
pub fn solve(matrix: &DistanceMatrix, config: &TourConfig) -> Result<Tour> {
    config.validate()?;

    let n = matrix.size();
    if n < 2 {
        return Err(Error::degenerate_input(format!(
            "a tour needs at least 2 items, got {n}"
        )));
    }
    if n <= 3 {
        // Every ordering of 2 or 3 positions is the same cycle up to
        // direction.
        let permutation: Permutation = (0..n).collect();
        let length = matrix.cycle_length(&permutation);
        return Ok(Tour {
            permutation,
            length,
            initial_length: length,
            iterations: 0,
            stop_reason: None,
        });
    }

    let started = Instant::now();
    // One deadline for the whole solve. `None` when the budget is too large
    // to represent, in which case nothing is ever cut short.
    let deadline = started.checked_add(config.time_budget);
    let parallel = config.parallel && config.restarts > 1;
    let problem = TourProblem::new(matrix, config.shuffle_initial);

    // Parallel restarts race the shared deadline. Sequential restart `k`
    // gets an even share of whatever time the earlier ones left.
    let budget_for = |k: usize| -> Duration {
        let Some(deadline) = deadline else {
            return config.time_budget;
        };
        let remaining = deadline.saturating_duration_since(Instant::now());
        if parallel {
            return remaining;
        }
        u32::try_from(config.restarts - k).map_or(remaining, |left| remaining / left)
    };

    let run_restart = |k: usize| -> Result<Tour> {
        let seed = config.seed.map(|s| s.wrapping_add(k as u64));
        let sa_config = anneal_config(&problem, config, seed, n).with_time_budget(budget_for(k));
        let result = SaRunner::run(&problem, &sa_config)?;
        Ok(Tour {
            length: matrix.cycle_length(&result.best),
            permutation: result.best,
            initial_length: result.initial_cost,
            iterations: result.iterations,
            stop_reason: Some(result.stop_reason),
        })
    };

    let tours: Vec<Tour> = if parallel {
        (0..config.restarts)
            .into_par_iter()
            .map(run_restart)
            .collect::<Result<_>>()?
    } else {
        (0..config.restarts)
            .map(run_restart)
            .collect::<Result<_>>()?
    };

    // First minimum wins, so ties go to the lowest restart index.
    let best = tours
        .into_iter()
        .min_by(|a, b| a.length.total_cmp(&b.length))
        .ok_or_else(|| Error::invalid_input("no restarts were run"))?;

    log::debug!(
        "solved {n}-item tour in {:.2?}: length {:.4} (from {:.4}), {} iterations, {:?}",
        started.elapsed(),
        best.length,
        best.initial_length,
        best.iterations,
        best.stop_reason
    );

    Ok(best)
}

/// Builds the engine configuration for one restart.
fn anneal_config(
    problem: &TourProblem<'_>,
    config: &TourConfig,
    seed: Option<u64>,
    n: usize,
) -> SaConfig {
    let t0 = config
        .initial_temperature
        .unwrap_or_else(|| estimate_initial_temperature(problem, seed));

    let mut sa = SaConfig::default()
        .with_initial_temperature(t0)
        .with_min_temperature(t0 * config.final_temperature_ratio)
        .with_cooling(config.cooling)
        .with_iterations_per_temperature(config.inner_iterations(n))
        .with_max_iterations(config.max_iterations);
    if let Some(seed) = seed {
        sa = sa.with_seed(seed);
    }
    sa
}

/// Picks a starting temperature at which the average uphill move from a
/// starting permutation is accepted with probability 1/2.
///
/// Falls back to 1.0 when no sampled move is uphill (for example when all
/// distances are zero).
pub fn estimate_initial_temperature(problem: &TourProblem<'_>, seed: Option<u64>) -> f64 {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.unwrap_or_else(rand::random) ^ SAMPLER_SALT);
    let perm = problem.initial_solution(&mut rng);

    let (sum, count) = (0..TEMPERATURE_SAMPLES)
        .map(|_| problem.random_move(&perm, &mut rng).1)
        .filter(|&delta| delta > 0.0)
        .fold((0.0, 0usize), |(sum, count), delta| (sum + delta, count + 1));

    if count == 0 {
        return 1.0;
    }
    let mean_uphill = sum / count as f64;
    mean_uphill / std::f64::consts::LN_2
}
