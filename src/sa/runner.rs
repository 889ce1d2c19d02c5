//! SA execution loop.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::config::{CoolingSchedule, SaConfig};
use super::types::SaProblem;
use crate::error::Result;

/// Iterations between wall-clock checks.
const DEADLINE_CHECK_INTERVAL: usize = 32;

/// Why an annealing run ended. None of these is a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The wall-clock budget ran out.
    TimeBudget,
    /// Temperature reached the configured floor.
    TemperatureFloor,
    /// `max_iterations` was reached.
    IterationLimit,
}

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution seen during the run.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Cost of the starting solution.
    pub initial_cost: f64,

    /// Total number of neighbor evaluations.
    pub iterations: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    pub stop_reason: StopReason,

    /// Best cost sampled at regular intervals.
    pub cost_history: Vec<f64>,
}

/// Executes the Simulated Annealing algorithm.
#[derive(Debug)]
pub struct SaRunner;

impl SaRunner {
    /// Anneals `problem` from a fresh starting solution.
    ///
    /// A budget too large to turn into a deadline behaves like no budget.
    /// Seeded runs are reproducible as long as they end on the temperature
    /// floor or iteration cap rather than the time budget.
    pub fn run<P: SaProblem>(problem: &P, config: &SaConfig) -> Result<SaResult<P::Solution>> {
        config.validate()?;

        let deadline = config
            .time_budget
            .and_then(|budget| Instant::now().checked_add(budget));
        let mut rng = create_rng(config.seed);

        let mut current = problem.initial_solution(&mut rng);
        let mut current_cost = problem.cost(&current);
        let initial_cost = current_cost;
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = config.initial_temperature;
        let mut total_iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut stop_reason = StopReason::TemperatureFloor;

        let linear_max_steps = compute_linear_steps(config);

        let history_interval = 100.max(config.iterations_per_temperature);
        let mut cost_history = vec![best_cost];

        let mut step = 0usize;

        'outer: while temperature > config.min_temperature {
            for _ in 0..config.iterations_per_temperature {
                if config.max_iterations > 0 && total_iterations >= config.max_iterations {
                    stop_reason = StopReason::IterationLimit;
                    break 'outer;
                }
                if total_iterations % DEADLINE_CHECK_INTERVAL == 0 {
                    if let Some(deadline) = deadline {
                        if Instant::now() >= deadline {
                            stop_reason = StopReason::TimeBudget;
                            break 'outer;
                        }
                    }
                }

                let (neighbor, neighbor_cost) =
                    problem.neighbor_with_cost(&current, current_cost, &mut rng);
                let delta = neighbor_cost - current_cost;

                // Metropolis acceptance criterion
                let accept = if delta < 0.0 {
                    improving_moves += 1;
                    true
                } else {
                    let probability = (-delta / temperature).exp();
                    rng.random_range(0.0..1.0) < probability
                };

                if accept {
                    current = neighbor;
                    current_cost = neighbor_cost;
                    accepted_moves += 1;

                    if current_cost < best_cost {
                        best = current.clone();
                        best_cost = current_cost;
                    }
                }

                total_iterations += 1;

                if total_iterations % history_interval == 0 {
                    cost_history.push(best_cost);
                }
            }

            temperature = cool(temperature, config, step, linear_max_steps);
            step += 1;
        }

        if cost_history
            .last()
            .is_none_or(|&last| (last - best_cost).abs() > 1e-15)
        {
            cost_history.push(best_cost);
        }

        log::debug!(
            "annealing stopped ({stop_reason:?}) after {total_iterations} iterations: \
             cost {initial_cost:.4} -> {best_cost:.4}, T={temperature:.3e}, accepted={accepted_moves}"
        );

        Ok(SaResult {
            best,
            best_cost,
            initial_cost,
            iterations: total_iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            stop_reason,
            cost_history,
        })
    }
}

/// Seeded runs are reproducible; unseeded runs draw a seed from the
/// thread-local generator.
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.unwrap_or_else(rand::random))
}

/// Temperature for the next level.
fn cool(temperature: f64, config: &SaConfig, step: usize, linear_max_steps: usize) -> f64 {
    match config.cooling {
        CoolingSchedule::Geometric { alpha } => temperature * alpha,

        CoolingSchedule::Linear => {
            let t = config.initial_temperature
                - (step + 1) as f64 * (config.initial_temperature - config.min_temperature)
                    / linear_max_steps as f64;
            t.max(config.min_temperature)
        }
    }
}

/// Levels a linear schedule spreads its descent over.
fn compute_linear_steps(config: &SaConfig) -> usize {
    match (config.cooling, config.max_iterations) {
        (CoolingSchedule::Linear, 0) => 1000,
        (CoolingSchedule::Linear, cap) => (cap / config.iterations_per_temperature).max(1),
        _ => 0,
    }
}
