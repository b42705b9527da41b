//! SA execution loop.

use super::config::{CoolingSchedule, SaConfig};
use super::types::SaProblem;
use crate::error::SolveError;
use crate::registry::CancelHandle;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// Inner iterations between two cancellation checks.
const STOP_CHECK_INTERVAL: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Cancelled,
    TimedOut,
}

fn stop_requested(
    cancel: Option<&CancelHandle>,
    config: &SaConfig,
    started: Instant,
) -> Option<Stop> {
    if cancel.is_some_and(CancelHandle::is_cancelled) {
        Some(Stop::Cancelled)
    } else if config
        .time_limit
        .is_some_and(|limit| started.elapsed() >= limit)
    {
        Some(Stop::TimedOut)
    } else {
        None
    }
}

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Final temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Whether the wall-clock limit ended the run.
    pub timed_out: bool,

    /// Best cost sampled at regular intervals for history tracking.
    pub cost_history: Vec<f64>,
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization from a random initial solution.
    pub fn run<P: SaProblem>(
        problem: &P,
        config: &SaConfig,
    ) -> Result<SaResult<P::Solution>, SolveError> {
        Self::run_observed(problem, config, None, None, |_, _| {})
    }

    /// Runs SA with a warm start, a cancellation handle and an improvement observer.
    ///
    /// `on_improve` receives the starting solution once, then every new best
    /// solution in strictly improving cost order. Cancellation and the time
    /// limit are checked at every temperature step and every
    /// `STOP_CHECK_INTERVAL` inner iterations.
    pub fn run_observed<P, F>(
        problem: &P,
        config: &SaConfig,
        start: Option<P::Solution>,
        cancel: Option<&CancelHandle>,
        mut on_improve: F,
    ) -> Result<SaResult<P::Solution>, SolveError>
    where
        P: SaProblem,
        F: FnMut(&P::Solution, f64),
    {
        config.validate()?;

        let started = Instant::now();
        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random::<u64>));

        // Initialize
        let mut current = match start {
            Some(solution) => solution,
            None => problem.initial_solution(&mut rng),
        };
        let mut current_cost = problem.cost(&current);
        let mut best = current.clone();
        let mut best_cost = current_cost;
        on_improve(&best, best_cost);

        let mut temperature = config.initial_temperature;
        let mut total_iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut stop = None;

        let linear_max_steps = compute_linear_steps(config);

        // Cost history: sample every N iterations
        let history_interval = 100.max(config.iterations_per_temperature);
        let mut cost_history = vec![best_cost];

        let mut step = 0usize;

        while temperature > config.min_temperature {
            stop = stop_requested(cancel, config, started);
            if stop.is_some() {
                break;
            }

            let inner_iters = match config.cooling {
                CoolingSchedule::LundyMees { .. } => 1,
                _ => config.iterations_per_temperature,
            };

            for inner in 0..inner_iters {
                if config.max_iterations > 0 && total_iterations >= config.max_iterations {
                    break;
                }
                if inner > 0 && inner.is_multiple_of(STOP_CHECK_INTERVAL) {
                    stop = stop_requested(cancel, config, started);
                    if stop.is_some() {
                        break;
                    }
                }

                let neighbor = problem.neighbor(&current, &mut rng);
                let neighbor_cost = problem.cost(&neighbor);
                let delta = neighbor_cost - current_cost;

                // Metropolis acceptance criterion
                let accept = if delta < 0.0 {
                    improving_moves += 1;
                    true
                } else if temperature > 0.0 {
                    let probability = (-delta / temperature).exp();
                    rng.random_range(0.0..1.0) < probability
                } else {
                    false
                };

                if accept {
                    current = neighbor;
                    current_cost = neighbor_cost;
                    accepted_moves += 1;

                    if current_cost < best_cost {
                        best = current.clone();
                        best_cost = current_cost;
                        on_improve(&best, best_cost);
                    }
                }

                total_iterations += 1;

                if total_iterations.is_multiple_of(history_interval) {
                    cost_history.push(best_cost);
                }
            }

            if stop.is_some()
                || (config.max_iterations > 0 && total_iterations >= config.max_iterations)
            {
                break;
            }

            temperature = cool(temperature, config, step, linear_max_steps);
            step += 1;
        }

        let cancelled = stop == Some(Stop::Cancelled);
        let timed_out = stop == Some(Stop::TimedOut);

        if cost_history
            .last()
            .is_none_or(|&last| (last - best_cost).abs() > 1e-15)
        {
            cost_history.push(best_cost);
        }

        tracing::debug!(
            iterations = total_iterations,
            best_cost,
            cancelled,
            timed_out,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "simulated annealing run finished"
        );

        Ok(SaResult {
            best,
            best_cost,
            iterations: total_iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cancelled,
            timed_out,
            cost_history,
        })
    }
}

/// Apply the cooling schedule to compute the next temperature.
fn cool(temperature: f64, config: &SaConfig, step: usize, linear_max_steps: usize) -> f64 {
    match config.cooling {
        CoolingSchedule::Geometric { alpha } => temperature * alpha,

        CoolingSchedule::Linear => {
            if linear_max_steps == 0 {
                config.min_temperature
            } else {
                let t = config.initial_temperature
                    - (step + 1) as f64 * (config.initial_temperature - config.min_temperature)
                        / linear_max_steps as f64;
                t.max(config.min_temperature)
            }
        }

        CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
    }
}

/// Estimate the number of temperature steps for linear cooling.
fn compute_linear_steps(config: &SaConfig) -> usize {
    match config.cooling {
        CoolingSchedule::Linear => {
            if config.max_iterations > 0 && config.iterations_per_temperature > 0 {
                config.max_iterations / config.iterations_per_temperature
            } else {
                1000
            }
        }
        _ => 0,
    }
}
