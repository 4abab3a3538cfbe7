//! Parallel midpoint-rule integrator
//!
//! Estimates pi as the integral of 4/(1+x^2) over [0,1]. The index space is
//! split into one contiguous block per worker; each worker accumulates a
//! local sum and writes it once into its own slot, and the slots are reduced
//! in thread order after every worker has been joined.

use midpoint_core::{IntegrationError, IntegrationParams, WorkRange};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub mod sweep;

pub use sweep::{SweepReport, SweepRun, sweep};

/// The function being integrated
#[inline]
#[must_use]
pub fn integrand(x: f64) -> f64 {
    4.0 / (1.0 + x * x)
}

/// Midpoint sum of the integrand over one worker's range, not yet scaled by `step`
#[must_use]
pub fn sum_range(range: &WorkRange, step: f64) -> f64 {
    let mut local_sum = 0.0;
    for i in range.indices() {
        let x = (i as f64 + 0.5) * step;
        local_sum += integrand(x);
    }
    local_sum
}

/// Result of one integration run
#[derive(Debug, Clone)]
pub struct Estimate {
    /// Wall-clock time from worker launch through reduction
    pub elapsed: Duration,
    pub pi: f64,
    /// One entry per worker, indexed by thread id
    pub partial_sums: Vec<f64>,
}

impl Estimate {
    #[must_use]
    pub fn abs_error(&self) -> f64 {
        (self.pi - std::f64::consts::PI).abs()
    }
}

pub struct Integrator {
    params: IntegrationParams,
}

impl Integrator {
    #[must_use]
    pub const fn new(params: IntegrationParams) -> Self {
        Self { params }
    }

    #[must_use]
    pub const fn params(&self) -> &IntegrationParams {
        &self.params
    }

    /// Ranges the workers of this integrator will be given
    #[must_use]
    pub fn ranges(&self) -> Vec<WorkRange> {
        self.params.partition()
    }

    /// Run all workers to completion and reduce their partial sums
    ///
    /// # Errors
    ///
    /// Returns `IntegrationError::ThreadSpawn` if a worker thread cannot be
    /// created and `IntegrationError::WorkerPanicked` if a worker panics
    pub fn run(&self) -> Result<Estimate, IntegrationError> {
        let step = self.params.step();
        let ranges = self.ranges();

        if self.params.is_oversubscribed() {
            warn!(
                step_count = self.params.step_count,
                thread_count = self.params.thread_count,
                "more threads than steps, some workers get empty ranges"
            );
        }

        let mut partial_sums = vec![0.0_f64; ranges.len()];
        let started = Instant::now();

        thread::scope(|scope| -> Result<(), IntegrationError> {
            let mut workers = Vec::with_capacity(ranges.len());

            for (range, slot) in ranges.iter().zip(partial_sums.iter_mut()) {
                let handle = thread::Builder::new()
                    .name(format!("midpoint-worker-{}", range.thread_id))
                    .spawn_scoped(scope, move || {
                        let local_sum = sum_range(range, step);
                        *slot = local_sum;
                        debug!(
                            thread_id = range.thread_id,
                            start = range.start,
                            end = range.end,
                            local_sum,
                            "worker finished"
                        );
                    })
                    .map_err(|source| IntegrationError::ThreadSpawn {
                        thread_id: range.thread_id,
                        source,
                    })?;
                workers.push((range.thread_id, handle));
            }

            // Join every worker before reporting, so no panicked thread is left
            // for the scope to re-raise.
            let mut outcome: Result<(), IntegrationError> = Ok(());
            for (thread_id, handle) in workers {
                if handle.join().is_err() && outcome.is_ok() {
                    outcome = Err(IntegrationError::WorkerPanicked { thread_id });
                }
            }
            outcome
        })?;

        let total: f64 = partial_sums.iter().sum();
        let pi = total * step;
        let elapsed = started.elapsed();

        info!(
            step_count = self.params.step_count,
            thread_count = self.params.thread_count,
            elapsed_secs = elapsed.as_secs_f64(),
            pi,
            "integration complete"
        );

        Ok(Estimate {
            elapsed,
            pi,
            partial_sums,
        })
    }
}

/// Estimate pi with `thread_count` workers over `step_count` subintervals
///
/// # Errors
///
/// Returns `IntegrationError` if either count is below 1 or a worker fails
pub fn estimate_pi(step_count: i64, thread_count: i64) -> Result<(Duration, f64), IntegrationError> {
    let params = IntegrationParams::new(step_count, thread_count)?;
    let estimate = Integrator::new(params).run()?;
    Ok((estimate.elapsed, estimate.pi))
}
