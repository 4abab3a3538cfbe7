//! Thread-count sweeps
//!
//! Runs the integrator once per thread count and records timing, accuracy,
//! speedup and efficiency relative to the single-thread run.

use crate::{Estimate, Integrator};
use midpoint_core::{IntegrationError, IntegrationParams};
use serde::Serialize;
use tracing::info;

/// One measured run inside a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRun {
    pub thread_count: usize,
    pub elapsed_seconds: f64,
    pub pi_estimate: f64,
    pub abs_error: f64,
    /// `t1 / tn`, present only when the report has a single-thread baseline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speedup: Option<f64>,
    /// `speedup / n`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub step_count: i64,
    pub runs: Vec<SweepRun>,
}

impl SweepReport {
    #[must_use]
    pub const fn new(step_count: i64) -> Self {
        Self {
            step_count,
            runs: Vec::new(),
        }
    }

    /// Elapsed seconds of the single-thread run, if one was recorded
    #[must_use]
    pub fn baseline_seconds(&self) -> Option<f64> {
        self.runs
            .iter()
            .find(|run| run.thread_count == 1)
            .map(|run| run.elapsed_seconds)
    }

    /// Record an estimate produced with `thread_count` workers
    pub fn record(&mut self, thread_count: usize, estimate: &Estimate) {
        let elapsed_seconds = estimate.elapsed.as_secs_f64();
        let baseline = if thread_count == 1 {
            Some(elapsed_seconds)
        } else {
            self.baseline_seconds()
        };

        let speedup = baseline.map(|t1| {
            if elapsed_seconds > 0.0 {
                t1 / elapsed_seconds
            } else {
                1.0
            }
        });
        let efficiency = speedup.map(|s| s / thread_count as f64);

        self.runs.push(SweepRun {
            thread_count,
            elapsed_seconds,
            pi_estimate: estimate.pi,
            abs_error: estimate.abs_error(),
            speedup,
            efficiency,
        });
    }

    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Run the integrator for every thread count in `1..=max_threads`
///
/// # Errors
///
/// Returns `IntegrationError` if `step_count` or `max_threads` is below 1,
/// or if any run fails
pub fn sweep(step_count: i64, max_threads: i64) -> Result<SweepReport, IntegrationError> {
    let limit = IntegrationParams::new(step_count, max_threads)?;
    let mut report = SweepReport::new(step_count);

    for thread_count in 1..=limit.thread_count {
        let params = IntegrationParams {
            step_count,
            thread_count,
        };
        let estimate = Integrator::new(params).run()?;
        report.record(thread_count, &estimate);
    }

    info!(
        step_count,
        max_threads = limit.thread_count,
        "thread sweep complete"
    );
    Ok(report)
}
