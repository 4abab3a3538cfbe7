//! Core data model for the midpoint integrator
//!
//! Integration parameters, contiguous work ranges and the static block
//! partitioner shared by the integrator and the CLI.

use std::io;
use std::ops::Range;

/// Number of subintervals used when none is given
pub const DEFAULT_STEP_COUNT: i64 = 100_000_000;

/// Number of worker threads used when none is given
pub const DEFAULT_THREAD_COUNT: usize = 1;

/// Validated parameters for one integration run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrationParams {
    pub step_count: i64,
    pub thread_count: usize,
}

impl IntegrationParams {
    /// Validate raw step and thread counts
    ///
    /// # Errors
    ///
    /// Returns `IntegrationError::InvalidStepCount` if `step_count < 1` and
    /// `IntegrationError::InvalidThreadCount` if `thread_count < 1`
    pub fn new(step_count: i64, thread_count: i64) -> Result<Self, IntegrationError> {
        if step_count < 1 {
            return Err(IntegrationError::InvalidStepCount { value: step_count });
        }
        let thread_count = usize::try_from(thread_count)
            .ok()
            .filter(|&n| n >= 1)
            .ok_or(IntegrationError::InvalidThreadCount {
                value: thread_count,
            })?;

        Ok(Self {
            step_count,
            thread_count,
        })
    }

    /// Width of a single subinterval
    #[must_use]
    pub fn step(&self) -> f64 {
        1.0 / self.step_count as f64
    }

    #[must_use]
    pub fn partition(&self) -> Vec<WorkRange> {
        partition(self.step_count, self.thread_count)
    }

    /// True when some workers will receive an empty range
    #[must_use]
    pub fn is_oversubscribed(&self) -> bool {
        i64::try_from(self.thread_count).map_or(true, |t| t > self.step_count)
    }
}

impl Default for IntegrationParams {
    fn default() -> Self {
        Self {
            step_count: DEFAULT_STEP_COUNT,
            thread_count: DEFAULT_THREAD_COUNT,
        }
    }
}

/// Half-open interval `[start, end)` of subinterval indices owned by one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkRange {
    pub thread_id: usize,
    pub start: i64,
    pub end: i64,
}

impl WorkRange {
    #[must_use]
    pub const fn new(thread_id: usize, start: i64, end: i64) -> Self {
        Self {
            thread_id,
            start,
            end,
        }
    }

    /// Number of subintervals in this range
    #[must_use]
    pub const fn len(&self) -> i64 {
        if self.end > self.start {
            self.end - self.start
        } else {
            0
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn indices(&self) -> Range<i64> {
        self.start..self.end
    }
}

/// Split `[0, step_count)` into one contiguous block per thread
///
/// Every thread gets `step_count / thread_count` indices. The last thread's
/// range always ends at `step_count`, absorbing the division remainder.
/// Returns an empty vector when `thread_count` is zero.
#[must_use]
pub fn partition(step_count: i64, thread_count: usize) -> Vec<WorkRange> {
    if thread_count == 0 {
        return Vec::new();
    }
    let threads = i64::try_from(thread_count).unwrap_or(i64::MAX);
    let base = step_count / threads;
    let last = thread_count - 1;

    (0..thread_count)
        .map(|thread_id| {
            let t = thread_id as i64;
            let start = base * t;
            let end = if thread_id == last {
                step_count
            } else {
                base * (t + 1)
            };
            WorkRange::new(thread_id, start, end)
        })
        .collect()
}

/// Errors raised while validating parameters or running workers
#[derive(thiserror::Error, Debug)]
pub enum IntegrationError {
    #[error("midpoint: ERR_INVALID_STEPS: step count must be at least 1, got {value}")]
    InvalidStepCount { value: i64 },

    #[error("midpoint: ERR_INVALID_THREADS: thread count must be at least 1, got {value}")]
    InvalidThreadCount { value: i64 },

    #[error("midpoint: ERR_THREAD_SPAWN: failed to start worker {thread_id}")]
    ThreadSpawn {
        thread_id: usize,
        #[source]
        source: io::Error,
    },

    #[error("midpoint: ERR_WORKER_PANIC: worker {thread_id} panicked")]
    WorkerPanicked { thread_id: usize },
}

impl IntegrationError {
    /// Stable error code, as printed in the message
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidStepCount { .. } => "ERR_INVALID_STEPS",
            Self::InvalidThreadCount { .. } => "ERR_INVALID_THREADS",
            Self::ThreadSpawn { .. } => "ERR_THREAD_SPAWN",
            Self::WorkerPanicked { .. } => "ERR_WORKER_PANIC",
        }
    }
}
