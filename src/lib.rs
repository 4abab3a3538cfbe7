//! Parallel midpoint-rule estimation of pi
//!
//! Re-exports the workspace crates under a single name.

pub use midpoint_cli as cli;
pub use midpoint_core::{
    DEFAULT_STEP_COUNT, DEFAULT_THREAD_COUNT, IntegrationError, IntegrationParams, WorkRange,
    partition,
};
pub use midpoint_integrator::{
    Estimate, Integrator, SweepReport, SweepRun, estimate_pi, integrand, sum_range, sweep,
};
