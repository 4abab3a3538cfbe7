//! Midpoint CLI
//!
//! Command-line surface for the parallel pi integrator. The binary is a thin
//! wrapper around [`execute`]; [`run`] drives the same path from an argument
//! list so tests can capture stdout in memory.

use anyhow::Context;
use clap::{Arg, ArgMatches, Command, value_parser};
use midpoint_core::{DEFAULT_STEP_COUNT, DEFAULT_THREAD_COUNT, IntegrationParams};
use midpoint_integrator::{Integrator, SweepReport, sweep};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod output;

/// Options resolved from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub step_count: i64,
    pub thread_count: i64,
    pub sweep_threads: Option<i64>,
    pub report: Option<PathBuf>,
}

impl CliOptions {
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            step_count: matches
                .get_one::<i64>("steps")
                .copied()
                .unwrap_or(DEFAULT_STEP_COUNT),
            thread_count: matches
                .get_one::<i64>("threads")
                .copied()
                .unwrap_or(DEFAULT_THREAD_COUNT as i64),
            sweep_threads: matches.get_one::<i64>("sweep-threads").copied(),
            report: matches.get_one::<PathBuf>("report").cloned(),
        }
    }
}

#[must_use]
pub fn command() -> Command {
    Command::new("midpoint")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Estimate pi by parallel midpoint-rule integration of 4/(1+x^2)")
        .arg(
            Arg::new("steps")
                .value_name("STEP_COUNT")
                .help("Number of subintervals [default: 100000000]")
                .index(1)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64)),
        )
        .arg(
            Arg::new("threads")
                .value_name("THREAD_COUNT")
                .help("Number of worker threads [default: 1]")
                .index(2)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64)),
        )
        .arg(
            Arg::new("sweep-threads")
                .long("sweep-threads")
                .value_name("MAX")
                .help("Run once for every thread count from 1 to MAX")
                .num_args(1)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64)),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .value_name("FILE")
                .help("Write the measured runs to FILE as JSON")
                .num_args(1)
                .value_parser(value_parser!(PathBuf)),
        )
}

/// Execute already-parsed arguments, writing results to `out`
///
/// # Errors
///
/// Returns an error if the parameters are invalid, a worker fails, or
/// output cannot be written
pub fn execute<W: Write>(matches: &ArgMatches, out: &mut W) -> anyhow::Result<()> {
    let options = CliOptions::from_matches(matches);
    debug!(?options, "parsed arguments");

    let report = match options.sweep_threads {
        Some(max_threads) => run_sweep(options.step_count, max_threads, out)?,
        None => run_single(options.step_count, options.thread_count, out)?,
    };
    out.flush()?;

    if let Some(path) = &options.report {
        write_report(&report, path)?;
    }
    Ok(())
}

/// Parse `args` (program name first) and execute them
///
/// # Errors
///
/// Returns an error on invalid arguments or any failure from [`execute`]
pub fn run<I, T, W>(args: I, out: &mut W) -> anyhow::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let matches = command().try_get_matches_from(args)?;
    execute(&matches, out)
}

fn run_single<W: Write>(
    step_count: i64,
    thread_count: i64,
    out: &mut W,
) -> anyhow::Result<SweepReport> {
    let params = IntegrationParams::new(step_count, thread_count)?;
    let estimate = Integrator::new(params).run()?;

    writeln!(
        out,
        "{}",
        output::estimate_line(estimate.elapsed.as_secs_f64(), estimate.pi)
    )?;

    let mut report = SweepReport::new(step_count);
    report.record(params.thread_count, &estimate);
    Ok(report)
}

fn run_sweep<W: Write>(
    step_count: i64,
    max_threads: i64,
    out: &mut W,
) -> anyhow::Result<SweepReport> {
    let report = sweep(step_count, max_threads)?;

    for run in &report.runs {
        writeln!(
            out,
            "{}",
            output::sweep_line(
                run.thread_count,
                run.elapsed_seconds,
                run.pi_estimate,
                run.speedup.unwrap_or(f64::NAN),
                run.efficiency.unwrap_or(f64::NAN),
            )
        )?;
    }
    Ok(report)
}

fn write_report(report: &SweepReport, path: &Path) -> anyhow::Result<()> {
    let json = report
        .to_json_pretty()
        .context("failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    debug!(path = %path.display(), runs = report.runs.len(), "report written");
    Ok(())
}
