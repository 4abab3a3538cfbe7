//! Midpoint CLI binary
//!
//! Prints `<elapsed_seconds> <pi_estimate>` on stdout. Logs go to stderr.

use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let matches = midpoint_cli::command().get_matches();
    let mut stdout = io::stdout().lock();

    if let Err(e) = midpoint_cli::execute(&matches, &mut stdout) {
        eprintln!("{e:#}");
        process::exit(1);
    }
}
