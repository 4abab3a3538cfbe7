//! Number formatting for stdout
//!
//! Downstream tooling splits each line on whitespace and parses the fields
//! as floats, so output stays in plain fixed notation.

/// Significant digits printed for elapsed seconds
pub const ELAPSED_DIGITS: usize = 6;

/// Significant digits printed for the pi estimate
pub const ESTIMATE_DIGITS: usize = 15;

/// Format `value` with `digits` significant digits, trailing zeros trimmed
#[must_use]
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }

    let magnitude = value.abs().log10().floor() as i32;
    let decimals = usize::try_from(digits as i32 - 1 - magnitude).unwrap_or(0);
    let fixed = format!("{value:.decimals$}");

    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

/// `<elapsed_seconds> <pi_estimate>`
#[must_use]
pub fn estimate_line(elapsed_seconds: f64, pi: f64) -> String {
    format!(
        "{} {}",
        format_significant(elapsed_seconds, ELAPSED_DIGITS),
        format_significant(pi, ESTIMATE_DIGITS)
    )
}

/// `<threads> <elapsed_seconds> <pi_estimate> <speedup> <efficiency>`
#[must_use]
pub fn sweep_line(
    thread_count: usize,
    elapsed_seconds: f64,
    pi: f64,
    speedup: f64,
    efficiency: f64,
) -> String {
    format!(
        "{thread_count} {} {} {}",
        estimate_line(elapsed_seconds, pi),
        format_significant(speedup, ELAPSED_DIGITS),
        format_significant(efficiency, ELAPSED_DIGITS)
    )
}
