//! E2E tests for thread sweeps and JSON reports

use midpoint_cli::run;
use std::fs;
use tempfile::NamedTempFile;

fn run_args(args: &[&str]) -> anyhow::Result<String> {
    let mut argv = vec!["midpoint"];
    argv.extend_from_slice(args);

    let mut stdout = Vec::new();
    run(argv, &mut stdout)?;
    Ok(String::from_utf8(stdout)?)
}

#[test]
fn test_sweep_prints_one_line_per_thread_count() {
    let stdout = run_args(&["50000", "--sweep-threads", "4"]).unwrap();

    let threads: Vec<usize> = stdout
        .lines()
        .map(|line| line.split(' ').next().unwrap().parse().unwrap())
        .collect();
    assert_eq!(threads, vec![1, 2, 3, 4]);

    let first_line: Vec<&str> = stdout.lines().next().unwrap().split(' ').collect();
    assert_eq!(first_line[3], "1");
    assert_eq!(first_line[4], "1");
}

#[test]
fn test_sweep_report_json() {
    let report = NamedTempFile::new().unwrap();
    let path = report.path().to_str().unwrap();

    run_args(&["40000", "--sweep-threads", "3", "--report", path]).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["step_count"], 40_000);

    let runs = json["runs"].as_array().unwrap();
    assert_eq!(runs.len(), 3);
    for (i, run) in runs.iter().enumerate() {
        assert_eq!(run["thread_count"], i + 1);
        assert!(run["abs_error"].as_f64().unwrap() < 1e-8);
        assert!(run["speedup"].as_f64().is_some());
        assert!(run["efficiency"].as_f64().is_some());
    }
}

#[test]
fn test_single_run_report_has_no_speedup() {
    let report = NamedTempFile::new().unwrap();
    let path = report.path().to_str().unwrap();

    let stdout = run_args(&["40000", "3", "--report", path]).unwrap();
    assert_eq!(stdout.lines().count(), 1);

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    let run = &json["runs"][0];
    assert_eq!(run["thread_count"], 3);
    assert!(run.get("speedup").is_none());
}

#[test]
fn test_sweep_rejects_zero_max_threads() {
    let err = run_args(&["1000", "--sweep-threads", "0"]).unwrap_err();
    assert!(format!("{err}").contains("ERR_INVALID_THREADS"));
}
