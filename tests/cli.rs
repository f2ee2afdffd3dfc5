use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const REPORT_FILE: &str = "monitoring_report.txt";

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jobwatch"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to spawn jobwatch")
}

fn workspace_with_log(contents: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("jobs.log"), contents).unwrap();
    dir
}

#[test]
fn completed_job_goes_to_console_and_file() {
    let dir = workspace_with_log("09:00:00,Backup,START,123\n09:03:00,Backup,END,123\n");
    let out = run_in(dir.path(), &["jobs.log"]);

    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Total jobs completed: 1"));
    assert!(stdout.contains("Duration: 3.00 minutes (180 seconds)"));
    assert!(stdout.contains("Status: OK"));
    assert!(stdout.contains("Report saved to monitoring_report.txt"));

    let file = fs::read_to_string(dir.path().join(REPORT_FILE)).unwrap();
    assert!(file.contains("Backup (PID: 123):"));
    assert!(file.contains("Status: OK"));
    assert!(!file.contains("Report saved"));
}

#[test]
fn warning_and_error_labels() {
    let dir = workspace_with_log(
        "09:00:00,Backup,START,123\n09:07:00,Backup,END,123\n\
         10:00:00,Index,START,9\n10:20:00,Index,END,9\n",
    );
    let out = run_in(dir.path(), &["jobs.log"]);

    assert!(out.status.success());
    let file = fs::read_to_string(dir.path().join(REPORT_FILE)).unwrap();
    assert!(file.contains("Duration: 7.00 minutes (420 seconds)\n  Status: WARNING"));
    assert!(file.contains("Duration: 20.00 minutes (1200 seconds)\n  Status: ERROR"));
}

#[test]
fn start_without_end_is_incomplete() {
    let dir = workspace_with_log("09:00:00,Backup,START,123\n");
    let out = run_in(dir.path(), &["jobs.log"]);

    assert!(out.status.success());
    let file = fs::read_to_string(dir.path().join(REPORT_FILE)).unwrap();
    assert!(file.contains("Total jobs completed: 0"));
    assert!(file.contains("INCOMPLETE JOBS:"));
    assert!(file.contains("Backup (PID: 123)\n  Started at: 09:00:00"));
}

#[test]
fn malformed_timestamp_aborts_without_report() {
    let dir = workspace_with_log("25:99:00,Backup,START,123\n");
    let out = run_in(dir.path(), &["jobs.log"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("invalid timestamp '25:99:00'"));
    assert!(!dir.path().join(REPORT_FILE).exists());
}

#[test]
fn missing_log_file_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_in(dir.path(), &["absent.log"]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("File 'absent.log' not found."));
    assert!(!dir.path().join(REPORT_FILE).exists());
}

#[test]
fn missing_argument_prints_usage_and_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_in(dir.path(), &[]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("Usage"));
}

#[test]
fn output_flag_and_json_format() {
    let dir = workspace_with_log("09:00:00,Backup,START,1\n09:01:00,Backup,END,1\n");
    let out = run_in(dir.path(), &["jobs.log", "--output", "r.json", "--format", "json"]);

    assert!(out.status.success());
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("r.json")).unwrap()).unwrap();
    assert_eq!(json["total_completed"], 1);
    assert_eq!(json["completed"][0]["duration_seconds"], 60);
    assert!(!dir.path().join(REPORT_FILE).exists());

    let stdout: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(stdout, json);
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("Report saved to r.json"));
}

#[test]
fn unwritable_report_path_prints_nothing_to_stdout() {
    let dir = workspace_with_log("09:00:00,Backup,START,1\n09:01:00,Backup,END,1\n");
    let out = run_in(dir.path(), &["jobs.log", "--output", "missing/report.txt"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("Failed to write report to 'missing/report.txt'"));
}

#[test]
fn quoted_description_with_comma_is_reported() {
    let dir = workspace_with_log(
        "09:00:00,\"Backup, daily\",START,1\n09:02:00,\"Backup, daily\",END,1\n",
    );
    let out = run_in(dir.path(), &["jobs.log"]);

    assert!(out.status.success());
    let file = fs::read_to_string(dir.path().join(REPORT_FILE)).unwrap();
    assert!(file.contains("Backup, daily (PID: 1):"));
    assert!(file.contains("(120 seconds)"));
}

#[test]
fn leap_second_aborts_without_report() {
    let dir = workspace_with_log("23:59:60,Backup,START,1\n00:00:10,Backup,END,1\n");
    let out = run_in(dir.path(), &["jobs.log"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(!dir.path().join(REPORT_FILE).exists());
}

#[test]
fn config_file_in_working_directory_sets_thresholds() {
    let dir = workspace_with_log("09:00:00,Backup,START,1\n09:02:00,Backup,END,1\n");
    fs::write(
        dir.path().join("jobwatch.toml"),
        "warning_threshold_secs = 30\nerror_threshold_secs = 60\n",
    )
    .unwrap();
    let out = run_in(dir.path(), &["jobs.log"]);

    assert!(out.status.success());
    let file = fs::read_to_string(dir.path().join(REPORT_FILE)).unwrap();
    assert!(file.contains("Status: ERROR"));
}
