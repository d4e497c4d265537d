//! Basic CLI E2E tests.
//!
//! Tests run the built `dayplan` binary against a throwaway data directory.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_dayplan"))
        .env("DAYPLAN_DATA_DIR", data_dir)
        .env_remove("DAYPLAN_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(data_dir, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_task_add_and_list() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["task", "add", "Essay", "--due", "2030-01-10", "--minutes", "120", "--difficulty", "9"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Task created:"));

    let tasks = run_json(dir.path(), &["task", "list"]);
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Essay");
    assert_eq!(tasks[0]["difficulty"], 3);
    assert_eq!(tasks[0]["status"], "active");
}

#[test]
fn test_task_add_rejects_bad_date() {
    let dir = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["task", "add", "Essay", "--due", "soon"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
    assert!(stderr.contains("soon"));
}

#[test]
fn test_plan_show_and_apply() {
    let dir = TempDir::new().unwrap();
    let date = "2030-01-01";
    run_cli(dir.path(), &["task", "add", "Reading", "--due", "2030-01-01", "--minutes", "40"]);
    run_cli(dir.path(), &["task", "add", "Project", "--due", "2030-01-20", "--minutes", "600"]);

    let plan = run_json(dir.path(), &["plan", "show", "--date", date, "--json"]);
    assert_eq!(plan["allocations"].as_array().unwrap().len(), 0);
    assert_eq!(plan["messages"].as_array().unwrap().len(), 1);

    let (code, _, _) = run_cli(
        dir.path(),
        &["daily", "set", "--available", "120", "--buffer", "20", "--date", date],
    );
    assert_eq!(code, 0);

    let plan = run_json(dir.path(), &["plan", "show", "--date", date, "--json"]);
    assert_eq!(plan["usable_minutes"], 100);
    assert_eq!(plan["total_planned_minutes"], 100);
    let allocations = plan["allocations"].as_array().unwrap();
    assert_eq!(allocations.len(), 2);
    assert_eq!(allocations[0]["title"], "Reading");

    let deltas = run_json(
        dir.path(),
        &["plan", "apply", "--date", date, "--multiplier", "1.0", "--json"],
    );
    assert_eq!(deltas.as_array().unwrap().len(), 2);

    let all = run_json(dir.path(), &["task", "list", "--all"]);
    let reading = all
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["title"] == "Reading")
        .unwrap();
    assert_eq!(reading["remaining_minutes"], 0);
    assert_eq!(reading["status"], "done");
}

#[test]
fn test_plan_apply_rejects_negative_multiplier() {
    let dir = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(
        dir.path(),
        &["plan", "apply", "--date", "2030-01-01", "--multiplier", "-1"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("multiplier"));
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "planner.band_low"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "0.8");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "planner.band_low", "0.5"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "planner.band_low"]);
    assert_eq!(stdout.trim(), "0.5");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "planner.nope", "1"]);
    assert_ne!(code, 0);
}

#[test]
fn test_user_flag_isolates_tasks() {
    let dir = TempDir::new().unwrap();
    run_cli(dir.path(), &["task", "add", "Mine", "--due", "2030-01-01", "--user", "5"]);
    let other = run_json(dir.path(), &["task", "list", "--user", "6"]);
    assert!(other.as_array().unwrap().is_empty());
    let mine = run_json(dir.path(), &["task", "list", "--user", "5"]);
    assert_eq!(mine.as_array().unwrap().len(), 1);
}
