mod common;

use std::fs;

use predicates::prelude::*;
use serde_json::Value;

use common::TestEnv;

fn read_key(env: &TestEnv, key: &str) -> Value {
    let path = env.path().join("data").join(format!("{}.json", key));
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn mark_days_and_view_month() {
    let env = TestEnv::new();

    env.tally().args(["rate", "set", "100"]).assert().success();
    for day in ["2025-04-01", "2025-04-02", "2025-05-01"] {
        env.tally()
            .args(["day", "mark", day])
            .assert()
            .success()
            .stdout(predicate::str::contains("Marked"));
    }

    env.tally()
        .args(["month", "2025-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Apr 2025"))
        .stdout(predicate::str::contains("€200.00"))
        .stdout(predicate::str::contains("€156.00"));

    assert_eq!(
        read_key(&env, "workDays"),
        serde_json::json!({ "2025-04-01": true, "2025-04-02": true, "2025-05-01": true })
    );
}

#[test]
fn toggle_twice_leaves_day_unworked() {
    let env = TestEnv::new();

    env.tally().args(["day", "toggle", "2025-04-01"]).assert().success();
    env.tally()
        .args(["day", "toggle", "2025-04-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared"));

    env.tally()
        .args(["day", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No work days recorded."));
    assert_eq!(read_key(&env, "workDays"), serde_json::json!({}));
}

#[test]
fn year_table_ends_with_total() {
    let env = TestEnv::new();

    for day in ["2025-01-06", "2025-03-03", "2025-03-04"] {
        env.tally().args(["day", "mark", day]).assert().success();
    }

    let output = env.tally().args(["year", "2025"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("2025-01"));
    assert!(stdout.contains("2025-03"));
    assert!(!stdout.contains("2025-02"));
    let last = stdout.trim_end().lines().last().unwrap();
    assert!(last.contains("TOTAL"));
    assert!(last.contains("€240.00"));
}

#[test]
fn expense_lifecycle() {
    let env = TestEnv::new();

    env.tally()
        .args(["expense", "add", "Accountant", "350,50", "2099-06-30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added expense: Accountant"));

    env.tally()
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("30/06/2099"))
        .stdout(predicate::str::contains("€350.50"));

    let expenses = read_key(&env, "expenses");
    let id = expenses[0]["id"].as_str().unwrap().to_string();
    assert_eq!(expenses[0]["payDate"], "2099-06-30");

    env.tally()
        .args(["expense", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted expense"));
    assert_eq!(read_key(&env, "expenses"), serde_json::json!([]));
}

#[test]
fn invalid_expense_input_is_rejected() {
    let env = TestEnv::new();

    env.tally()
        .args(["expense", "add", "  ", "10", "2099-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Description is required"));

    env.tally()
        .args(["expense", "add", "Rent", "ten", "2099-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));

    env.tally()
        .args(["expense", "delete", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn rate_is_stored_exactly_and_bounded() {
    let env = TestEnv::new();

    env.tally()
        .args(["rate", "set", "80.12345678901234567"])
        .assert()
        .success();
    let stored = fs::read_to_string(env.path().join("data").join("dailyRate.json")).unwrap();
    assert_eq!(stored.trim(), "80.12345678901234567");

    env.tally()
        .args(["rate", "set", "50000000000000000000000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot exceed"));

    env.tally()
        .args(["expense", "add", "Typo", "50000000000000000000000000000", "2099-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot exceed"));

    let stored = fs::read_to_string(env.path().join("data").join("dailyRate.json")).unwrap();
    assert_eq!(stored.trim(), "80.12345678901234567");
}

#[test]
fn coverage_reports_shortfall() {
    let env = TestEnv::new();

    env.tally()
        .args(["expense", "add", "Laptop", "900", "2025-08-01"])
        .assert()
        .success();

    env.tally()
        .args(["coverage", "--as-of", "2025-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shortfall"))
        .stdout(predicate::str::contains("-€900.00"));

    env.tally()
        .args(["coverage", "--as-of", "2025-09-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Covered"));
}

#[test]
fn export_and_restore() {
    let env = TestEnv::new();
    let backup = env.path().join("snapshot.json");

    env.tally().args(["rate", "set", "250"]).assert().success();
    env.tally().args(["day", "mark", "2025-04-01"]).assert().success();
    env.tally()
        .args(["backup", "export", "--output"])
        .arg(&backup)
        .assert()
        .success();

    let document: Value = serde_json::from_str(&fs::read_to_string(&backup).unwrap()).unwrap();
    assert!(document["exportedAt"].is_string());
    assert_eq!(document["workDays"], serde_json::json!({ "2025-04-01": true }));

    env.tally().args(["rate", "set", "80"]).assert().success();
    env.tally().args(["day", "mark", "2025-04-02"]).assert().success();

    // without --force nothing changes
    env.tally()
        .args(["backup", "restore"])
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
    assert_eq!(read_key(&env, "dailyRate").as_f64(), Some(80.0));

    env.tally()
        .args(["backup", "restore", "--force"])
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Restore complete"));

    assert_eq!(read_key(&env, "dailyRate").as_f64(), Some(250.0));
    assert_eq!(read_key(&env, "workDays"), serde_json::json!({ "2025-04-01": true }));

    // the pre-restore safety backup landed in the backup directory
    env.tally()
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 1 backup(s)"));
}

#[test]
fn invalid_backup_leaves_data_untouched() {
    let env = TestEnv::new();
    let bad = env.path().join("bad.json");
    fs::write(&bad, r#"{"dailyRate": 100, "workDays": {}, "expenses": "nope"}"#).unwrap();

    env.tally().args(["rate", "set", "120"]).assert().success();

    env.tally()
        .args(["backup", "validate"])
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expenses must be a list"));

    env.tally()
        .args(["backup", "restore", "--force"])
        .arg(&bad)
        .assert()
        .failure();

    assert_eq!(read_key(&env, "dailyRate").as_f64(), Some(120.0));
}

#[test]
fn config_shows_paths() {
    let env = TestEnv::new();

    env.tally()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Data directory"))
        .stdout(predicate::str::contains("Daily rate: €80.00"));
}
