//! End-to-end CLI integration tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn mpcache() -> Command {
    Command::cargo_bin("mpcache").expect("binary not found")
}

#[test]
fn help_flag() {
    mpcache()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--cache-size"))
        .stdout(predicate::str::contains("--object-size"));
}

#[test]
fn version_flag() {
    mpcache()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mpcache"));
}

#[test]
fn small_run_prints_table() {
    mpcache()
        .args(["-n", "20", "--bits", "64"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_count=100 max_capacity=128"))
        .stdout(predicate::str::contains("rational"))
        .stdout(predicate::str::contains("total"));
}

#[test]
fn json_report() {
    let output = mpcache()
        .args([
            "-n",
            "10",
            "--kind",
            "integer",
            "--cache-size",
            "4",
            "--object-size",
            "32",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["config"]["max_count"], 4);
    assert_eq!(report["config"]["max_capacity"], 32);
    assert_eq!(report["operations"], 30);
    assert_eq!(report["stats"]["complex"]["hits"], 0);
    assert!(report["pooled"].as_u64().unwrap() <= 16);
}

#[test]
fn quiet_mode() {
    mpcache()
        .args(["-n", "5", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn threads_share_pools() {
    mpcache()
        .args(["-n", "10", "--threads", "3", "--kind", "float", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"threads\": 3"))
        .stdout(predicate::str::contains("\"operations\": 90"));
}

#[test]
fn zero_cache_size_still_runs() {
    mpcache()
        .args(["-n", "5", "--cache-size", "0", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pooled\": 0"));
}

#[test]
fn cache_size_out_of_range() {
    mpcache()
        .args(["--cache-size", "1001"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("cache size must be between 0 and 1000"));
}

#[test]
fn negative_object_size() {
    mpcache()
        .args(["--object-size", "-1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("object size"));
}

#[test]
fn env_var_cache_size() {
    mpcache()
        .env("MPCACHE_SIZE", "7")
        .args(["-n", "1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_count\": 7"));
}

#[test]
fn invalid_kind() {
    mpcache().args(["--kind", "quaternion"]).assert().failure();
}

#[test]
fn shell_completion_bash() {
    mpcache()
        .args(["--completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mpcache"));
}

#[test]
fn shell_completion_zsh() {
    mpcache()
        .args(["--completion", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mpcache"));
}
