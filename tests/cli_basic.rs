//! Integration tests for basic CLI behavior.
//!
//! Only paths that never reach the live site: flags, argument validation,
//! identity generation and config loading.

#![allow(deprecated)] // cargo_bin deprecation, replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: get a Command for the `tmdb-scrape` binary.
fn tmdb() -> Command {
    Command::cargo_bin("tmdb-scrape").expect("binary 'tmdb-scrape' should be built")
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    tmdb()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: tmdb-scrape"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("details"))
        .stdout(predicate::str::contains("identity"));
}

#[test]
fn version_flag_shows_semver() {
    tmdb()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^tmdb-scrape \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn no_args_shows_error_and_usage() {
    tmdb()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: tmdb-scrape"));
}

#[test]
fn invalid_subcommand_fails() {
    tmdb()
        .arg("this-is-not-a-real-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ─── Subcommand arguments ────────────────────────────────────────────────────

#[test]
fn details_help_lists_options() {
    tmdb()
        .args(["details", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--pick"))
        .stdout(predicate::str::contains("--all"))
        .stdout(predicate::str::contains("--out"))
        .stdout(predicate::str::contains("--save"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn search_requires_query() {
    tmdb()
        .arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<QUERY>"));
}

#[test]
fn pick_is_one_based() {
    tmdb()
        .args(["details", "heat", "--pick", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--pick"));
}

#[test]
fn pick_conflicts_with_all() {
    tmdb()
        .args(["details", "heat", "--pick", "2", "--all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn out_conflicts_with_save() {
    tmdb()
        .args(["details", "heat", "--out", "x.json", "--save"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

// ─── Identity ────────────────────────────────────────────────────────────────

#[test]
fn identity_prints_requested_count() {
    tmdb()
        .args(["identity", "--count", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Identity 1:"))
        .stdout(predicate::str::contains("Identity 2:"))
        .stdout(predicate::str::contains("Identity 3:").not())
        .stdout(predicate::str::contains("UA: Mozilla/5.0"))
        .stdout(predicate::str::contains("Accept-Language: en-US"));
}

#[test]
fn identity_uses_configured_pool() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let toml = r#"
user_agents = ["OnlyAgent/9.9"]
accept_language = "fr-FR"
referer = "https://tmdb.test"
"#;
    fs::write(&path, toml).unwrap();

    tmdb()
        .arg("--config")
        .arg(&path)
        .args(["identity", "--count", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UA: OnlyAgent/9.9"))
        .stdout(predicate::str::contains("Accept-Language: fr-FR"))
        .stdout(predicate::str::contains("Referer: https://tmdb.test"))
        .stdout(predicate::str::contains("Mozilla").not());
}

// ─── Config ──────────────────────────────────────────────────────────────────

#[test]
fn invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "request_delay_ms = \"soon\"\n").unwrap();

    tmdb()
        .arg("--config")
        .arg(&path)
        .arg("identity")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn unreachable_site_fails_search() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "base_url = \"http://127.0.0.1:9\"\ntimeout_secs = 2\n").unwrap();

    tmdb()
        .arg("--config")
        .arg(&path)
        .args(["search", "heat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("127.0.0.1:9"));
}

#[test]
fn zero_timeout_flag_is_rejected() {
    tmdb()
        .args(["--timeout", "0", "identity"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--timeout"));
}

#[test]
fn zero_timeout_in_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "timeout_secs = 0\n").unwrap();

    tmdb()
        .arg("--config")
        .arg(&path)
        .arg("identity")
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout_secs"));
}
