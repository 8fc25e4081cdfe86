//! Smoke tests to verify command module wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn tabletop() -> Command {
    let mut cmd = Command::cargo_bin("tabletop").unwrap();
    cmd.env_remove("TABLETOP_CONFIG")
        .env_remove("DATABASE_URL")
        .env_remove("TABLETOP_BIND");
    cmd
}

// === Top Level ===

#[test]
fn test_help_lists_subcommands() {
    tabletop()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("seed"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_unknown_subcommand_fails() {
    tabletop().arg("frobnicate").assert().failure();
}

// === Serve Command Tests ===

#[test]
fn test_serve_help() {
    tabletop()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_serve_without_database_url_fails() {
    let dir = tempfile::tempdir().unwrap();

    tabletop()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_serve_rejects_bad_bind() {
    tabletop()
        .arg("serve")
        .arg("--bind")
        .arg("not-an-address")
        .assert()
        .failure();
}

// === Seed Command Tests ===

#[test]
fn test_seed_help() {
    tabletop()
        .arg("seed")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("categories.json"));
}

#[test]
fn test_seed_missing_dir_fails_before_connecting() {
    let dir = tempfile::tempdir().unwrap();

    tabletop()
        .arg("seed")
        .arg("--dir")
        .arg(dir.path().join("nope"))
        .arg("--database-url")
        .arg("postgres://localhost/unused")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load fixtures"));
}

// === Config Command Tests ===

#[test]
fn test_config_path_honours_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");

    tabletop()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_config_show_defaults() {
    let dir = tempfile::tempdir().unwrap();

    tabletop()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("127.0.0.1:9090"))
        .stdout(predicate::str::contains("max_connections = 5"));
}

#[test]
fn test_config_show_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[server]\nbind = \"0.0.0.0:8080\"\n").unwrap();

    tabletop()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.0.0.0:8080"));
}

#[test]
fn test_config_show_rejects_invalid_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[server\n").unwrap();

    tabletop()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load"));
}
