//! Top-level CLI behavior: version, help and completions.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_version() {
    TestEnv::new()
        .command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("relink "));
}

#[test]
fn test_help_lists_commands() {
    TestEnv::new()
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fix"))
        .stdout(predicate::str::contains("materialize"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_missing_subcommand_fails() {
    TestEnv::new().command().assert().failure();
}

#[test]
fn test_completions_bash() {
    TestEnv::new()
        .command()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_relink"))
        .stderr(predicate::str::contains("bash-completion"));
}

#[test]
fn test_completions_quiet_has_no_hint() {
    TestEnv::new()
        .command()
        .args(["--quiet", "completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef relink"))
        .stderr(predicate::str::is_empty());
}
