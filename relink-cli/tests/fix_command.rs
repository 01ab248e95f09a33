//! Integration tests for `relink fix`.

mod common;

use common::{p, TestEnv};
use predicates::prelude::*;

#[test]
fn test_fix_absolute_mode_by_default() {
    let env = TestEnv::new();
    env.libfoo();

    env.command()
        .args(["fix", env.root_arg()])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Operation complete: 2 links: 1 changed, 1 unchanged, 0 skipped, 0 failed",
        ));

    assert_eq!(env.read_link("lib/libfoo.so"), p("/usr/lib/libfoo.so.1.0"));
    assert_eq!(env.read_link("lib/libfoo.so.1"), p("/usr/lib/libfoo.so.1.0"));
}

#[test]
fn test_fix_relative_mode() {
    let env = TestEnv::new();
    env.libfoo();

    env.command()
        .args(["fix", "--mode", "relative", env.root_arg()])
        .assert()
        .success();

    assert_eq!(env.read_link("lib/libfoo.so"), p("../usr/lib/libfoo.so.1.0"));
    assert_eq!(env.read_link("lib/libfoo.so.1"), p("../usr/lib/libfoo.so.1.0"));
    assert_eq!(std::fs::read(env.path("lib/libfoo.so")).unwrap(), b"\x7fELF");
}

#[test]
fn test_fix_dry_run_leaves_links_alone() {
    let env = TestEnv::new();
    env.libfoo();

    env.command()
        .args(["fix", "--dry-run", "--mode", "relative", env.root_arg()])
        .assert()
        .success()
        .stderr(predicate::str::contains("[DRY RUN] No links will be modified"))
        .stderr(predicate::str::contains("2 would change"));

    assert_eq!(env.read_link("lib/libfoo.so"), p("libfoo.so.1"));
    assert_eq!(env.read_link("lib/libfoo.so.1"), p("/usr/lib/libfoo.so.1.0"));
}

#[test]
fn test_fix_quiet_prints_only_change_count() {
    let env = TestEnv::new();
    env.libfoo();

    env.command()
        .args(["--quiet", "fix", env.root_arg()])
        .assert()
        .success()
        .stdout("1\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_fix_verbose_lists_each_link() {
    let env = TestEnv::new();
    env.libfoo();

    env.command()
        .args(["--verbose", "fix", env.root_arg()])
        .assert()
        .success()
        .stderr(predicate::str::contains("rewrote: "))
        .stderr(predicate::str::contains("unchanged: "));
}

#[test]
fn test_fix_second_run_is_a_no_op() {
    let env = TestEnv::new();
    env.libfoo();

    env.command().args(["fix", env.root_arg()]).assert().success();
    env.command()
        .args(["fix", env.root_arg()])
        .assert()
        .success()
        .stderr(predicate::str::contains("0 changed, 2 unchanged"));
}

#[test]
fn test_fix_root_config_sets_mode() {
    let env = TestEnv::new();
    env.libfoo().root_config("mode: relative\n");

    env.command().args(["fix", env.root_arg()]).assert().success();

    assert_eq!(env.read_link("lib/libfoo.so"), p("../usr/lib/libfoo.so.1.0"));
}

#[test]
fn test_fix_flag_overrides_config_and_environment() {
    let env = TestEnv::new();
    env.libfoo().root_config("mode: relative\n");

    env.command()
        .env("RELINK_MODE", "relative")
        .args(["fix", "--mode", "absolute", env.root_arg()])
        .assert()
        .success();

    assert_eq!(env.read_link("lib/libfoo.so"), p("/usr/lib/libfoo.so.1.0"));
}

#[test]
fn test_fix_environment_sets_mode() {
    let env = TestEnv::new();
    env.libfoo();

    env.command()
        .env("RELINK_MODE", "relative")
        .args(["fix", env.root_arg()])
        .assert()
        .success();

    assert_eq!(env.read_link("lib/libfoo.so"), p("../usr/lib/libfoo.so.1.0"));
}

#[test]
fn test_fix_cycle_warns_and_succeeds() {
    let env = TestEnv::new();
    env.link("a", "b").link("b", "a");

    env.command()
        .args(["fix", env.root_arg()])
        .assert()
        .success()
        .stderr(predicate::str::contains("WARN:"));

    assert_eq!(env.read_link("a"), p("b"));
    assert_eq!(env.read_link("b"), p("a"));
}

#[test]
fn test_fix_escaping_target_stays_inside_root() {
    let env = TestEnv::new();
    env.file("etc/passwd", b"root:x:0:0").link("usr/share/pw", "../../../../etc/passwd");

    env.command().args(["fix", env.root_arg()]).assert().success();

    assert_eq!(env.read_link("usr/share/pw"), p("/etc/passwd"));
}
