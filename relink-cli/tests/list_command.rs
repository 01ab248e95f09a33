//! Integration tests for `relink list`.

mod common;

use common::TestEnv;
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn test_list_table_has_header_and_rows() {
    let env = TestEnv::new();
    env.libfoo();

    env.command()
        .args(["list", env.root_arg()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "LINK\tTARGET\tRESOLVED\tSTATUS\tHOPS\tNEEDS_REWRITE\n",
        ))
        .stdout(predicate::str::contains(
            "/lib/libfoo.so\tlibfoo.so.1\t/usr/lib/libfoo.so.1.0\tresolved\t1\tyes",
        ))
        .stderr(predicate::str::contains("2 links"));
}

#[test]
fn test_list_json() {
    let env = TestEnv::new();
    env.libfoo().link("loop", "loop");

    let output = env
        .command()
        .args(["list", "--format", "json", "--mode", "relative", env.root_arg()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.len(), 3);

    let libfoo = rows
        .iter()
        .find(|r| r["link"] == "/lib/libfoo.so")
        .unwrap();
    assert_eq!(libfoo["resolved"], "../usr/lib/libfoo.so.1.0");
    assert_eq!(libfoo["needs_rewrite"], true);

    let looped = rows.iter().find(|r| r["link"] == "/loop").unwrap();
    assert_eq!(looped["status"], "cycle");
    assert!(looped["hops"].is_null());
}

#[test]
fn test_list_csv() {
    let env = TestEnv::new();
    env.libfoo();

    env.command()
        .args(["list", "--format", "csv", env.root_arg()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "link,target,resolved,status,hops,needs_rewrite\n",
        ))
        .stdout(predicate::str::contains(
            "/lib/libfoo.so.1,/usr/lib/libfoo.so.1.0,/usr/lib/libfoo.so.1.0,resolved,0,false",
        ));
}

#[test]
fn test_list_pending_filters_settled_links() {
    let env = TestEnv::new();
    env.libfoo();

    let output = env
        .command()
        .args(["list", "--pending", "--format", "tsv", env.root_arg()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("/lib/libfoo.so\t"));
}

#[test]
fn test_list_does_not_modify() {
    let env = TestEnv::new();
    env.libfoo();

    env.command().args(["list", env.root_arg()]).assert().success();

    assert_eq!(env.read_link("lib/libfoo.so"), std::path::Path::new("libfoo.so.1"));
}

#[test]
fn test_list_format_from_environment() {
    let env = TestEnv::new();
    env.libfoo();

    env.command()
        .env("RELINK_OUTPUT_FORMAT", "JSON")
        .args(["list", env.root_arg()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["));
}
