//! Build script for relink-cli.
//!
//! Generates the `relink.1` man page into OUT_DIR with clap_mangen. Build
//! scripts cannot depend on the crate being built, so the command tree is
//! described again here.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Keep in step with src/cli.rs.
fn build_cli() -> Command {
    let root = || {
        Arg::new("root")
            .value_name("ROOT_DIRECTORY")
            .help("Root directory of the sysroot")
            .required(true)
    };
    let dry_run = || {
        Arg::new("dry-run")
            .short('n')
            .long("dry-run")
            .help("Report what would change without modifying anything")
            .action(ArgAction::SetTrue)
    };
    let mode = || {
        Arg::new("mode")
            .long("mode")
            .value_parser(["absolute", "relative"])
            .help("Write targets as root-based absolute paths or relative to each link")
    };
    let max_depth = || {
        Arg::new("max-depth")
            .long("max-depth")
            .value_name("N")
            .help("Maximum number of links followed in one chain")
    };

    Command::new("relink")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rebase and materialize symlinks inside a sysroot")
        .long_about(
            "Rewrites the symlinks of a relocated root filesystem so they resolve inside it, \
             or replaces them with copies of the files they point at",
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print a line for every link handled")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Load this configuration file on top of the user and root files")
                .global(true)
                .env("RELINK_CONFIG"),
        )
        .subcommands(vec![
            Command::new("fix")
                .about("Rewrite every symlink to point straight at its final target")
                .arg(root())
                .arg(dry_run())
                .arg(mode())
                .arg(max_depth()),
            Command::new("materialize")
                .about("Replace symlinks with copies of the files they point at")
                .arg(root().value_name("DIRECTORY").help("Directory to process"))
                .arg(dry_run())
                .arg(
                    Arg::new("no-preserve-times")
                        .long("no-preserve-times")
                        .help("Give copies the current time instead of the source's timestamps")
                        .action(ArgAction::SetTrue),
                ),
            Command::new("list")
                .about("Show each symlink and where it resolves, without changing anything")
                .arg(root())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["table", "json", "csv", "tsv"])
                        .default_value("table"),
                )
                .arg(mode())
                .arg(max_depth())
                .arg(
                    Arg::new("pending")
                        .long("pending")
                        .help("Only show links a fix run would rewrite")
                        .action(ArgAction::SetTrue),
                ),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(Arg::new("shell").required(true)),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "OUT_DIR is not set")
    })?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("relink.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
