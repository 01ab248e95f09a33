//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, FixCommand, ListCommand, MaterializeCommand};
use clap::{Parser, Subcommand, ValueEnum};
use relink::OutputMode;
use std::path::PathBuf;

/// Rebase and materialize symlinks inside a sysroot.
#[derive(Parser)]
#[command(name = "relink")]
#[command(version, about = "Rebase and materialize symlinks inside a sysroot", long_about = None)]
pub struct Cli {
    /// Print a line for every link handled
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Load this configuration file on top of the user and root files
    #[arg(long, value_name = "PATH", global = true, env = "RELINK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Rewrite every symlink to point straight at its final target
    Fix(FixCommand),

    /// Replace symlinks with copies of the files they point at
    Materialize(MaterializeCommand),

    /// Show each symlink and where it resolves, without changing anything
    List(ListCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

/// How rewritten targets are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ModeArg {
    /// `/`-prefixed, interpreted from the root
    Absolute,
    /// Relative to the link's directory
    Relative,
}

impl From<ModeArg> for OutputMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Absolute => OutputMode::Absolute,
            ModeArg::Relative => OutputMode::Relative,
        }
    }
}
