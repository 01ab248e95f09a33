#![deny(unsafe_code)]

//! Main entry point for the relink CLI.
//!
//! - `fix`: rewrite symlinks inside a sysroot to point at their final targets
//! - `materialize`: replace symlinks with copies of the files they point at
//! - `list`: show how each link resolves
//! - `completions`: generate shell completion scripts

mod cli;
mod commands;
mod error;
mod interrupt;
mod utils;

use clap::Parser;
use cli::Cli;
use error::CliError;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    let logger = relink::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
        logger,
    };

    interrupt::install();

    let result = match cli.command {
        cli::Command::Fix(cmd) => cmd.execute(&global),
        cli::Command::Materialize(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(CliError::Interrupted) => {
            eprintln!("Operation cancelled by user");
            std::process::exit(CliError::Interrupted.exit_code());
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
