//! Materialize command implementation.
//!
//! Replaces every symlink to a regular file with a copy of that file.

use crate::error::CliError;
use crate::interrupt;
use crate::utils::{load_configuration, open_root, print_summary, GlobalOptions};
use clap::Args;
use relink::{Config, Materializer};
use std::path::PathBuf;

/// Replace symlinks with copies of their targets.
#[derive(Args)]
pub struct MaterializeCommand {
    /// Directory to process
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Show what would be copied without modifying anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Give copies the current time instead of the source's timestamps
    #[arg(long)]
    pub no_preserve_times: bool,
}

impl MaterializeCommand {
    /// Execute the materialize command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let root = open_root(&self.directory)?;

        let overrides = Config {
            preserve_times: self.no_preserve_times.then_some(false),
            ..Default::default()
        };
        let config = load_configuration(global, &root, overrides)?;
        let options = config.materialize_options().with_dry_run(self.dry_run);

        if self.dry_run && !global.quiet {
            eprintln!("[DRY RUN] No files will be modified");
        }

        let report = Materializer::new(options)
            .with_interrupt(interrupt::flag())
            .run(&root, &global.logger)?;

        print_summary(global, &report);

        Ok(())
    }
}
