//! Fix command implementation.
//!
//! Resolves every symlink under a root and rewrites it to point straight at
//! its final target.

use crate::cli::ModeArg;
use crate::error::CliError;
use crate::interrupt;
use crate::utils::{flag_overrides, load_configuration, open_root, print_summary, GlobalOptions};
use clap::Args;
use relink::operations::fix_symlinks;
use std::path::PathBuf;

/// Rewrite every symlink under a root.
#[derive(Args)]
pub struct FixCommand {
    /// Root directory of the sysroot
    #[arg(value_name = "ROOT_DIRECTORY")]
    pub root: PathBuf,

    /// Show what would change without modifying any link
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Write targets as root-based absolute paths or relative to each link
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Maximum number of links followed in one chain
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
}

impl FixCommand {
    /// Execute the fix command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Validate the root before anything else
        let root = open_root(&self.root)?;

        // 2. Load configuration; flags win over files and environment
        let config = load_configuration(global, &root, flag_overrides(self.mode, self.max_depth))?;
        let options = config.fix_options().with_dry_run(self.dry_run);

        if self.dry_run && !global.quiet {
            eprintln!("[DRY RUN] No links will be modified");
        }

        // 3. Plan and execute
        let report = fix_symlinks(&root, &options, &global.logger, Some(interrupt::flag()))?;

        // 4. Report
        print_summary(global, &report);

        Ok(())
    }
}
