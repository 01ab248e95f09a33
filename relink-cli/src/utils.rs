//! Utility functions for CLI operations.
//!
//! Root validation, configuration loading and display helpers shared by
//! the commands.

use std::path::{Path, PathBuf};

use relink::{Config, ConfigBuilder, Logger, OutputMode, RunReport, Sysroot};

use crate::cli::ModeArg;
use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,

    /// Logger initialised from the verbosity flags.
    pub logger: Logger,
}

/// Open `path` as a sysroot, reporting a structural error if it is unusable.
pub fn open_root(path: &Path) -> Result<Sysroot, CliError> {
    Sysroot::open(path).map_err(|e| {
        if e.is_invalid_root() || e.is_not_found() || e.is_permission_denied() {
            CliError::InvalidRoot {
                path: path.to_path_buf(),
                source: e,
            }
        } else {
            CliError::from(e)
        }
    })
}

/// Load hierarchical configuration for a run on `root`.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Command-line flags (highest priority)
/// 2. Environment variables
/// 3. `--config` file
/// 4. `<root>/.relink.yaml`
/// 5. `~/.relink/config.yaml`
/// 6. Built-in defaults (lowest priority)
pub fn load_configuration(
    global: &GlobalOptions,
    root: &Sysroot,
    overrides: Config,
) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new()
        .with_root(root.path())
        .with_config(overrides);
    if let Some(ref path) = global.config {
        builder = builder.with_config_file(path);
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Turn optional mode and depth flags into a configuration override.
pub fn flag_overrides(mode: Option<ModeArg>, max_depth: Option<usize>) -> Config {
    Config {
        mode: mode.map(OutputMode::from),
        max_depth,
        ..Default::default()
    }
}

/// Print the end-of-run summary.
///
/// In quiet mode only the number of changed links goes to stdout, and only
/// when it is non-zero.
pub fn print_summary(global: &GlobalOptions, report: &RunReport) {
    if global.quiet {
        if report.changed() > 0 {
            println!("{}", report.changed());
        }
    } else if report.is_dry_run() {
        eprintln!("[DRY RUN] {}", report.summary());
    } else {
        eprintln!("Operation complete: {}", report.summary());
    }
}

/// Show `path` relative to the root with a leading `/`.
pub fn display_in_root(root: &Sysroot, path: &Path) -> String {
    root.to_logical(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_root_missing_is_invalid_root() {
        let dir = tempdir().unwrap();
        let err = open_root(&dir.path().join("absent")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_open_root_file_is_invalid_root() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, b"x").unwrap();
        assert!(matches!(
            open_root(&file),
            Err(CliError::InvalidRoot { .. })
        ));
    }

    #[test]
    fn test_flag_overrides() {
        let config = flag_overrides(Some(ModeArg::Relative), Some(12));
        assert_eq!(config.mode, Some(OutputMode::Relative));
        assert_eq!(config.max_depth, Some(12));
        assert_eq!(flag_overrides(None, None), Config::default());
    }

    #[test]
    fn test_display_in_root() {
        let dir = tempdir().unwrap();
        let root = open_root(dir.path()).unwrap();
        assert_eq!(
            display_in_root(&root, &root.path().join("usr/lib/libc.so")),
            "/usr/lib/libc.so"
        );
    }
}
