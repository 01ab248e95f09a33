//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use std::fmt;
use std::path::PathBuf;

use relink::Error as LibError;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// The root directory is missing, unreadable or not a directory.
    InvalidRoot {
        /// The path given on the command line.
        path: PathBuf,
        /// What is wrong with it.
        source: LibError,
    },

    /// I/O error.
    Io(std::io::Error),

    /// Configuration error.
    Config(String),

    /// The user pressed Ctrl-C.
    Interrupted,
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 2: Root directory missing or not a directory (clap also uses 2
    ///   for usage errors)
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    /// - 130: Interrupted by the user
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidRoot { .. } => 2,
            CliError::Io(_) => 5,
            CliError::Library(_) => 6,
            CliError::Config(_) => 7,
            CliError::Interrupted => 130,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidRoot { path, source } => {
                write!(f, "Invalid root directory {}: {source}", path.display())
            }
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::Interrupted => write!(f, "Operation cancelled by user"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) | CliError::InvalidRoot { source: e, .. } => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::Interrupted => CliError::Interrupted,
            LibError::Configuration(_) | LibError::Validation { .. } => {
                CliError::Config(e.to_string())
            }
            LibError::Io(io) => CliError::Io(io),
            other => CliError::Library(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
