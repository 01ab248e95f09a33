//! User-facing progress output for relink runs.
//!
//! Runs talk to the user through a [`Logger`] that filters by [`LogLevel`].
//! Per-link progress lines (`fixed`, `would fix`, `materialized`, ...) only
//! appear at [`LogLevel::Verbose`]; per-link failures and warnings appear
//! unless the logger is quiet. Internal diagnostics go through the `log`
//! crate macros instead and are not affected by this level.

use std::env;
use std::fmt;
use std::path::Path;

/// Environment variable consulted when no CLI verbosity flag is given.
pub const LOG_MODE_ENV: &str = "RELINK_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// # Examples
///
/// ```
/// use relink::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Only fatal errors.
    Quiet,
    /// Per-link failures and warnings.
    Normal,
    /// Everything, including one line per processed link.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not one of `quiet`, `normal`,
    /// `verbose`.
    ///
    /// # Examples
    ///
    /// ```
    /// use relink::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("chatty").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }
}

/// A level-filtered stderr logger.
///
/// # Examples
///
/// ```
/// use relink::{LogLevel, Logger};
/// use std::path::Path;
///
/// let logger = Logger::new(LogLevel::Verbose);
/// logger.link("fixed", Path::new("/sysroot/lib/libz.so"), "/usr/lib/libz.so.1");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Whether per-link progress lines are emitted.
    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.level >= LogLevel::Verbose
    }

    /// Logs a per-link or run-level failure.
    pub fn error(&self, message: &str) {
        if self.level >= LogLevel::Normal {
            eprintln!("ERROR: {message}");
        }
    }

    /// Logs a warning, such as a skipped dangling link.
    pub fn warn(&self, message: &str) {
        if self.level >= LogLevel::Normal {
            eprintln!("WARN: {message}");
        }
    }

    /// Logs an informational message (verbose only).
    pub fn info(&self, message: &str) {
        if self.is_verbose() {
            eprintln!("INFO: {message}");
        }
    }

    /// Logs one progress line for a link, e.g. `fixed: a -> b`.
    pub fn link(&self, action: &str, link: &Path, target: impl fmt::Display) {
        if self.is_verbose() {
            eprintln!("{action}: {} -> {target}", link.display());
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

/// Initializes a logger from CLI flags, falling back to `RELINK_LOG_MODE`.
///
/// `verbose` wins over `quiet` when both are set. An unparseable
/// environment value is ignored.
///
/// # Examples
///
/// ```
/// use relink::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, false).level(), LogLevel::Verbose);
/// assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    env::var(LOG_MODE_ENV)
        .ok()
        .and_then(|value| LogLevel::parse(&value).ok())
        .map_or_else(Logger::default, Logger::new)
}
