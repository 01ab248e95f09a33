//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::materialize::{MaterializeOptions, DEFAULT_BACKUP_SUFFIX};
use crate::operations::FixOptions;
use crate::resolve::{OutputMode, DEFAULT_MAX_DEPTH};
use crate::rewrite::DEFAULT_TEMP_SUFFIX;

/// Complete configuration structure.
///
/// Every field is optional so partial files can be layered; accessors fall
/// back to the built-in defaults.
///
/// # Examples
///
/// ```
/// use relink::config::Config;
/// use relink::OutputMode;
///
/// let config = Config {
///     mode: Some(OutputMode::Relative),
///     ..Default::default()
/// };
/// assert_eq!(config.mode(), OutputMode::Relative);
/// assert_eq!(config.max_depth(), 100);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Output form of rewritten link targets.
    pub mode: Option<OutputMode>,

    /// Maximum number of links followed in one chain.
    pub max_depth: Option<usize>,

    /// Suffix of the temporary link used while rewriting.
    pub temp_suffix: Option<String>,

    /// Suffix of the backup file used while materializing.
    pub backup_suffix: Option<String>,

    /// Whether materialized files keep the source's timestamps.
    pub preserve_times: Option<bool>,
}

impl Config {
    /// Parse a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the document is not valid YAML or contains
    /// unknown fields.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// The configured output mode.
    #[must_use]
    pub fn mode(&self) -> OutputMode {
        self.mode.unwrap_or_default()
    }

    /// The configured depth cap.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    /// The configured temporary link suffix.
    #[must_use]
    pub fn temp_suffix(&self) -> &str {
        self.temp_suffix.as_deref().unwrap_or(DEFAULT_TEMP_SUFFIX)
    }

    /// The configured backup suffix.
    #[must_use]
    pub fn backup_suffix(&self) -> &str {
        self.backup_suffix.as_deref().unwrap_or(DEFAULT_BACKUP_SUFFIX)
    }

    /// Whether timestamps are preserved when materializing.
    #[must_use]
    pub fn preserve_times(&self) -> bool {
        self.preserve_times.unwrap_or(true)
    }

    /// Options for a fix run.
    #[must_use]
    pub fn fix_options(&self) -> FixOptions {
        FixOptions::default()
            .with_mode(self.mode())
            .with_max_depth(self.max_depth())
            .with_temp_suffix(self.temp_suffix())
    }

    /// Options for a materialize run.
    #[must_use]
    pub fn materialize_options(&self) -> MaterializeOptions {
        MaterializeOptions::default()
            .with_backup_suffix(self.backup_suffix())
            .with_preserve_times(self.preserve_times())
    }
}
