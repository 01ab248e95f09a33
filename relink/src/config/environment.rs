//! Environment variable handling for configuration overrides.
//!
//! `RELINK_*` variables override every configuration file.

use std::env;

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::resolve::OutputMode;

/// Output mode override.
pub const MODE_ENV: &str = "RELINK_MODE";
/// Depth cap override.
pub const MAX_DEPTH_ENV: &str = "RELINK_MAX_DEPTH";
/// Temporary link suffix override.
pub const TEMP_SUFFIX_ENV: &str = "RELINK_TEMP_SUFFIX";
/// Backup suffix override.
pub const BACKUP_SUFFIX_ENV: &str = "RELINK_BACKUP_SUFFIX";
/// Timestamp preservation override.
pub const PRESERVE_TIMES_ENV: &str = "RELINK_PRESERVE_TIMES";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use relink::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(mode) = env::var(MODE_ENV) {
            config.mode = Some(mode.parse::<OutputMode>().map_err(|_| Error::Validation {
                field: MODE_ENV.into(),
                message: format!("invalid mode '{mode}' (expected absolute or relative)"),
            })?);
        }

        if let Ok(depth) = env::var(MAX_DEPTH_ENV) {
            config.max_depth = Some(depth.trim().parse().map_err(|_| Error::Validation {
                field: MAX_DEPTH_ENV.into(),
                message: "must be a positive integer".into(),
            })?);
        }

        if let Ok(suffix) = env::var(TEMP_SUFFIX_ENV) {
            config.temp_suffix = Some(suffix);
        }

        if let Ok(suffix) = env::var(BACKUP_SUFFIX_ENV) {
            config.backup_suffix = Some(suffix);
        }

        if let Ok(val) = env::var(PRESERVE_TIMES_ENV) {
            config.preserve_times = Some(Self::parse_bool(PRESERVE_TIMES_ENV, &val)?);
        }

        Ok(())
    }

    /// Parse boolean from string (supports true/false/1/0/yes/no/on/off).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
