//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Largest accepted depth cap.
pub const MAX_DEPTH_LIMIT: usize = 10_000;

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use relink::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { max_depth: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns `Validation` naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(depth) = config.max_depth {
            if depth == 0 || depth > MAX_DEPTH_LIMIT {
                return Err(Error::Validation {
                    field: "max_depth".into(),
                    message: format!("must be between 1 and {MAX_DEPTH_LIMIT}, got {depth}"),
                });
            }
        }

        if let Some(ref suffix) = config.temp_suffix {
            Self::validate_suffix("temp_suffix", suffix)?;
        }

        if let Some(ref suffix) = config.backup_suffix {
            Self::validate_suffix("backup_suffix", suffix)?;
        }

        if config.temp_suffix() == config.backup_suffix() {
            return Err(Error::Validation {
                field: "backup_suffix".into(),
                message: "must differ from temp_suffix".into(),
            });
        }

        Ok(())
    }

    /// A suffix is appended to a file name, so it must stay within it.
    fn validate_suffix(field: &str, suffix: &str) -> Result<()> {
        if suffix.is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "cannot be empty".into(),
            });
        }

        if suffix.contains('/') {
            return Err(Error::Validation {
                field: field.into(),
                message: "cannot contain a path separator".into(),
            });
        }

        if suffix.contains('\0') {
            return Err(Error::Validation {
                field: field.into(),
                message: "cannot contain null bytes".into(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_field(result: Result<()>, expected: &str) {
        match result {
            Err(Error::Validation { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected validation error on {expected}, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_defaults() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_depth_bounds() {
        for depth in [1, 100, MAX_DEPTH_LIMIT] {
            let config = Config {
                max_depth: Some(depth),
                ..Default::default()
            };
            assert!(ConfigValidator::validate(&config).is_ok(), "{depth}");
        }
        for depth in [0, MAX_DEPTH_LIMIT + 1] {
            let config = Config {
                max_depth: Some(depth),
                ..Default::default()
            };
            assert_field(ConfigValidator::validate(&config), "max_depth");
        }
    }

    #[test]
    fn test_empty_suffix_rejected() {
        let config = Config {
            temp_suffix: Some(String::new()),
            ..Default::default()
        };
        assert_field(ConfigValidator::validate(&config), "temp_suffix");
    }

    #[test]
    fn test_suffix_with_separator_rejected() {
        let config = Config {
            backup_suffix: Some("/../x".into()),
            ..Default::default()
        };
        assert_field(ConfigValidator::validate(&config), "backup_suffix");
    }

    #[test]
    fn test_equal_suffixes_rejected() {
        let config = Config {
            temp_suffix: Some(".bak".into()),
            ..Default::default()
        };
        assert_field(ConfigValidator::validate(&config), "backup_suffix");
    }
}
