//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use relink::config::{Config, ConfigMerger};
///
/// let low = Config { max_depth: Some(10), ..Default::default() };
/// let high = Config { max_depth: Some(20), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.max_depth, Some(20));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target; every field set in `source` wins.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.mode.is_some() {
            target.mode = source.mode;
        }

        if source.max_depth.is_some() {
            target.max_depth = source.max_depth;
        }

        if source.temp_suffix.is_some() {
            target.temp_suffix.clone_from(&source.temp_suffix);
        }

        if source.backup_suffix.is_some() {
            target.backup_suffix.clone_from(&source.backup_suffix);
        }

        if source.preserve_times.is_some() {
            target.preserve_times = source.preserve_times;
        }
    }
}
