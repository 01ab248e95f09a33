//! Property-based tests for configuration merging and validation.

use super::merger::ConfigMerger;
use super::schema::Config;
use super::validator::{ConfigValidator, MAX_DEPTH_LIMIT};
use crate::resolve::OutputMode;
use proptest::prelude::*;

fn mode_strategy() -> impl Strategy<Value = OutputMode> {
    prop_oneof![Just(OutputMode::Absolute), Just(OutputMode::Relative)]
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(mode_strategy()),
        prop::option::of(1usize..=MAX_DEPTH_LIMIT),
        prop::option::of("\\.t[a-z]{0,7}"),
        prop::option::of("~[a-z]{1,8}"),
        prop::option::of(any::<bool>()),
    )
        .prop_map(
            |(mode, max_depth, temp_suffix, backup_suffix, preserve_times)| Config {
                mode,
                max_depth,
                temp_suffix,
                backup_suffix,
                preserve_times,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Every field set in the higher layer wins; unset fields fall through.
    #[test]
    fn merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(result.mode, high.mode.or(low.mode));
        prop_assert_eq!(result.max_depth, high.max_depth.or(low.max_depth));
        prop_assert_eq!(result.temp_suffix, high.temp_suffix.or(low.temp_suffix));
        prop_assert_eq!(result.backup_suffix, high.backup_suffix.or(low.backup_suffix));
        prop_assert_eq!(result.preserve_times, high.preserve_times.or(low.preserve_times));
    }

    // Merging a config into itself changes nothing.
    #[test]
    fn merge_is_idempotent(config in config_strategy()) {
        let mut result = config.clone();
        ConfigMerger::merge_into(&mut result, &config);
        prop_assert_eq!(result, config);
    }

    // Temp suffixes start with ".t" and backup suffixes with "~", so generated
    // configs never collide and always validate.
    #[test]
    fn generated_configs_validate(config in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn depth_out_of_range_rejected(depth in (MAX_DEPTH_LIMIT + 1)..usize::MAX) {
        let config = Config { max_depth: Some(depth), ..Default::default() };
        prop_assert!(ConfigValidator::validate(&config).is_err());
    }
}
