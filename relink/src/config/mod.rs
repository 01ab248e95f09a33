//! Configuration system for relink.
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`RELINK_*`)
//! 3. An explicit file (`--config`)
//! 4. The root's `.relink.yaml`
//! 5. User config (`~/.relink/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use relink::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_root(Path::new("/opt/sysroot"))
//!     .build()
//!     .unwrap();
//! println!("mode: {}", config.mode());
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use relink::config::{Config, ConfigBuilder};
//! use relink::OutputMode;
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(Config {
//!         mode: Some(OutputMode::Relative),
//!         ..Default::default()
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.mode(), OutputMode::Relative);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, ROOT_CONFIG_FILE};
pub use merger::ConfigMerger;
pub use schema::Config;
pub use validator::ConfigValidator;
