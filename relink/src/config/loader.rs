//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Name of the per-root configuration file.
pub const ROOT_CONFIG_FILE: &str = ".relink.yaml";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from the user, root and explicit files.
///
/// # Examples
///
/// ```no_run
/// use relink::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Some(Path::new("/opt/sysroot")), None, None).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load every configuration file that applies, lowest precedence first.
    ///
    /// 1. `config.yaml` in `user_dir` (default `~/.relink`), precedence 1
    /// 2. `.relink.yaml` directly in `root`, precedence 2
    /// 3. `explicit`, precedence 3; unlike the others it must exist
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read or parsed, or if
    /// the explicit file is missing.
    pub fn load_all(
        root: Option<&Path>,
        user_dir: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user) = Self::load_user_config(user_dir)? {
            sources.push(user);
        }

        if let Some(root) = root {
            let path = root.join(ROOT_CONFIG_FILE);
            if path.is_file() {
                let config = Self::load_file(&path)?;
                sources.push(ConfigSource {
                    path,
                    precedence: 2,
                    config,
                });
            }
        }

        if let Some(path) = explicit {
            let config = Self::load_file(path)?;
            sources.push(ConfigSource {
                path: path.to_path_buf(),
                precedence: 3,
                config,
            });
        }

        sources.sort_by_key(|s| s.precedence);
        for source in &sources {
            log::debug!("loaded configuration from {}", source.path.display());
        }
        Ok(sources)
    }

    fn load_user_config(user_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let path = match user_dir {
            Some(dir) => dir.join("config.yaml"),
            None => match Self::user_config_path() {
                Some(path) => path,
                None => return Ok(None),
            },
        };

        if !path.is_file() {
            return Ok(None);
        }

        let config = Self::load_file(&path)?;
        Ok(Some(ConfigSource {
            path,
            precedence: 1,
            config,
        }))
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("failed to read configuration file: {e}"),
        })?;

        Config::from_yaml(&contents).map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: format!("invalid configuration: {e}"),
        })
    }

    /// `~/.relink/config.yaml`, or `None` when there is no home directory.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        home::home_dir().map(|home| home.join(".relink").join("config.yaml"))
    }
}
