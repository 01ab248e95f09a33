//! Confined link-chain resolution.
//!
//! Given a link and its stored target, [`ChainResolver`] follows the chain of
//! links inside a [`Sysroot`] until it reaches something that is not a link
//! (a file, a directory, or nothing at all), and reports where that is.
//! Absolute targets along the way are interpreted against the root.
//!
//! Two conditions stop the walk early without an error:
//!
//! - a link is visited twice in the same chain ([`Resolution::Cycle`]);
//! - more than `max_depth` links were followed ([`Resolution::DepthExceeded`]).
//!
//! In both cases the target stored in the link being examined at that point
//! is returned unchanged, so the caller can leave it as it was.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::path::{LogicalPath, Sysroot};

/// Default cap on the number of links followed in one chain.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// How a resolved target is written back into a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// A `/`-prefixed path interpreted relative to the sysroot.
    #[default]
    Absolute,
    /// A path relative to the directory containing the link.
    Relative,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute => write!(f, "absolute"),
            Self::Relative => write!(f, "relative"),
        }
    }
}

impl FromStr for OutputMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "absolute" => Ok(Self::Absolute),
            "relative" => Ok(Self::Relative),
            _ => Err(Error::Validation {
                field: "mode".to_string(),
                message: format!("unknown output mode '{s}' (expected absolute or relative)"),
            }),
        }
    }
}

/// How following a chain ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The chain ended at a non-link (which may not exist).
    Resolved {
        /// Where the chain ended, inside the sysroot.
        target: LogicalPath,
        /// Number of links followed after the first one.
        hops: usize,
    },
    /// A link was reached twice.
    Cycle {
        /// The link at which the cycle closed.
        at: PathBuf,
        /// The target stored in the link examined when the cycle closed.
        fallback: PathBuf,
    },
    /// The depth cap was exceeded.
    DepthExceeded {
        /// The target stored in the link examined when the cap tripped.
        fallback: PathBuf,
    },
}

impl Resolution {
    /// Short machine-friendly name of the outcome.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Resolved { .. } => "resolved",
            Self::Cycle { .. } => "cycle",
            Self::DepthExceeded { .. } => "depth-exceeded",
        }
    }

    /// Whether resolution gave up and returned a stored target unchanged.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        !matches!(self, Self::Resolved { .. })
    }
}

/// A link together with the target it should have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// The link being resolved.
    pub link_path: PathBuf,
    /// The target stored in the link when it was collected.
    pub original: PathBuf,
    /// How the chain ended.
    pub resolution: Resolution,
    /// The target to write, formatted for the resolver's output mode.
    pub new_target: PathBuf,
}

impl ResolvedLink {
    /// Whether writing `new_target` would leave the link as it is.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.original == self.new_target
    }
}

/// Follows link chains inside a sysroot.
///
/// The resolver holds no per-chain state; each call builds its own visited
/// set, so one resolver can be reused for every link in a run.
///
/// # Examples
///
/// ```no_run
/// use relink::path::Sysroot;
/// use relink::{ChainResolver, OutputMode};
/// use std::path::Path;
///
/// let root = Sysroot::open(Path::new("/opt/sysroot")).unwrap();
/// let resolver = ChainResolver::new(&root).with_mode(OutputMode::Relative);
/// let link = root.path().join("lib/libfoo.so");
/// let resolved = resolver.resolve(&link, Path::new("libfoo.so.1")).unwrap();
/// println!("{}", resolved.new_target.display());
/// ```
#[derive(Debug, Clone)]
pub struct ChainResolver<'a> {
    root: &'a Sysroot,
    max_depth: usize,
    mode: OutputMode,
}

impl<'a> ChainResolver<'a> {
    /// Create a resolver with the default depth cap and absolute output.
    #[must_use]
    pub fn new(root: &'a Sysroot) -> Self {
        Self {
            root,
            max_depth: DEFAULT_MAX_DEPTH,
            mode: OutputMode::default(),
        }
    }

    /// Set the maximum number of links followed in one chain.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the output mode.
    #[must_use]
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// The configured output mode.
    #[must_use]
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// The sysroot this resolver is confined to.
    #[must_use]
    pub fn root(&self) -> &Sysroot {
        self.root
    }

    /// Follow the chain starting at `link_path`, whose stored target is
    /// `raw_target`.
    ///
    /// # Errors
    ///
    /// Returns an error only if a link in the chain cannot be read.
    pub fn follow(&self, link_path: &Path, raw_target: &Path) -> Result<Resolution> {
        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut current_link = link_path.to_path_buf();
        let mut current_target = raw_target.to_path_buf();
        let mut depth = 0;

        loop {
            if depth > self.max_depth {
                log::debug!(
                    "depth cap {} exceeded at {}",
                    self.max_depth,
                    current_link.display()
                );
                return Ok(Resolution::DepthExceeded {
                    fallback: current_target,
                });
            }

            if visited.contains(&current_link) {
                log::debug!("cycle closed at {}", current_link.display());
                return Ok(Resolution::Cycle {
                    at: current_link,
                    fallback: current_target,
                });
            }
            visited.insert(current_link.clone());

            let candidate = self.root.anchor(&current_link, &current_target);
            let logical = self.root.to_logical(&candidate);
            let on_disk = self.root.to_real(&logical);

            if !is_symlink(&on_disk) {
                return Ok(Resolution::Resolved {
                    target: logical,
                    hops: depth,
                });
            }

            current_target =
                fs::read_link(&on_disk).map_err(|e| Error::from_io(&on_disk, e))?;
            current_link = on_disk;
            depth += 1;
        }
    }

    /// Format a resolution as the target to store in `link_path`.
    ///
    /// Fallback resolutions are returned verbatim in every mode.
    #[must_use]
    pub fn format(&self, link_path: &Path, resolution: &Resolution) -> PathBuf {
        match resolution {
            Resolution::Resolved { target, .. } => match self.mode {
                OutputMode::Absolute => target.as_path().to_path_buf(),
                OutputMode::Relative => {
                    let link_dir = link_path.parent().unwrap_or_else(|| self.root.path());
                    self.root.relative_from(link_dir, target)
                }
            },
            Resolution::Cycle { fallback, .. } | Resolution::DepthExceeded { fallback } => {
                fallback.clone()
            }
        }
    }

    /// Whether `resolution` ended at a directory inside the root.
    #[must_use]
    pub fn ends_in_directory(&self, resolution: &Resolution) -> bool {
        match resolution {
            Resolution::Resolved { target, .. } => self.root.to_real(target).is_dir(),
            _ => false,
        }
    }

    /// Follow and format in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if a link in the chain cannot be read.
    pub fn resolve(&self, link_path: &Path, raw_target: &Path) -> Result<ResolvedLink> {
        let resolution = self.follow(link_path, raw_target)?;
        let new_target = self.format(link_path, &resolution);
        Ok(ResolvedLink {
            link_path: link_path.to_path_buf(),
            original: raw_target.to_path_buf(),
            resolution,
            new_target,
        })
    }
}

/// Structural link check; dangling links count, unreadable paths do not.
fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
}
