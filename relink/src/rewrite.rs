//! Atomic replacement of a symlink's target.
//!
//! A link is never edited in place. The new target is written to a sibling
//! temporary link (`<link><temp_suffix>`), which is then renamed over the
//! original. `rename(2)` replaces the destination atomically, so at every
//! instant the link path holds either the old or the new target.
//!
//! Filesystem calls go through the [`LinkFs`] trait so tests can inject
//! failures between stages.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default suffix of the temporary link created next to the original.
pub const DEFAULT_TEMP_SUFFIX: &str = ".tmp";

/// The step of the rewrite protocol that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteStage {
    /// Creating the temporary link.
    CreateTemp,
    /// Renaming the temporary link over the original.
    Publish,
}

impl fmt::Display for RewriteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateTemp => write!(f, "create temporary link"),
            Self::Publish => write!(f, "publish"),
        }
    }
}

/// Filesystem operations needed to rewrite a link.
///
/// This trait abstracts the mutating calls so tests can substitute an
/// implementation that fails at a chosen stage.
pub trait LinkFs {
    /// Create a symlink at `link` pointing at `target`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn symlink(&self, target: &Path, link: &Path) -> io::Result<()>;

    /// Rename `from` to `to`, replacing `to` if it exists.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Remove a file or symlink (not following it).
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// [`LinkFs`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLinkFs;

impl LinkFs for SystemLinkFs {
    fn symlink(&self, target: &Path, link: &Path) -> io::Result<()> {
        std::os::unix::fs::symlink(target, link)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

/// Rewrites links using the temporary-link-then-rename protocol.
///
/// # Examples
///
/// ```no_run
/// use relink::rewrite::AtomicRewriter;
/// use std::path::Path;
///
/// let rewriter = AtomicRewriter::new(".tmp");
/// rewriter
///     .rewrite(Path::new("/opt/sysroot/lib/libz.so"), Path::new("/usr/lib/libz.so.1"))
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct AtomicRewriter<F: LinkFs = SystemLinkFs> {
    fs: F,
    temp_suffix: String,
}

impl AtomicRewriter<SystemLinkFs> {
    /// Create a rewriter on the real filesystem.
    #[must_use]
    pub fn new(temp_suffix: impl Into<String>) -> Self {
        Self::with_fs(SystemLinkFs, temp_suffix)
    }
}

impl Default for AtomicRewriter<SystemLinkFs> {
    fn default() -> Self {
        Self::new(DEFAULT_TEMP_SUFFIX)
    }
}

impl<F: LinkFs> AtomicRewriter<F> {
    /// Create a rewriter on a custom filesystem implementation.
    #[must_use]
    pub fn with_fs(fs: F, temp_suffix: impl Into<String>) -> Self {
        Self {
            fs,
            temp_suffix: temp_suffix.into(),
        }
    }

    /// The sibling temporary path used while rewriting `link`.
    #[must_use]
    pub fn temp_path(&self, link: &Path) -> PathBuf {
        let mut name: OsString = link.as_os_str().to_owned();
        name.push(&self.temp_suffix);
        PathBuf::from(name)
    }

    /// Point `link` at `target`.
    ///
    /// If creating the temporary link fails, nothing was changed. If
    /// publishing fails, the temporary link is removed and the original
    /// link is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `LinkRewrite` naming the failed stage.
    pub fn rewrite(&self, link: &Path, target: &Path) -> Result<()> {
        let temp = self.temp_path(link);

        self.fs
            .symlink(target, &temp)
            .map_err(|source| Error::LinkRewrite {
                link: link.to_path_buf(),
                stage: RewriteStage::CreateTemp,
                source,
            })?;

        if let Err(source) = self.fs.rename(&temp, link) {
            if let Err(e) = self.fs.remove(&temp) {
                log::warn!("could not remove {}: {e}", temp.display());
            }
            return Err(Error::LinkRewrite {
                link: link.to_path_buf(),
                stage: RewriteStage::Publish,
                source,
            });
        }

        log::debug!("rewrote {} -> {}", link.display(), target.display());
        Ok(())
    }
}
