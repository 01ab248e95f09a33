//! The confinement boundary for link resolution.
//!
//! A [`Sysroot`] maps between three views of a path:
//!
//! - the *raw* link target, exactly as stored in a symlink;
//! - the *real* location on disk, always under the root directory;
//! - the *logical* location, a [`LogicalPath`] where `/` is the root.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::normalize::{clamp_components, normalize};
use crate::path::types::LogicalPath;

/// An absolute, canonicalized directory that absolute link targets are
/// interpreted against.
///
/// # Examples
///
/// ```no_run
/// use relink::path::Sysroot;
/// use std::path::Path;
///
/// let root = Sysroot::open(Path::new("/opt/sysroots/aarch64")).unwrap();
/// let real = root.anchor(
///     &root.path().join("lib/libc.so"),
///     Path::new("/usr/lib/libc.so.6"),
/// );
/// assert_eq!(root.to_logical(&real).to_string(), "/usr/lib/libc.so.6");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sysroot {
    root: PathBuf,
}

impl Sysroot {
    /// Validate and canonicalize a root directory.
    ///
    /// # Errors
    ///
    /// Returns `PathNotFound` if the path does not exist, `NotADirectory` if
    /// it is not a directory, or an I/O error from canonicalization.
    pub fn open(path: &Path) -> Result<Self> {
        let normalized = normalize(path)?;

        let metadata = fs::metadata(&normalized).map_err(|e| Error::from_io(&normalized, e))?;
        if !metadata.is_dir() {
            return Err(Error::NotADirectory { path: normalized });
        }

        let root = fs::canonicalize(&normalized).map_err(|e| Error::from_io(&normalized, e))?;
        log::debug!("opened sysroot {}", root.display());
        Ok(Self { root })
    }

    /// The canonical root directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Locate a raw link target on disk.
    ///
    /// Absolute targets are anchored at the root; relative targets are
    /// joined to the directory containing `link`. The result is lexically
    /// normalized and never leaves the root.
    #[must_use]
    pub fn anchor(&self, link: &Path, raw_target: &Path) -> PathBuf {
        let logical = if raw_target.has_root() {
            LogicalPath::new(raw_target)
        } else {
            let link_dir = self.to_logical(link.parent().unwrap_or(&self.root));
            LogicalPath::new(link_dir.as_path().join(raw_target))
        };
        self.to_real(&logical)
    }

    /// Strip the root from a real path.
    ///
    /// Paths outside the root are treated as if they were already logical,
    /// which is how a chrooted process would see them.
    #[must_use]
    pub fn to_logical(&self, real: &Path) -> LogicalPath {
        match real.strip_prefix(&self.root) {
            Ok(inside) => LogicalPath::new(clamp_components(inside)),
            Err(_) => LogicalPath::new(real),
        }
    }

    /// Reinterpret a logical path as a real location under the root.
    #[must_use]
    pub fn to_real(&self, logical: &LogicalPath) -> PathBuf {
        if logical.is_root() {
            self.root.clone()
        } else {
            self.root.join(logical.relative_part())
        }
    }

    /// The relative path from `from_dir` (a real directory under the root)
    /// to the real location of `logical`.
    ///
    /// A target equal to `from_dir` is returned as `.`.
    #[must_use]
    pub fn relative_from(&self, from_dir: &Path, logical: &LogicalPath) -> PathBuf {
        let target = self.to_real(logical);
        match pathdiff::diff_paths(&target, from_dir) {
            Some(relative) if relative.as_os_str().is_empty() => PathBuf::from("."),
            Some(relative) => relative,
            None => target,
        }
    }
}
