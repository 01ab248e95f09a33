//! Core path types.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// A root-rebased path: `/` means the root of the sysroot.
///
/// Always absolute and free of `.`/`..` components. It has no meaning on
/// its own; pair it with a [`Sysroot`](super::Sysroot) to find the file on
/// disk.
///
/// # Examples
///
/// ```
/// use relink::path::LogicalPath;
///
/// let logical = LogicalPath::new("usr/lib/../lib64/libm.so.6");
/// assert_eq!(logical.as_path().to_str(), Some("/usr/lib64/libm.so.6"));
/// assert!(!logical.is_root());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LogicalPath(PathBuf);

impl LogicalPath {
    /// Builds a logical path from any path, anchoring it at `/`.
    ///
    /// Leading separators are collapsed and `..` is clamped at the root.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self(super::normalize::clamp_components(
            &Path::new("/").join(path.as_ref()),
        ))
    }

    /// The root of the sysroot.
    #[must_use]
    pub fn root() -> Self {
        Self(PathBuf::from("/"))
    }

    /// Get a reference to the path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// The path without its leading `/`, suitable for joining under a root.
    #[must_use]
    pub fn relative_part(&self) -> &Path {
        self.0.strip_prefix("/").unwrap_or(&self.0)
    }

    /// Whether this is the sysroot root itself.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.relative_part().as_os_str().is_empty()
    }

    /// Convert into the underlying `PathBuf`.
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for LogicalPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
