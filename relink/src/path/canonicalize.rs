//! Native symlink resolution.
//!
//! These functions follow links the way the operating system does, including
//! absolute targets that leave the tree. The materializer relies on them;
//! confined resolution lives in [`crate::resolve`].

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Canonicalize an existing path, mapping I/O errors to library errors.
///
/// # Errors
///
/// Returns `PathNotFound`, `PermissionDenied` or `Io`.
///
/// # Examples
///
/// ```no_run
/// use relink::path::canonicalize::canonicalize;
/// use std::path::Path;
///
/// let canonical = canonicalize(Path::new("/tmp")).unwrap();
/// assert!(canonical.is_absolute());
/// ```
pub fn canonicalize(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| Error::from_io(path, e))
}

/// Follow a chain of symlinks natively, stopping at the first non-link.
///
/// Unlike [`canonicalize`], a dangling chain is not an error: the path the
/// chain ends at is returned so callers can report it. Existing endpoints
/// are fully canonicalized.
///
/// # Errors
///
/// Returns `SymlinkLoop` if a link is revisited, `InvalidPath` if more than
/// `max_depth` links are followed, or an I/O error from reading a link.
///
/// # Examples
///
/// ```no_run
/// use relink::path::canonicalize::follow_native;
/// use std::path::Path;
///
/// let end = follow_native(Path::new("/usr/lib/libc.so.6"), 40).unwrap();
/// assert!(end.is_absolute());
/// ```
pub fn follow_native(path: &Path, max_depth: usize) -> Result<PathBuf> {
    let mut visited = HashSet::new();
    let mut current = path.to_path_buf();

    loop {
        if !visited.insert(current.clone()) {
            return Err(Error::SymlinkLoop { path: current });
        }

        if visited.len() > max_depth {
            return Err(Error::InvalidPath {
                path: path.to_path_buf(),
                reason: format!("Too many symlinks (max {max_depth})"),
            });
        }

        match fs::read_link(&current) {
            Ok(target) => {
                current = if target.is_absolute() {
                    target
                } else {
                    let parent = current.parent().ok_or_else(|| Error::InvalidPath {
                        path: current.clone(),
                        reason: "Symlink has no parent directory".to_string(),
                    })?;
                    parent.join(target)
                };
            }
            // EINVAL: exists but is not a symlink.
            Err(e) if e.kind() == ErrorKind::InvalidInput => {
                return canonicalize(&current);
            }
            // A missing component, or a regular file used as a directory.
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                return Ok(current)
            }
            Err(e) => return Err(Error::from_io(&current, e)),
        }
    }
}
