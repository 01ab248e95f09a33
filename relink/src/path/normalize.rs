//! Lexical path normalization.
//!
//! Nothing in this module touches the filesystem except [`normalize`], which
//! reads the current directory to absolutize relative input. Symlinks are
//! never followed here; that is the job of [`crate::resolve`] (confined) and
//! [`crate::path::canonicalize`] (native).

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand tilde (~) to the home directory.
///
/// Handles `~` and `~/path`; `~user` is rejected.
///
/// # Errors
///
/// Returns an error if the path is not valid UTF-8, the home directory
/// cannot be determined, or `~user` syntax is used.
///
/// # Examples
///
/// ```
/// use relink::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/sysroots/arm64")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("sysroots/arm64"));
///
/// assert_eq!(expand_tilde(Path::new("/opt/sysroot")).unwrap(), Path::new("/opt/sysroot"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Some(path_str) = path.to_str() else {
        // Non-UTF-8 paths cannot start with a tilde we would expand.
        return Ok(path.to_path_buf());
    };

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;

    if path_str == "~" {
        Ok(home)
    } else if let Some(rest) = path_str.strip_prefix("~/") {
        Ok(home.join(rest))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Resolve `.` and `..` in a path, clamping `..` at the top.
///
/// This is chroot semantics: `/..` is `/`, and a relative path can never
/// climb above its first component. The result carries a leading root only
/// if the input did.
///
/// # Examples
///
/// ```
/// use relink::path::normalize::clamp_components;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(clamp_components(Path::new("/usr/./lib/../bin")), PathBuf::from("/usr/bin"));
/// assert_eq!(clamp_components(Path::new("/../../etc")), PathBuf::from("/etc"));
/// assert_eq!(clamp_components(Path::new("a/../../b")), PathBuf::from("b"));
/// ```
#[must_use]
pub fn clamp_components(path: &Path) -> PathBuf {
    let mut rooted = false;
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();

    for component in path.components() {
        match component {
            Component::RootDir | Component::Prefix(_) => rooted = true,
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop();
            }
            Component::Normal(part) => parts.push(part),
        }
    }

    let mut result = if rooted {
        PathBuf::from("/")
    } else {
        PathBuf::new()
    };
    result.extend(parts);
    result
}

/// Resolve `.` and `..` components in an absolute path.
///
/// Unlike [`clamp_components`], climbing above the root is an error: this is
/// used for user-supplied paths where a stray `..` is more likely a mistake
/// than an intent.
///
/// # Errors
///
/// Returns an error if the path contains too many `..` components.
///
/// # Examples
///
/// ```
/// use relink::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// let resolved = resolve_components(Path::new("/a/./b/../c")).unwrap();
/// assert_eq!(resolved, PathBuf::from("/a/c"));
/// assert!(resolve_components(Path::new("/a/../..")).is_err());
/// ```
pub fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::RootDir | Component::Prefix(_) => result.push(component.as_os_str()),
            Component::Normal(c) => result.push(c),
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() || result.as_os_str().is_empty() {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "Path contains too many '..' components (escapes root)"
                            .to_string(),
                    });
                }
            }
        }
    }

    Ok(result)
}

/// Normalize a user-supplied path to absolute form.
///
/// Expands `~`, absolutizes against the current directory and resolves
/// `.`/`..`. Symlinks are not followed.
///
/// # Errors
///
/// Returns an error if tilde expansion fails, the current directory cannot
/// be determined, or the path escapes the filesystem root.
///
/// # Examples
///
/// ```no_run
/// use relink::path::normalize::normalize;
/// use std::path::Path;
///
/// let normalized = normalize(Path::new("./sysroot")).unwrap();
/// assert!(normalized.is_absolute());
/// ```
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = env::current_dir().map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Cannot get current directory: {e}"),
        })?;
        cwd.join(expanded)
    };

    resolve_components(&absolute)
}
