//! Error types for the relink library.
//!
//! This module provides the error hierarchy for all operations in the relink
//! library, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a relink error.
///
/// # Examples
///
/// ```
/// use relink::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(100)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the relink library.
#[derive(Debug, Error)]
pub enum Error {
    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// The path given as a root exists but is not a directory.
    #[error("not a directory: {}", path.display())]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// A path does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Permission denied accessing a path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// Native resolution revisited a link.
    #[error("symlink loop detected: {}", path.display())]
    SymlinkLoop {
        /// The path where the loop was detected.
        path: PathBuf,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rewriting a single link failed at a specific stage.
    #[error("failed to rewrite {} ({stage}): {source}", link.display())]
    LinkRewrite {
        /// The link being rewritten.
        link: PathBuf,
        /// The protocol stage that failed.
        stage: crate::rewrite::RewriteStage,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Materializing a single link failed at a specific stage.
    #[error("failed to materialize {} ({stage}): {source}", link.display())]
    Materialize {
        /// The link being materialized.
        link: PathBuf,
        /// The protocol stage that failed.
        stage: crate::materialize::MaterializeStage,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The run was interrupted by the user.
    #[error("operation interrupted by user")]
    Interrupted,
}

impl Error {
    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use relink::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// Check if error is permission-related.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Check if the error describes an unusable root directory.
    ///
    /// These are the structural input errors that abort a run before any
    /// link is touched.
    #[must_use]
    pub fn is_invalid_root(&self) -> bool {
        matches!(
            self,
            Self::NotADirectory { .. } | Self::PathNotFound { .. } | Self::InvalidPath { .. }
        )
    }

    /// Map an I/O error on `path` to the closest library error.
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::PathNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::Io(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_invalid_path_error() {
        let err = Error::InvalidPath {
            path: PathBuf::from("/invalid/path"),
            reason: "does not exist".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("invalid path"));
        assert!(display.contains("/invalid/path"));
        assert!(display.contains("does not exist"));
    }

    #[test]
    fn test_not_a_directory_error() {
        let err = Error::NotADirectory {
            path: PathBuf::from("/etc/hostname"),
        };
        assert_eq!(format!("{err}"), "not a directory: /etc/hostname");
        assert!(err.is_invalid_root());
    }

    #[test]
    fn test_validation_error() {
        let err = Error::Validation {
            field: "temp_suffix".to_string(),
            message: "must not be empty".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("temp_suffix"));
        assert!(display.contains("must not be empty"));
    }

    #[test]
    fn test_link_rewrite_error_names_link_and_stage() {
        let err = Error::LinkRewrite {
            link: PathBuf::from("/sysroot/lib/libc.so"),
            stage: crate::rewrite::RewriteStage::Publish,
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let display = format!("{err}");
        assert!(display.contains("/sysroot/lib/libc.so"));
        assert!(display.contains("publish"));
        assert!(display.contains("denied"));
    }

    #[test]
    fn test_from_io_maps_kinds() {
        let path = PathBuf::from("/x");
        let err = Error::from_io(&path, io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.is_not_found());

        let err = Error::from_io(
            &path,
            io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(err.is_permission_denied());

        let err = Error::from_io(&path, io::Error::new(io::ErrorKind::Other, "other"));
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_interrupted_error() {
        assert_eq!(
            format!("{}", Error::Interrupted),
            "operation interrupted by user"
        );
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<u16> {
            Err(Error::Interrupted)
        }

        assert!(returns_result().is_err());
    }
}
