//! Replacing symlinks with copies of the files they point at.
//!
//! Unlike the rewriter, the materializer resolves links natively: a link to
//! `/etc/ssl/cert.pem` is copied from the host's file. Links whose final
//! target is missing or a directory are skipped.
//!
//! For each link the protocol is:
//!
//! 1. copy the target (content, mode, times) to `<link><backup_suffix>`;
//! 2. remove the link;
//! 3. copy the target into a new regular file at the link path;
//! 4. copy the mode of the backup onto the new file;
//! 5. remove the backup.
//!
//! If step 3 or 4 fails after the link was removed, the original symlink is
//! recreated (or, failing that, the backup is moved into place) so the link
//! path is never left missing.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use filetime::FileTime;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::logging::Logger;
use crate::operations::report::{LinkOutcome, RunReport, SkipReason};
use crate::path::canonicalize::follow_native;
use crate::path::Sysroot;

/// Default suffix of the backup file created next to the link.
pub const DEFAULT_BACKUP_SUFFIX: &str = ".bak";

/// Links followed natively before giving up, matching the kernel's limit.
const NATIVE_MAX_DEPTH: usize = 40;

/// The step of the materialize protocol that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterializeStage {
    /// Copying the target to the backup path.
    Backup,
    /// Removing the symlink.
    RemoveLink,
    /// Copying the target to the link path.
    Copy,
    /// Applying the backup's mode to the new file.
    RestoreMode,
    /// Removing the backup.
    RemoveBackup,
}

impl fmt::Display for MaterializeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Backup => "backup",
            Self::RemoveLink => "remove link",
            Self::Copy => "copy",
            Self::RestoreMode => "restore mode",
            Self::RemoveBackup => "remove backup",
        };
        write!(f, "{name}")
    }
}

/// Options for a materialize run.
#[derive(Debug, Clone)]
pub struct MaterializeOptions {
    /// Suffix of the backup file.
    pub backup_suffix: String,
    /// Copy access and modification times along with the content.
    pub preserve_times: bool,
    /// Report what would happen without touching the tree.
    pub dry_run: bool,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            preserve_times: true,
            dry_run: false,
        }
    }
}

impl MaterializeOptions {
    /// Set dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set the backup suffix.
    #[must_use]
    pub fn with_backup_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.backup_suffix = suffix.into();
        self
    }

    /// Set whether timestamps are preserved.
    #[must_use]
    pub fn with_preserve_times(mut self, preserve: bool) -> Self {
        self.preserve_times = preserve;
        self
    }
}

/// Walks a tree and materializes every link to a regular file.
///
/// # Examples
///
/// ```no_run
/// use relink::materialize::{MaterializeOptions, Materializer};
/// use relink::path::Sysroot;
/// use relink::Logger;
/// use std::path::Path;
///
/// let root = Sysroot::open(Path::new("/opt/sysroot")).unwrap();
/// let materializer = Materializer::new(MaterializeOptions::default().with_dry_run(true));
/// let report = materializer.run(&root, &Logger::default()).unwrap();
/// println!("{}", report.summary());
/// ```
#[derive(Debug)]
pub struct Materializer<'a> {
    options: MaterializeOptions,
    interrupt: Option<&'a AtomicBool>,
}

impl<'a> Materializer<'a> {
    /// Create a materializer.
    #[must_use]
    pub fn new(options: MaterializeOptions) -> Self {
        Self {
            options,
            interrupt: None,
        }
    }

    /// Stop between links once `flag` is set.
    #[must_use]
    pub fn with_interrupt(mut self, flag: &'a AtomicBool) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// The backup path used while materializing `link`.
    #[must_use]
    pub fn backup_path(&self, link: &Path) -> PathBuf {
        let mut name: OsString = link.as_os_str().to_owned();
        name.push(&self.options.backup_suffix);
        PathBuf::from(name)
    }

    /// Walk `root` and materialize every symlink found, file or directory
    /// entry alike.
    ///
    /// Per-link failures are recorded in the report; the walk continues.
    ///
    /// # Errors
    ///
    /// Returns `Interrupted` if the interrupt flag was raised, or an I/O
    /// error if the root itself cannot be read.
    pub fn run(&self, root: &Sysroot, logger: &Logger) -> Result<RunReport> {
        let mut report = RunReport::new(self.options.dry_run);

        for entry in WalkDir::new(root.path()).follow_links(false) {
            if self.interrupt.is_some_and(|flag| flag.load(Ordering::SeqCst)) {
                return Err(Error::Interrupted);
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    let io = e
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "unreadable root"));
                    return Err(Error::from_io(root.path(), io));
                }
                Err(e) => {
                    logger.error(&format!("cannot walk entry: {e}"));
                    continue;
                }
            };

            if !entry.path_is_symlink() {
                continue;
            }

            let outcome = self.materialize_link(entry.path());
            match &outcome {
                LinkOutcome::Materialized { link, source } => {
                    logger.link("materialized", link, source.display());
                }
                LinkOutcome::WouldMaterialize { link, source } => {
                    logger.link("would materialize", link, source.display());
                }
                LinkOutcome::Skipped {
                    link,
                    reason: reason @ SkipReason::Dangling { .. },
                } => {
                    logger.warn(&format!("skipping {}: {reason}", link.display()));
                }
                LinkOutcome::Skipped { link, reason } => {
                    logger.info(&format!("skipping {}: {reason}", link.display()));
                }
                LinkOutcome::Failed { error, .. } => logger.error(&error.to_string()),
                _ => {}
            }
            report.push(outcome);
        }

        Ok(report)
    }

    /// Materialize a single link.
    #[must_use]
    pub fn materialize_link(&self, link: &Path) -> LinkOutcome {
        let source = match follow_native(link, NATIVE_MAX_DEPTH) {
            Ok(source) => source,
            Err(error) => {
                return LinkOutcome::Failed {
                    link: link.to_path_buf(),
                    error,
                }
            }
        };

        let metadata = match fs::metadata(&source) {
            Ok(metadata) => metadata,
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                return LinkOutcome::Skipped {
                    link: link.to_path_buf(),
                    reason: SkipReason::Dangling { target: source },
                }
            }
            Err(e) => {
                return LinkOutcome::Failed {
                    link: link.to_path_buf(),
                    error: Error::from_io(&source, e),
                }
            }
        };

        if metadata.is_dir() {
            return LinkOutcome::Skipped {
                link: link.to_path_buf(),
                reason: SkipReason::Directory,
            };
        }

        if !metadata.is_file() {
            return LinkOutcome::Skipped {
                link: link.to_path_buf(),
                reason: SkipReason::NotRegularFile,
            };
        }

        if self.options.dry_run {
            return LinkOutcome::WouldMaterialize {
                link: link.to_path_buf(),
                source,
            };
        }

        match self.replace(link, &source) {
            Ok(()) => LinkOutcome::Materialized {
                link: link.to_path_buf(),
                source,
            },
            Err(error) => LinkOutcome::Failed {
                link: link.to_path_buf(),
                error,
            },
        }
    }

    fn replace(&self, link: &Path, source: &Path) -> Result<()> {
        let backup = self.backup_path(link);
        let fail = |stage, source| Error::Materialize {
            link: link.to_path_buf(),
            stage,
            source,
        };

        let original_target = fs::read_link(link).map_err(|e| fail(MaterializeStage::RemoveLink, e))?;

        if let Err(e) = self.copy_with_metadata(source, &backup) {
            discard(&backup);
            return Err(fail(MaterializeStage::Backup, e));
        }

        if let Err(e) = fs::remove_file(link) {
            discard(&backup);
            return Err(fail(MaterializeStage::RemoveLink, e));
        }

        if let Err(e) = self.copy_with_metadata(source, link) {
            discard(link);
            restore(link, &original_target, &backup);
            return Err(fail(MaterializeStage::Copy, e));
        }

        let mode = fs::metadata(&backup).map(|m| m.permissions());
        if let Err(e) = mode.and_then(|perms| fs::set_permissions(link, perms)) {
            discard(link);
            restore(link, &original_target, &backup);
            return Err(fail(MaterializeStage::RestoreMode, e));
        }

        fs::remove_file(&backup).map_err(|e| fail(MaterializeStage::RemoveBackup, e))?;
        log::debug!("materialized {} from {}", link.display(), source.display());
        Ok(())
    }

    /// Copy content and permission bits, and times unless disabled.
    fn copy_with_metadata(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to)?;
        if self.options.preserve_times {
            let metadata = fs::metadata(from)?;
            filetime::set_file_times(
                to,
                FileTime::from_last_access_time(&metadata),
                FileTime::from_last_modification_time(&metadata),
            )?;
        }
        Ok(())
    }
}

/// Best-effort removal of a partial artifact.
fn discard(path: &Path) {
    if fs::symlink_metadata(path).is_ok() {
        if let Err(e) = fs::remove_file(path) {
            log::warn!("could not remove {}: {e}", path.display());
        }
    }
}

/// Put something back at `link` after a failed copy.
fn restore(link: &Path, original_target: &Path, backup: &Path) {
    match std::os::unix::fs::symlink(original_target, link) {
        Ok(()) => discard(backup),
        Err(e) => {
            log::warn!("could not recreate link {}: {e}", link.display());
            if let Err(e) = fs::rename(backup, link) {
                log::warn!("could not restore backup {}: {e}", backup.display());
            }
        }
    }
}
