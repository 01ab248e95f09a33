//! Pre-mutation snapshot of every symlink under a sysroot.
//!
//! The snapshot is taken once, before any link is rewritten, and is never
//! refreshed during a run. Every resolution in a run therefore sees the tree
//! as it was when the run started.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::path::Sysroot;

/// A symlink and the literal target stored in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRecord {
    /// Absolute path of the link under the root.
    pub link_path: PathBuf,
    /// The stored target, absolute or relative, possibly dangling.
    pub raw_target: PathBuf,
}

impl LinkRecord {
    /// Whether the link, followed natively, leads to a directory.
    #[must_use]
    pub fn targets_directory(&self) -> bool {
        fs::metadata(&self.link_path).is_ok_and(|m| m.is_dir())
    }
}

/// All symlinks under a root, keyed by link path.
///
/// Iteration is in sorted path order.
///
/// # Examples
///
/// ```no_run
/// use relink::path::Sysroot;
/// use relink::Snapshot;
/// use std::path::Path;
///
/// let root = Sysroot::open(Path::new("/opt/sysroot")).unwrap();
/// let snapshot = Snapshot::collect(&root).unwrap();
/// for record in snapshot.records() {
///     println!("{} -> {}", record.link_path.display(), record.raw_target.display());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    links: BTreeMap<PathBuf, PathBuf>,
}

impl Snapshot {
    /// Walk the root and record every symlink.
    ///
    /// Directory symlinks are recorded but not descended into; the fix
    /// planner leaves them alone. Entries that
    /// cannot be read are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only if the root directory itself cannot be read.
    pub fn collect(root: &Sysroot) -> Result<Self> {
        let mut snapshot = Self::default();

        for entry in WalkDir::new(root.path()).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    let io = e.into_io_error().unwrap_or_else(|| {
                        std::io::Error::new(std::io::ErrorKind::Other, "unreadable root")
                    });
                    return Err(Error::from_io(root.path(), io));
                }
                Err(e) => {
                    log::warn!("skipping unreadable entry: {e}");
                    continue;
                }
            };

            if !entry.path_is_symlink() {
                continue;
            }

            match fs::read_link(entry.path()) {
                Ok(target) => {
                    snapshot.insert(entry.path().to_path_buf(), target);
                }
                Err(e) => log::warn!("cannot read link {}: {e}", entry.path().display()),
            }
        }

        log::debug!(
            "collected {} symlinks under {}",
            snapshot.len(),
            root.path().display()
        );
        Ok(snapshot)
    }

    /// Record a link, replacing any earlier record for the same path.
    pub fn insert(&mut self, link_path: PathBuf, raw_target: PathBuf) {
        self.links.insert(link_path, raw_target);
    }

    /// The recorded target of `link_path`, if it was collected.
    #[must_use]
    pub fn get(&self, link_path: &Path) -> Option<&Path> {
        self.links.get(link_path).map(PathBuf::as_path)
    }

    /// Iterate over the records in path order.
    pub fn records(&self) -> impl Iterator<Item = LinkRecord> + '_ {
        self.links.iter().map(|(link_path, raw_target)| LinkRecord {
            link_path: link_path.clone(),
            raw_target: raw_target.clone(),
        })
    }

    /// Number of collected links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether no links were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
