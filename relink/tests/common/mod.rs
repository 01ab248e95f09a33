//! Common test utilities for integration tests.
//!
//! [`SysrootFixture`] builds small sysroot trees inside a temporary directory.

use std::collections::BTreeMap;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

use relink::Sysroot;
use tempfile::TempDir;

/// A temporary directory opened as a sysroot.
///
/// Paths given to the builder methods are relative to the root, with or
/// without a leading `/`.
pub struct SysrootFixture {
    _dir: TempDir,
    root: Sysroot,
}

#[allow(dead_code)]
impl SysrootFixture {
    /// Creates an empty sysroot.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = Sysroot::open(dir.path()).expect("open sysroot");
        Self { _dir: dir, root }
    }

    /// The opened root.
    pub fn root(&self) -> &Sysroot {
        &self.root
    }

    /// Absolute on-disk path of `rel`.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel.trim_start_matches('/'))
    }

    /// Creates a directory and its parents.
    pub fn dir(self, rel: &str) -> Self {
        fs::create_dir_all(self.path(rel)).expect("create dir");
        self
    }

    /// Creates a regular file, creating parent directories.
    pub fn file(self, rel: &str, contents: &[u8]) -> Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, contents).expect("write file");
        self
    }

    /// Creates a symlink storing `target` verbatim, creating parent directories.
    pub fn link(self, rel: &str, target: &str) -> Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        symlink(target, path).expect("create symlink");
        self
    }

    /// The target stored in the link at `rel`.
    pub fn read_link(&self, rel: &str) -> PathBuf {
        fs::read_link(self.path(rel)).expect("read link")
    }

    /// Whether `rel` exists without following links.
    pub fn exists(&self, rel: &str) -> bool {
        fs::symlink_metadata(self.path(rel)).is_ok()
    }

    /// Whether `rel` is a symlink.
    pub fn is_link(&self, rel: &str) -> bool {
        fs::symlink_metadata(self.path(rel)).is_ok_and(|m| m.file_type().is_symlink())
    }

    /// Every link in the tree with its stored target, for before/after checks.
    pub fn links(&self) -> BTreeMap<PathBuf, PathBuf> {
        list_links(self.root.path())
    }
}

/// Lists links with plain `read_dir`, independent of the snapshot code.
fn list_links(root: &Path) -> BTreeMap<PathBuf, PathBuf> {
    let mut links = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).expect("read dir") {
            let entry = entry.expect("dir entry");
            let file_type = entry.file_type().expect("file type");
            if file_type.is_symlink() {
                let target = fs::read_link(entry.path()).expect("read link");
                links.insert(entry.path(), target);
            } else if file_type.is_dir() {
                pending.push(entry.path());
            }
        }
    }
    links
}
