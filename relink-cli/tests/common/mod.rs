//! Common test utilities for CLI integration tests.

use assert_cmd::Command;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak host configuration into a run.
const CLEARED_VARS: [&str; 8] = [
    "RELINK_CONFIG",
    "RELINK_MODE",
    "RELINK_MAX_DEPTH",
    "RELINK_TEMP_SUFFIX",
    "RELINK_BACKUP_SUFFIX",
    "RELINK_PRESERVE_TIMES",
    "RELINK_LOG_MODE",
    "RELINK_OUTPUT_FORMAT",
];

/// Isolated environment holding a sysroot under `<temp>/root` and a home
/// directory at `<temp>/home`.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// The sysroot handed to commands
    pub root: PathBuf,
    /// `HOME` for spawned commands
    pub home: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new environment with empty root and home directories.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let root = temp_path.join("root");
        let home = temp_path.join("home");
        std::fs::create_dir_all(&root).expect("Failed to create root");
        std::fs::create_dir_all(&home).expect("Failed to create home");

        Self {
            temp_dir,
            temp_path,
            root,
            home,
        }
    }

    /// A `relink` command with `HOME` pointed into the environment and the
    /// `RELINK_*` variables cleared.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("relink").expect("Failed to find relink binary");
        cmd.env("HOME", &self.home);
        for var in CLEARED_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// The root path as a string argument.
    pub fn root_arg(&self) -> &str {
        self.root.to_str().expect("temp path is not UTF-8")
    }

    /// Absolute path of `rel` inside the root.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Create a directory inside the root.
    pub fn dir(&self, rel: &str) -> &Self {
        std::fs::create_dir_all(self.path(rel)).expect("Failed to create directory");
        self
    }

    /// Create a regular file inside the root.
    pub fn file(&self, rel: &str, contents: &[u8]) -> &Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent");
        }
        std::fs::write(path, contents).expect("Failed to write file");
        self
    }

    /// Create a symlink inside the root storing `target` verbatim.
    pub fn link(&self, rel: &str, target: &str) -> &Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent");
        }
        symlink(target, path).expect("Failed to create symlink");
        self
    }

    /// The target stored in the link at `rel`.
    pub fn read_link(&self, rel: &str) -> PathBuf {
        std::fs::read_link(self.path(rel)).expect("Failed to read link")
    }

    /// Whether `rel` is itself a symlink.
    pub fn is_link(&self, rel: &str) -> bool {
        std::fs::symlink_metadata(self.path(rel))
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
    }

    /// Write `contents` as the root's `.relink.yaml`.
    pub fn root_config(&self, contents: &str) -> &Self {
        std::fs::write(self.root.join(".relink.yaml"), contents).expect("Failed to write config");
        self
    }

    /// Write a file outside the root and return its path.
    pub fn outside_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// The libfoo chain used by most tests:
    /// `/lib/libfoo.so -> libfoo.so.1 -> /usr/lib/libfoo.so.1.0`.
    pub fn libfoo(&self) -> &Self {
        self.file("usr/lib/libfoo.so.1.0", b"\x7fELF")
            .link("lib/libfoo.so", "libfoo.so.1")
            .link("lib/libfoo.so.1", "/usr/lib/libfoo.so.1.0")
    }
}

/// Path helper for assertions.
#[allow(dead_code)]
pub fn p(s: &str) -> &Path {
    Path::new(s)
}
