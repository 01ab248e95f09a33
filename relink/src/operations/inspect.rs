//! Read-only inspection of the links under a root.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::resolve::{ChainResolver, Resolution};
use crate::snapshot::Snapshot;

/// One row of an inspection: a link, what it stores and where it leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkReport {
    /// The link.
    pub link_path: PathBuf,
    /// The target stored in the link.
    pub raw_target: PathBuf,
    /// The target a fix run would write, if resolution succeeded.
    pub resolved_target: Option<PathBuf>,
    /// `resolved`, `directory`, `cycle`, `depth-exceeded` or `error`.
    pub status: String,
    /// Links followed after the first one, for resolved chains.
    pub hops: Option<usize>,
    /// Whether a fix run would rewrite the link.
    pub needs_rewrite: bool,
}

/// Resolve every link in `snapshot` without writing anything.
#[must_use]
pub fn inspect_snapshot(resolver: &ChainResolver<'_>, snapshot: &Snapshot) -> Vec<LinkReport> {
    snapshot
        .records()
        .map(|record| match resolver.resolve(&record.link_path, &record.raw_target) {
            Ok(resolved)
                if record.targets_directory()
                    || resolver.ends_in_directory(&resolved.resolution) =>
            {
                LinkReport {
                    link_path: resolved.link_path,
                    raw_target: resolved.original,
                    resolved_target: None,
                    status: "directory".to_string(),
                    hops: None,
                    needs_rewrite: false,
                }
            }
            Ok(resolved) => {
                let hops = match resolved.resolution {
                    Resolution::Resolved { hops, .. } => Some(hops),
                    _ => None,
                };
                LinkReport {
                    needs_rewrite: !resolved.is_unchanged(),
                    status: resolved.resolution.kind().to_string(),
                    link_path: resolved.link_path,
                    raw_target: resolved.original,
                    resolved_target: Some(resolved.new_target),
                    hops,
                }
            }
            Err(e) => {
                log::debug!("cannot resolve {}: {e}", record.link_path.display());
                LinkReport {
                    link_path: record.link_path,
                    raw_target: record.raw_target,
                    resolved_target: None,
                    status: "error".to_string(),
                    hops: None,
                    needs_rewrite: false,
                }
            }
        })
        .collect()
}

/// Collect and inspect every link under the resolver's root.
///
/// # Errors
///
/// Returns an error if the root cannot be walked.
pub fn inspect(resolver: &ChainResolver<'_>) -> Result<Vec<LinkReport>> {
    let snapshot = Snapshot::collect(resolver.root())?;
    Ok(inspect_snapshot(resolver, &snapshot))
}
