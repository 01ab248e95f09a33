//! Per-link outcomes and the report collected over a run.
//!
//! A failure while handling one link never aborts the run. It is recorded as
//! [`LinkOutcome::Failed`] and the next link is processed.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Why a link was left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The link's final target does not exist.
    Dangling {
        /// Where resolution ended.
        target: PathBuf,
    },
    /// The link's final target is a directory.
    Directory,
    /// The link's final target is a device, fifo or socket.
    NotRegularFile,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dangling { target } => write!(f, "target {} does not exist", target.display()),
            Self::Directory => write!(f, "target is a directory"),
            Self::NotRegularFile => write!(f, "target is not a regular file"),
        }
    }
}

/// What happened to a single link.
#[derive(Debug)]
pub enum LinkOutcome {
    /// The link now points at `target`.
    Rewritten {
        /// The link.
        link: PathBuf,
        /// Its new target.
        target: PathBuf,
    },
    /// Dry run: the link would point at `target`.
    WouldRewrite {
        /// The link.
        link: PathBuf,
        /// The target that would be written.
        target: PathBuf,
    },
    /// The link already held the resolved target.
    Unchanged {
        /// The link.
        link: PathBuf,
    },
    /// The link was replaced by a copy of `source`.
    Materialized {
        /// The former link, now a regular file.
        link: PathBuf,
        /// The file that was copied.
        source: PathBuf,
    },
    /// Dry run: the link would be replaced by a copy of `source`.
    WouldMaterialize {
        /// The link.
        link: PathBuf,
        /// The file that would be copied.
        source: PathBuf,
    },
    /// The link was deliberately not touched.
    Skipped {
        /// The link.
        link: PathBuf,
        /// Why.
        reason: SkipReason,
    },
    /// Handling the link failed; it was left as it was.
    Failed {
        /// The link.
        link: PathBuf,
        /// The cause.
        error: Error,
    },
}

impl LinkOutcome {
    /// The link this outcome is about.
    #[must_use]
    pub fn link(&self) -> &Path {
        match self {
            Self::Rewritten { link, .. }
            | Self::WouldRewrite { link, .. }
            | Self::Unchanged { link }
            | Self::Materialized { link, .. }
            | Self::WouldMaterialize { link, .. }
            | Self::Skipped { link, .. }
            | Self::Failed { link, .. } => link,
        }
    }

    /// Whether the outcome is a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Whether the outcome changed (or in a dry run, would change) the link.
    #[must_use]
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            Self::Rewritten { .. }
                | Self::WouldRewrite { .. }
                | Self::Materialized { .. }
                | Self::WouldMaterialize { .. }
        )
    }
}

impl fmt::Display for LinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rewritten { link, target } => {
                write!(f, "rewrote {} -> {}", link.display(), target.display())
            }
            Self::WouldRewrite { link, target } => {
                write!(f, "would rewrite {} -> {}", link.display(), target.display())
            }
            Self::Unchanged { link } => write!(f, "unchanged {}", link.display()),
            Self::Materialized { link, source } => {
                write!(f, "materialized {} from {}", link.display(), source.display())
            }
            Self::WouldMaterialize { link, source } => {
                write!(
                    f,
                    "would materialize {} from {}",
                    link.display(),
                    source.display()
                )
            }
            Self::Skipped { link, reason } => write!(f, "skipped {}: {reason}", link.display()),
            Self::Failed { link, error } => write!(f, "failed {}: {error}", link.display()),
        }
    }
}

/// Outcomes of every link handled in one run, in processing order.
#[derive(Debug, Default)]
pub struct RunReport {
    dry_run: bool,
    outcomes: Vec<LinkOutcome>,
}

impl RunReport {
    /// Create an empty report.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            outcomes: Vec::new(),
        }
    }

    /// Record an outcome.
    pub fn push(&mut self, outcome: LinkOutcome) {
        self.outcomes.push(outcome);
    }

    /// Whether the run made no changes by request.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// All outcomes in processing order.
    #[must_use]
    pub fn outcomes(&self) -> &[LinkOutcome] {
        &self.outcomes
    }

    /// Number of links handled.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether no link was handled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Links that were (or would be) changed.
    #[must_use]
    pub fn changed(&self) -> usize {
        self.count(LinkOutcome::is_change)
    }

    /// Links that already had the right target.
    #[must_use]
    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, LinkOutcome::Unchanged { .. }))
    }

    /// Links left alone on purpose.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, LinkOutcome::Skipped { .. }))
    }

    /// Links whose handling failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(LinkOutcome::is_failure)
    }

    /// The failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &LinkOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    fn count(&self, pred: impl Fn(&LinkOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }

    /// One-line summary of the counts.
    #[must_use]
    pub fn summary(&self) -> String {
        let verb = if self.dry_run { "would change" } else { "changed" };
        format!(
            "{} links: {} {verb}, {} unchanged, {} skipped, {} failed",
            self.len(),
            self.changed(),
            self.unchanged(),
            self.skipped(),
            self.failed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn sample(dry_run: bool) -> RunReport {
        let mut report = RunReport::new(dry_run);
        report.push(LinkOutcome::Rewritten {
            link: PathBuf::from("/r/lib/a"),
            target: PathBuf::from("/usr/lib/a.1"),
        });
        report.push(LinkOutcome::Unchanged {
            link: PathBuf::from("/r/lib/b"),
        });
        report.push(LinkOutcome::Skipped {
            link: PathBuf::from("/r/bin"),
            reason: SkipReason::Directory,
        });
        report.push(LinkOutcome::Failed {
            link: PathBuf::from("/r/lib/c"),
            error: Error::Io(io::Error::new(io::ErrorKind::Other, "boom")),
        });
        report
    }

    #[test]
    fn test_counts() {
        let report = sample(false);
        assert_eq!(report.len(), 4);
        assert_eq!(report.changed(), 1);
        assert_eq!(report.unchanged(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(
            report.failures().map(LinkOutcome::link).collect::<Vec<_>>(),
            vec![Path::new("/r/lib/c")]
        );
    }

    #[test]
    fn test_summary_wording() {
        assert_eq!(
            sample(false).summary(),
            "4 links: 1 changed, 1 unchanged, 1 skipped, 1 failed"
        );
        assert!(sample(true).summary().contains("1 would change"));
        assert_eq!(
            RunReport::new(false).summary(),
            "0 links: 0 changed, 0 unchanged, 0 skipped, 0 failed"
        );
    }

    #[test]
    fn test_outcome_display() {
        let outcome = LinkOutcome::WouldRewrite {
            link: PathBuf::from("/r/lib/libz.so"),
            target: PathBuf::from("libz.so.1"),
        };
        assert_eq!(outcome.to_string(), "would rewrite /r/lib/libz.so -> libz.so.1");

        let skipped = LinkOutcome::Skipped {
            link: PathBuf::from("/r/x"),
            reason: SkipReason::Dangling {
                target: PathBuf::from("/nowhere"),
            },
        };
        assert_eq!(skipped.to_string(), "skipped /r/x: target /nowhere does not exist");
    }
}
