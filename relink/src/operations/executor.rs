//! Plan execution engine.
//!
//! Takes a [`FixPlan`] and applies its rewrites through an
//! [`AtomicRewriter`]. In dry-run mode the rewriter is never called.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};
use crate::logging::Logger;
use crate::rewrite::{AtomicRewriter, LinkFs, SystemLinkFs};

use super::plan::{FixAction, FixPlan};
use super::report::{LinkOutcome, RunReport};

/// Executes fix plans.
///
/// # Examples
///
/// ```no_run
/// use relink::operations::{FixExecutor, FixOptions, FixPlanner};
/// use relink::path::Sysroot;
/// use std::path::Path;
///
/// let root = Sysroot::open(Path::new("/opt/sysroot")).unwrap();
/// let plan = FixPlanner::new(&FixOptions::default()).build_plan(&root).unwrap();
///
/// let report = FixExecutor::new(".tmp").dry_run().execute(plan).unwrap();
/// assert!(report.is_dry_run());
/// ```
pub struct FixExecutor<'a, F: LinkFs = SystemLinkFs> {
    rewriter: AtomicRewriter<F>,
    logger: Logger,
    dry_run: bool,
    interrupt: Option<&'a AtomicBool>,
}

impl<'a> FixExecutor<'a, SystemLinkFs> {
    /// Creates an executor writing to the real filesystem.
    #[must_use]
    pub fn new(temp_suffix: &str) -> Self {
        Self::with_rewriter(AtomicRewriter::new(temp_suffix))
    }
}

impl<'a, F: LinkFs> FixExecutor<'a, F> {
    /// Creates an executor around an existing rewriter.
    #[must_use]
    pub fn with_rewriter(rewriter: AtomicRewriter<F>) -> Self {
        Self {
            rewriter,
            logger: Logger::default(),
            dry_run: false,
            interrupt: None,
        }
    }

    /// Sets the executor to dry-run mode.
    #[must_use]
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Sets the logger used for per-link progress.
    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Stop between links once `flag` is set.
    #[must_use]
    pub fn with_interrupt(mut self, flag: &'a AtomicBool) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Executes the given plan.
    ///
    /// Each link is handled independently; a failure is recorded and the
    /// next action runs. The interrupt flag is checked before each action,
    /// so a link is never left half-processed.
    ///
    /// # Errors
    ///
    /// Returns `Interrupted` if the interrupt flag was raised.
    pub fn execute(&self, plan: FixPlan) -> Result<RunReport> {
        let mut report = RunReport::new(self.dry_run);
        log::debug!(
            "executing {} actions under {}",
            plan.len(),
            plan.root.display()
        );

        for action in plan.actions {
            if self.interrupt.is_some_and(|flag| flag.load(Ordering::SeqCst)) {
                return Err(Error::Interrupted);
            }
            report.push(self.execute_action(action));
        }

        Ok(report)
    }

    fn execute_action(&self, action: FixAction) -> LinkOutcome {
        match action {
            FixAction::Keep(resolved) => {
                self.logger
                    .link("unchanged", &resolved.link_path, resolved.original.display());
                LinkOutcome::Unchanged {
                    link: resolved.link_path,
                }
            }
            FixAction::Rewrite(resolved) if self.dry_run => {
                self.logger.link(
                    "would rewrite",
                    &resolved.link_path,
                    resolved.new_target.display(),
                );
                LinkOutcome::WouldRewrite {
                    link: resolved.link_path,
                    target: resolved.new_target,
                }
            }
            FixAction::Rewrite(resolved) => {
                match self
                    .rewriter
                    .rewrite(&resolved.link_path, &resolved.new_target)
                {
                    Ok(()) => {
                        self.logger.link(
                            "rewrote",
                            &resolved.link_path,
                            resolved.new_target.display(),
                        );
                        LinkOutcome::Rewritten {
                            link: resolved.link_path,
                            target: resolved.new_target,
                        }
                    }
                    Err(error) => {
                        self.logger.error(&error.to_string());
                        LinkOutcome::Failed {
                            link: resolved.link_path,
                            error,
                        }
                    }
                }
            }
            FixAction::Skip { link, reason } => {
                self.logger
                    .info(&format!("skipping {}: {reason}", link.display()));
                LinkOutcome::Skipped { link, reason }
            }
            FixAction::Unresolvable { link, error } => {
                self.logger
                    .error(&format!("cannot resolve {}: {error}", link.display()));
                LinkOutcome::Failed { link, error }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::fix::{FixOptions, FixPlanner};
    use crate::path::Sysroot;
    use crate::rewrite::tests::FailingLinkFs;
    use crate::rewrite::RewriteStage;
    use crate::LogLevel;
    use std::fs;
    use std::os::unix::fs::symlink;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    fn two_link_tree() -> (TempDir, Sysroot) {
        let dir = tempdir().unwrap();
        let root = Sysroot::open(dir.path()).unwrap();
        fs::create_dir_all(root.path().join("usr/lib")).unwrap();
        fs::write(root.path().join("usr/lib/libc.so.6"), b"elf").unwrap();
        symlink("libc.so.6", root.path().join("usr/lib/libc.so")).unwrap();
        symlink("/usr/lib/libc.so.6", root.path().join("usr/lib/libc.so.x")).unwrap();
        (dir, root)
    }

    fn quiet() -> Logger {
        Logger::new(LogLevel::Quiet)
    }

    #[test]
    fn test_execute_rewrites_and_keeps() {
        let (_dir, root) = two_link_tree();
        let plan = FixPlanner::new(&FixOptions::default())
            .build_plan(&root)
            .unwrap();

        let report = FixExecutor::new(".tmp")
            .with_logger(quiet())
            .execute(plan)
            .unwrap();

        assert_eq!(report.changed(), 1);
        assert_eq!(report.unchanged(), 1);
        assert_eq!(
            fs::read_link(root.path().join("usr/lib/libc.so")).unwrap(),
            PathBuf::from("/usr/lib/libc.so.6")
        );
    }

    #[test]
    fn test_dry_run_makes_no_changes() {
        let (_dir, root) = two_link_tree();
        let plan = FixPlanner::new(&FixOptions::default())
            .build_plan(&root)
            .unwrap();

        let report = FixExecutor::new(".tmp")
            .with_logger(quiet())
            .dry_run()
            .execute(plan)
            .unwrap();

        assert!(matches!(
            report.outcomes()[0],
            LinkOutcome::WouldRewrite { .. }
        ));
        assert_eq!(
            fs::read_link(root.path().join("usr/lib/libc.so")).unwrap(),
            PathBuf::from("libc.so.6")
        );
    }

    #[test]
    fn test_failed_rewrite_is_recorded_and_run_continues() {
        let dir = tempdir().unwrap();
        let root = Sysroot::open(dir.path()).unwrap();
        fs::write(root.path().join("f"), b"x").unwrap();
        symlink("f", root.path().join("a")).unwrap();
        symlink("f", root.path().join("b")).unwrap();

        let plan = FixPlanner::new(&FixOptions::default())
            .build_plan(&root)
            .unwrap();
        let rewriter = AtomicRewriter::with_fs(FailingLinkFs::new(RewriteStage::Publish), ".tmp");
        let report = FixExecutor::with_rewriter(rewriter)
            .with_logger(quiet())
            .execute(plan)
            .unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report.failed(), 2);
        for name in ["a", "b"] {
            assert_eq!(
                fs::read_link(root.path().join(name)).unwrap(),
                PathBuf::from("f")
            );
            assert!(fs::symlink_metadata(root.path().join(format!("{name}.tmp"))).is_err());
        }
    }

    #[test]
    fn test_interrupt_before_first_action() {
        let (_dir, root) = two_link_tree();
        let plan = FixPlanner::new(&FixOptions::default())
            .build_plan(&root)
            .unwrap();

        let flag = AtomicBool::new(true);
        let result = FixExecutor::new(".tmp")
            .with_logger(quiet())
            .with_interrupt(&flag)
            .execute(plan);

        assert!(matches!(result, Err(Error::Interrupted)));
        assert_eq!(
            fs::read_link(root.path().join("usr/lib/libc.so")).unwrap(),
            PathBuf::from("libc.so.6")
        );
    }
}
