//! Fix operation planning.
//!
//! Planning collects the snapshot, resolves every link against it and
//! decides per link whether it needs rewriting. It never touches the tree.

use std::sync::atomic::AtomicBool;

use crate::error::Result;
use crate::logging::Logger;
use crate::path::Sysroot;
use crate::resolve::{ChainResolver, OutputMode, Resolution, DEFAULT_MAX_DEPTH};
use crate::rewrite::DEFAULT_TEMP_SUFFIX;
use crate::snapshot::Snapshot;

use super::executor::FixExecutor;
use super::plan::{FixAction, FixPlan};
use super::report::{RunReport, SkipReason};

/// Options for a fix operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOptions {
    /// Output form of rewritten targets.
    pub mode: OutputMode,

    /// Maximum links followed in one chain.
    pub max_depth: usize,

    /// Suffix of the temporary link used while rewriting.
    pub temp_suffix: String,

    /// Report what would change without writing.
    pub dry_run: bool,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            temp_suffix: DEFAULT_TEMP_SUFFIX.to_string(),
            dry_run: false,
        }
    }
}

impl FixOptions {
    /// Sets the output mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the depth cap.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the temporary link suffix.
    #[must_use]
    pub fn with_temp_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.temp_suffix = suffix.into();
        self
    }

    /// Sets dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Builds a [`FixPlan`] for a root.
///
/// # Examples
///
/// ```no_run
/// use relink::operations::{FixOptions, FixPlanner};
/// use relink::path::Sysroot;
/// use relink::OutputMode;
/// use std::path::Path;
///
/// let root = Sysroot::open(Path::new("/opt/sysroot")).unwrap();
/// let options = FixOptions::default().with_mode(OutputMode::Relative);
/// let plan = FixPlanner::new(&options).build_plan(&root).unwrap();
/// for action in &plan.actions {
///     println!("{}", action.description());
/// }
/// ```
#[derive(Debug)]
pub struct FixPlanner<'a> {
    options: &'a FixOptions,
}

impl<'a> FixPlanner<'a> {
    /// Creates a planner.
    #[must_use]
    pub const fn new(options: &'a FixOptions) -> Self {
        Self { options }
    }

    /// Collect the snapshot of `root` and plan it.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be walked.
    pub fn build_plan(&self, root: &Sysroot) -> Result<FixPlan> {
        let snapshot = Snapshot::collect(root)?;
        Ok(self.plan_snapshot(root, &snapshot))
    }

    /// Plan an already collected snapshot.
    ///
    /// Every link is resolved before any is written, so a rewrite earlier
    /// in the run cannot influence a later resolution.
    #[must_use]
    pub fn plan_snapshot(&self, root: &Sysroot, snapshot: &Snapshot) -> FixPlan {
        let resolver = ChainResolver::new(root)
            .with_max_depth(self.options.max_depth)
            .with_mode(self.options.mode);

        let mut plan = FixPlan::new(root.path());
        for record in snapshot.records() {
            if record.targets_directory() {
                plan = plan.add_action(FixAction::Skip {
                    link: record.link_path,
                    reason: SkipReason::Directory,
                });
                continue;
            }

            let action = match resolver.resolve(&record.link_path, &record.raw_target) {
                Ok(resolved) if resolver.ends_in_directory(&resolved.resolution) => {
                    FixAction::Skip {
                        link: resolved.link_path,
                        reason: SkipReason::Directory,
                    }
                }
                Ok(resolved) => {
                    match &resolved.resolution {
                        Resolution::Cycle { at, .. } => {
                            plan = plan.add_warning(format!(
                                "cycle detected resolving {} (closed at {})",
                                record.link_path.display(),
                                at.display()
                            ));
                        }
                        Resolution::DepthExceeded { .. } => {
                            plan = plan.add_warning(format!(
                                "chain from {} longer than {} links",
                                record.link_path.display(),
                                self.options.max_depth
                            ));
                        }
                        Resolution::Resolved { .. } => {}
                    }
                    if resolved.is_unchanged() {
                        FixAction::Keep(resolved)
                    } else {
                        FixAction::Rewrite(resolved)
                    }
                }
                Err(error) => FixAction::Unresolvable {
                    link: record.link_path,
                    error,
                },
            };
            plan = plan.add_action(action);
        }
        plan
    }
}

/// Resolve and rewrite every link under `root`.
///
/// # Errors
///
/// Returns an error if the root cannot be walked or the run was interrupted.
/// Per-link failures are recorded in the report.
pub fn fix_symlinks(
    root: &Sysroot,
    options: &FixOptions,
    logger: &Logger,
    interrupt: Option<&AtomicBool>,
) -> Result<RunReport> {
    let plan = FixPlanner::new(options).build_plan(root)?;
    for warning in &plan.warnings {
        logger.warn(warning);
    }

    let mut executor = FixExecutor::new(&options.temp_suffix).with_logger(*logger);
    if options.dry_run {
        executor = executor.dry_run();
    }
    if let Some(flag) = interrupt {
        executor = executor.with_interrupt(flag);
    }
    executor.execute(plan)
}
