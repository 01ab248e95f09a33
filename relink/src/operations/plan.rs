//! Plan types for the fix operation.
//!
//! A plan is computed entirely from the pre-mutation snapshot. Nothing is
//! written while planning, so every resolution sees the same tree.

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::resolve::ResolvedLink;

use super::report::SkipReason;

/// What to do with one link.
#[derive(Debug)]
pub enum FixAction {
    /// Point the link at `new_target`.
    Rewrite(ResolvedLink),
    /// The link already holds its resolved target.
    Keep(ResolvedLink),
    /// The link is not retargeted, e.g. because it leads to a directory.
    Skip {
        /// The link.
        link: PathBuf,
        /// Why it is left alone.
        reason: SkipReason,
    },
    /// The chain could not be followed.
    Unresolvable {
        /// The link.
        link: PathBuf,
        /// Why following failed.
        error: Error,
    },
}

impl FixAction {
    /// The link this action is about.
    #[must_use]
    pub fn link(&self) -> &Path {
        match self {
            Self::Rewrite(resolved) | Self::Keep(resolved) => &resolved.link_path,
            Self::Skip { link, .. } | Self::Unresolvable { link, .. } => link,
        }
    }

    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Rewrite(r) => format!(
                "Rewrite {}: {} -> {}",
                r.link_path.display(),
                r.original.display(),
                r.new_target.display()
            ),
            Self::Keep(r) => format!(
                "Keep {} -> {}",
                r.link_path.display(),
                r.original.display()
            ),
            Self::Skip { link, reason } => format!("Skip {}: {reason}", link.display()),
            Self::Unresolvable { link, error } => {
                format!("Cannot resolve {}: {error}", link.display())
            }
        }
    }
}

/// All actions for one fix run, in link path order.
#[derive(Debug)]
pub struct FixPlan {
    /// The root the plan was computed for.
    pub root: PathBuf,

    /// One action per collected link.
    pub actions: Vec<FixAction>,

    /// Cycles and depth-cap hits, for the user.
    pub warnings: Vec<String>,
}

impl FixPlan {
    /// Creates an empty plan for `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: FixAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Number of links the plan would rewrite.
    #[must_use]
    pub fn rewrites(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, FixAction::Rewrite(_)))
            .count()
    }
}
