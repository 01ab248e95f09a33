//! Link operations using the plan-execute pattern.
//!
//! # Architecture
//!
//! A fix run is split into two phases:
//! 1. **Planning**: collects the snapshot and resolves every link against it
//! 2. **Execution**: rewrites the links the plan marks, one at a time
//!
//! Because every resolution happens before the first write, rewriting one
//! link never changes how another is resolved in the same run.
//!
//! # Examples
//!
//! ```no_run
//! use relink::operations::{FixExecutor, FixOptions, FixPlanner};
//! use relink::path::Sysroot;
//! use std::path::Path;
//!
//! let root = Sysroot::open(Path::new("/opt/sysroot")).unwrap();
//! let options = FixOptions::default();
//!
//! // Generate plan
//! let plan = FixPlanner::new(&options).build_plan(&root).unwrap();
//!
//! // Execute plan
//! let report = FixExecutor::new(&options.temp_suffix).execute(plan).unwrap();
//! println!("{}", report.summary());
//! ```

pub mod executor;
pub mod fix;
pub mod inspect;
pub mod plan;
pub mod report;

pub use executor::FixExecutor;
pub use fix::{fix_symlinks, FixOptions, FixPlanner};
pub use inspect::{inspect, inspect_snapshot, LinkReport};
pub use plan::{FixAction, FixPlan};
pub use report::{LinkOutcome, RunReport, SkipReason};
