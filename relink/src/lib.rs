#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # relink
//!
//! Repairs symlinks inside a copied sysroot.
//!
//! A sysroot copied away from `/` keeps links like
//! `lib/libz.so -> /usr/lib/libz.so.1`, which now point at the host. This
//! library follows every link chain *inside* the root and rewrites each link
//! to point straight at its final target, either as a root-relative absolute
//! path or relative to the link's directory. It can also replace links with
//! copies of the files they point at.
//!
//! ## Core Types
//!
//! - [`Sysroot`] and [`LogicalPath`]: the confinement boundary and paths inside it
//! - [`Snapshot`]: every link under a root, collected before any change
//! - [`ChainResolver`] and [`Resolution`]: confined chain following
//! - [`AtomicRewriter`]: temporary-link-then-rename replacement
//! - [`Materializer`]: link-to-file replacement with a backup
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```no_run
//! use relink::operations::{fix_symlinks, FixOptions};
//! use relink::{Logger, OutputMode, Sysroot};
//! use std::path::Path;
//!
//! let root = Sysroot::open(Path::new("/opt/sysroot")).unwrap();
//! let options = FixOptions::default().with_mode(OutputMode::Relative);
//! let report = fix_symlinks(&root, &options, &Logger::default(), None).unwrap();
//! println!("{}", report.summary());
//! ```

#[cfg(not(unix))]
compile_error!("relink manipulates POSIX symlinks and only supports unix targets");

pub mod config;
pub mod error;
pub mod logging;
pub mod materialize;
pub mod operations;
pub mod path;
pub mod resolve;
pub mod rewrite;
pub mod snapshot;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use materialize::{MaterializeOptions, MaterializeStage, Materializer};
pub use operations::{
    fix_symlinks, FixAction, FixExecutor, FixOptions, FixPlan, FixPlanner, LinkOutcome,
    LinkReport, RunReport, SkipReason,
};
pub use path::{LogicalPath, Sysroot};
pub use resolve::{ChainResolver, OutputMode, Resolution, ResolvedLink};
pub use rewrite::{AtomicRewriter, LinkFs, RewriteStage, SystemLinkFs};
pub use snapshot::{LinkRecord, Snapshot};
