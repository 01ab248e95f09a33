//! CLI command implementations.
//!
//! - `fix`: rewrite every symlink under a root to its final target
//! - `materialize`: replace file symlinks with copies
//! - `list`: show links and their resolution without writing
//! - `completions`: generate shell completion scripts

pub mod completions;
pub mod fix;
pub mod list;
pub mod materialize;

pub use completions::CompletionsCommand;
pub use fix::FixCommand;
pub use list::ListCommand;
pub use materialize::MaterializeCommand;
