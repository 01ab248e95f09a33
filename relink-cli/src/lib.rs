#![deny(unsafe_code)]

//! Library exports for relink-cli.
//!
//! Exposes the CLI structure so integration tests and documentation
//! tooling can reach it.

pub mod cli;
pub mod commands;
pub mod error;
pub mod interrupt;
pub mod utils;

pub use cli::Cli;
