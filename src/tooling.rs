//! Tooling & Integration Layer
//!
//! CLI entry points for running reporting passes from the command line.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
