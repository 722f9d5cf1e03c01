//! Fdbscan: Fleet Inventory Reporting
//!
//! Queries a directory service for the set of running file-database nodes,
//! then visits each node best-effort and reports a normalized summary of
//! its stored records. One pass, directory order, no retries.

pub mod config;
pub mod directory;
pub mod error;
pub mod fdb;
pub mod format;
pub mod logging;
pub mod scan;
pub mod tooling;
pub mod types;
