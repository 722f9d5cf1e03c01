//! Error types for fleet reporting.
//!
//! Failures split into two tiers. Directory failures abort the whole pass
//! and surface exactly once. Node visit failures are confined to the visit
//! that raised them and never escape the scanner.

use thiserror::Error;

/// Failure while fetching or decoding the directory listing.
///
/// Any variant here is fatal to the pass that raised it.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Transport-level failure: DNS, refused connection, reset, body read.
    /// Displays as the underlying error so the failure notice carries the
    /// transport detail directly.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The directory answered with a non-success status code.
    #[error("directory returned status {0}")]
    Status(reqwest::StatusCode),

    /// The body was retrieved but does not carry a well-formed node list.
    #[error("malformed directory response: {0}")]
    MalformedResponse(String),
}

/// Failure during a single node visit.
///
/// The scanner collapses every variant into a down outcome for that node;
/// the distinction only survives in logs.
#[derive(Debug, Error)]
pub enum FdbError {
    /// The node's document store could not be reached within the timeout.
    #[error("connection to {address} failed: {source}")]
    Connect {
        address: String,
        #[source]
        source: mongodb::error::Error,
    },

    /// The store answered but the collection scan failed.
    #[error("query on collection '{collection}' failed: {source}")]
    Query {
        collection: String,
        #[source]
        source: mongodb::error::Error,
    },

    /// A stored document lacks one of the projected fields.
    #[error("document is missing field '{field}'")]
    MissingField { field: &'static str },

    /// A projected field holds a value that cannot be normalized to text.
    #[error("field '{field}' has unsupported type {kind}")]
    UnsupportedField { field: &'static str, kind: String },
}

/// Top-level error for library entry points and the CLI.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
