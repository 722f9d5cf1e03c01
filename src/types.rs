//! Core types for fleet inventory reporting.

use serde::Deserialize;

/// One database node advertised by the directory service.
///
/// Directory entries carry full instance metadata; a reporting pass only
/// needs the identity and the public address, everything else is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NodeDescriptor {
    /// Instance identifier. Tags every notice emitted about this node.
    pub id: String,
    /// Public address the node's document store listens on.
    #[serde(rename = "publicIp")]
    pub address: String,
}

/// Normalized projection of one stored document.
///
/// All six fields are plain text; scalar store values are normalized at
/// projection time so rendering never touches the wire representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub record_id: String,
    pub file_name: String,
    pub content_hash: String,
    pub content_type: String,
    pub owner_id: String,
    pub last_updated: String,
}

/// Tagged outcome of one node visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeOutcome {
    /// The node answered and holds at least one record, in store order.
    Records(Vec<RecordSummary>),
    /// The node answered but its record collection is empty.
    Empty,
    /// The visit failed. The cause is logged, never reported.
    Down,
}

/// Outcome of one visit, tagged with the node it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeReport {
    pub node: NodeDescriptor,
    pub outcome: NodeOutcome,
}

/// Aggregated result of one reporting pass.
///
/// Entries appear in directory order, one per advertised node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetReport {
    pub nodes: Vec<NodeReport>,
}
