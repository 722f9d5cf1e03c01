//! Fleet scanning.
//!
//! One reporting pass: fetch the node list, visit every node sequentially
//! in directory order, aggregate tagged per-node outcomes. A failed visit
//! is confined to its own node and never stops the pass.

use crate::directory::DirectoryClient;
use crate::error::ReportError;
use crate::fdb::NodeInspector;
use crate::types::{FleetReport, NodeDescriptor, NodeOutcome, NodeReport};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs reporting passes over the fleet.
pub struct FleetScanner<I: NodeInspector> {
    directory: DirectoryClient,
    inspector: I,
}

impl<I: NodeInspector> FleetScanner<I> {
    pub fn new(directory: DirectoryClient, inspector: I) -> Self {
        Self {
            directory,
            inspector,
        }
    }

    /// Run one pass: directory fetch, then one visit per advertised node.
    ///
    /// A directory failure aborts the pass before any visit happens; node
    /// failures never do.
    pub async fn run_pass(&self) -> Result<FleetReport, ReportError> {
        let nodes = self.directory.fetch_nodes().await?;
        info!(
            nodes = nodes.len(),
            endpoint = %self.directory.endpoint(),
            "starting fleet pass"
        );
        Ok(self.scan_nodes(&nodes).await)
    }

    /// Visit the given nodes in order, one report entry per node.
    pub async fn scan_nodes(&self, nodes: &[NodeDescriptor]) -> FleetReport {
        let mut reports = Vec::with_capacity(nodes.len());
        for node in nodes {
            reports.push(NodeReport {
                node: node.clone(),
                outcome: self.visit(node).await,
            });
        }
        FleetReport { nodes: reports }
    }

    /// One best-effort visit. Every failure collapses to `Down`; the cause
    /// goes to the log, not the report.
    async fn visit(&self, node: &NodeDescriptor) -> NodeOutcome {
        info!(node = %node.id, address = %node.address, "visiting node");
        let started = Instant::now();

        let outcome = match self.inspector.fetch_records(node).await {
            Ok(records) if records.is_empty() => NodeOutcome::Empty,
            Ok(records) => NodeOutcome::Records(records),
            Err(e) => {
                warn!(node = %node.id, error = %e, "node visit failed");
                NodeOutcome::Down
            }
        };

        debug!(
            node = %node.id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "node visit finished"
        );
        outcome
    }
}
