//! Format fleet reports as console text.
//!
//! The rendered text is the tool's output contract: one section per node in
//! directory order, each closed by the delimiter line. There is no
//! machine-readable mode.

use crate::error::DirectoryError;
use crate::types::{FleetReport, NodeOutcome, NodeReport, RecordSummary};

/// Delimiter line closing every node section.
pub const SECTION_DELIMITER: &str =
    "______________________________________________________";

/// Format a whole pass as human-readable text.
pub fn format_fleet_report_text(report: &FleetReport, collection: &str) -> String {
    let mut out = String::new();
    for node_report in &report.nodes {
        out.push_str(&format_node_report_text(node_report, collection));
    }
    out
}

/// Format one node section: a record listing, or a single-line notice.
pub fn format_node_report_text(report: &NodeReport, collection: &str) -> String {
    let mut out = String::new();
    match &report.outcome {
        NodeOutcome::Down => {
            out.push_str(&format!("{} is down\n", report.node.id));
        }
        NodeOutcome::Empty => {
            out.push_str(&format!("No content in {}\n", report.node.id));
        }
        NodeOutcome::Records(records) => {
            out.push_str(&format!(
                "Records from {} on {}:\n",
                collection, report.node.id
            ));
            for record in records {
                out.push_str(&format_record_line(record));
            }
        }
    }
    out.push_str(SECTION_DELIMITER);
    out.push('\n');
    out
}

/// Single-line notice for a failed directory fetch. The only output a pass
/// produces when the node list cannot be retrieved.
pub fn format_directory_failure_text(error: &DirectoryError) -> String {
    format!("Request failed: {}\n", error)
}

fn format_record_line(record: &RecordSummary) -> String {
    format!(
        "  record_id={} file_name={} content_hash={} content_type={} owner_id={} last_updated={}\n",
        record.record_id,
        record.file_name,
        record.content_hash,
        record.content_type,
        record.owner_id,
        record.last_updated
    )
}
