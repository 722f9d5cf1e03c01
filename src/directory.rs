//! Directory service client.
//!
//! One HTTP GET against the instance-listing endpoint per pass. The `fdbs`
//! field of the answer is the ordered node list; its order decides visit
//! order and report order.

use crate::error::DirectoryError;
use crate::types::NodeDescriptor;
use serde::Deserialize;
use tracing::debug;

/// Wire shape of the directory answer.
///
/// The listing also describes other instance groups (masters, workers);
/// those keys are ignored, as is extra metadata on each entry.
#[derive(Debug, Deserialize)]
struct DirectoryResponse {
    fdbs: Vec<NodeDescriptor>,
}

/// Client for the directory service.
pub struct DirectoryClient {
    endpoint: String,
    client: reqwest::Client,
}

impl DirectoryClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Endpoint this client queries.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the ordered list of running nodes.
    ///
    /// Any transport failure, non-success status, or malformed body is
    /// fatal to the calling pass.
    pub async fn fetch_nodes(&self) -> Result<Vec<NodeDescriptor>, DirectoryError> {
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status));
        }

        let body = response.text().await?;
        let nodes = parse_listing(&body)?;
        debug!(count = nodes.len(), "directory listed nodes");
        Ok(nodes)
    }
}

/// Parse a directory listing body into the ordered node list.
fn parse_listing(body: &str) -> Result<Vec<NodeDescriptor>, DirectoryError> {
    let response: DirectoryResponse =
        serde_json::from_str(body).map_err(|e| DirectoryError::MalformedResponse(e.to_string()))?;
    Ok(response.fdbs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_node_list_in_order() {
        let body = r#"{"fdbs": [
            {"id": "fdb-instance-1", "publicIp": "10.0.0.1"},
            {"id": "fdb-instance-2", "publicIp": "10.0.0.2"}
        ]}"#;
        let nodes = parse_listing(body).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].id, "fdb-instance-1");
        assert_eq!(nodes[0].address, "10.0.0.1");
        assert_eq!(nodes[1].id, "fdb-instance-2");
    }

    #[test]
    fn test_ignores_sibling_groups_and_extra_metadata() {
        let body = r#"{
            "thisMaster": "master-1",
            "fdbs": [{
                "id": "fdb-instance-1",
                "instanceType": "fdb",
                "number": 1,
                "zone": "us-central1-c",
                "internalIp": "10.128.0.7",
                "publicIp": "10.0.0.1",
                "instanceRunning": true
            }],
            "workers": [{"id": "worker-1", "publicIp": "10.0.0.9"}],
            "masters": []
        }"#;
        let nodes = parse_listing(body).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, "fdb-instance-1");
        assert_eq!(nodes[0].address, "10.0.0.1");
    }

    #[test]
    fn test_empty_node_list_is_well_formed() {
        let nodes = parse_listing(r#"{"fdbs": []}"#).unwrap();
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_missing_fdbs_field_is_malformed() {
        let err = parse_listing(r#"{"workers": []}"#).unwrap_err();
        assert!(matches!(err, DirectoryError::MalformedResponse(_)));
        assert!(err.to_string().contains("fdbs"));
    }

    #[test]
    fn test_entry_without_address_is_malformed() {
        let err = parse_listing(r#"{"fdbs": [{"id": "fdb-instance-1"}]}"#).unwrap_err();
        assert!(matches!(err, DirectoryError::MalformedResponse(_)));
    }

    #[test]
    fn test_non_json_body_is_malformed() {
        let err = parse_listing("<html>busy</html>").unwrap_err();
        assert!(matches!(err, DirectoryError::MalformedResponse(_)));
    }
}
