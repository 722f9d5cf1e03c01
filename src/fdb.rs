//! FDB node store access.
//!
//! Connects to one node's document store, forces the connection with a
//! ping, and drains the record collection in store order. Everything here
//! is scoped to a single visit; the client handle is dropped when the
//! visit ends, so no connection state leaks between nodes.

use crate::config::FdbConfig;
use crate::error::FdbError;
use crate::types::{NodeDescriptor, RecordSummary};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::ClientOptions;
use mongodb::Client;
use std::time::Duration;
use tracing::debug;

/// Source field names in the record collection.
const FIELD_RECORD_ID: &str = "docId";
const FIELD_FILE_NAME: &str = "fileName";
const FIELD_CONTENT_HASH: &str = "fileHash";
const FIELD_CONTENT_TYPE: &str = "fileType";
const FIELD_OWNER_ID: &str = "ownerId";
const FIELD_LAST_UPDATED: &str = "lastUpdated";

/// Record source for one visit target.
///
/// Seam between the scanner and the store driver; tests substitute a stub
/// implementation so scan behavior is exercised without a live fleet.
#[async_trait]
pub trait NodeInspector: Send + Sync {
    /// Fetch every record stored on the node, in store order.
    async fn fetch_records(&self, node: &NodeDescriptor) -> Result<Vec<RecordSummary>, FdbError>;
}

/// `NodeInspector` backed by the mongodb driver.
pub struct FdbInspector {
    config: FdbConfig,
}

impl FdbInspector {
    pub fn new(config: FdbConfig) -> Self {
        Self { config }
    }

    fn connection_uri(&self, node: &NodeDescriptor) -> String {
        format!("mongodb://{}:{}", node.address, self.config.port)
    }
}

#[async_trait]
impl NodeInspector for FdbInspector {
    async fn fetch_records(&self, node: &NodeDescriptor) -> Result<Vec<RecordSummary>, FdbError> {
        let uri = self.connection_uri(node);
        let timeout = Duration::from_millis(self.config.timeout_ms);
        debug!(node = %node.id, uri = %uri, "connecting to node store");

        let mut options = ClientOptions::parse(&uri).await.map_err(|e| FdbError::Connect {
            address: node.address.clone(),
            source: e,
        })?;
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options).map_err(|e| FdbError::Connect {
            address: node.address.clone(),
            source: e,
        })?;

        let database = client.database(&self.config.database);

        // The driver connects lazily; ping so an unreachable node fails
        // here, bounded by the timeout, instead of inside the query.
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| FdbError::Connect {
                address: node.address.clone(),
                source: e,
            })?;

        let collection = database.collection::<Document>(&self.config.collection);
        let mut cursor = collection.find(doc! {}).await.map_err(|e| FdbError::Query {
            collection: self.config.collection.clone(),
            source: e,
        })?;

        let mut records = Vec::new();
        while let Some(document) = cursor.try_next().await.map_err(|e| FdbError::Query {
            collection: self.config.collection.clone(),
            source: e,
        })? {
            records.push(project_record(&document)?);
        }
        Ok(records)
    }
}

/// Project a stored document into the six-field record summary.
///
/// Every projected field must be present; scalar values are normalized to
/// text, anything else fails the visit.
pub fn project_record(document: &Document) -> Result<RecordSummary, FdbError> {
    Ok(RecordSummary {
        record_id: field_as_string(document, FIELD_RECORD_ID)?,
        file_name: field_as_string(document, FIELD_FILE_NAME)?,
        content_hash: field_as_string(document, FIELD_CONTENT_HASH)?,
        content_type: field_as_string(document, FIELD_CONTENT_TYPE)?,
        owner_id: field_as_string(document, FIELD_OWNER_ID)?,
        last_updated: field_as_string(document, FIELD_LAST_UPDATED)?,
    })
}

fn field_as_string(document: &Document, field: &'static str) -> Result<String, FdbError> {
    let value = document.get(field).ok_or(FdbError::MissingField { field })?;
    match value {
        Bson::String(s) => Ok(s.clone()),
        Bson::Int32(i) => Ok(i.to_string()),
        Bson::Int64(i) => Ok(i.to_string()),
        Bson::Double(d) => Ok(d.to_string()),
        Bson::Boolean(b) => Ok(b.to_string()),
        Bson::ObjectId(oid) => Ok(oid.to_hex()),
        Bson::DateTime(dt) => dt.try_to_rfc3339_string().map_err(|_| {
            FdbError::UnsupportedField {
                field,
                kind: "DateTime".to_string(),
            }
        }),
        other => Err(FdbError::UnsupportedField {
            field,
            kind: format!("{:?}", other.element_type()),
        }),
    }
}
