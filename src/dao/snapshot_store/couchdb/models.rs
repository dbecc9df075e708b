use serde::{Deserialize, Serialize};

pub const SNAPSHOT_PREFIX: &str = "snapshot::";

/// One key of the snapshot store, kept as an opaque string body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouchSnapshotDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    pub value: String,
}

pub fn snapshot_doc_id(key: &str) -> String {
    format!("{SNAPSHOT_PREFIX}{key}")
}
