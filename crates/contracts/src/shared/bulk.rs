use serde::{Deserialize, Serialize};

/// Payload for deleting several records of one list at once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}

/// Payload for setting one field to the same value on several records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkChangeRequest {
    pub ids: Vec<String>,
    pub field: String,
    pub value: String,
}

/// Backend reply to a bulk request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkResult {
    pub affected: usize,
    #[serde(default)]
    pub failed_ids: Vec<String>,
}
