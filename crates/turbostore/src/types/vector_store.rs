//! Vector store types

use super::Field;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named server-side collection of files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorStore {
    /// Unique identifier, e.g. `vs_abc123`.
    pub id: String,

    /// Object type, always `vector_store`.
    #[serde(default = "default_object")]
    pub object: String,

    /// Unix timestamp (seconds) of creation.
    pub created_at: i64,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Total bytes used by the files in the store.
    #[serde(default)]
    pub bytes: i64,

    /// Per-status file counts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_counts: Option<FileCounts>,

    /// Processing status: `expired`, `in_progress` or `completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Bytes billed for the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_bytes: Option<i64>,

    /// Unix timestamp (seconds) of last activity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active_at: Option<i64>,

    /// Unix timestamp (seconds) of expiry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,

    /// Caller supplied key/value metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

fn default_object() -> String {
    "vector_store".to_string()
}

impl VectorStore {
    /// Creation time as a UTC datetime, if the timestamp is in range.
    pub fn created_at_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }
}

/// Aggregate processing-status counts for the files in a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCounts {
    /// Files still being processed.
    pub in_progress: u32,
    /// Files processed successfully.
    pub completed: u32,
    /// Files that failed to process.
    pub failed: u32,
    /// Files whose processing was cancelled.
    pub cancelled: u32,
    /// Total number of files.
    pub total: u32,
}

/// Payload for creating or modifying a vector store.
///
/// Every field is three-valued: [`Field::Absent`] leaves the attribute
/// untouched on modify, [`Field::Empty`] clears it.
///
/// ```rust
/// use turbostore::types::{Field, VectorStoreRequest};
///
/// let request = VectorStoreRequest::new()
///     .name("docs")
///     .file_ids(["f1", "f2"]);
/// assert!(request.metadata.is_absent());
///
/// let clear = VectorStoreRequest::new().clear_file_ids();
/// assert_eq!(clear.file_ids, Field::Empty);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorStoreRequest {
    /// Display name.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,

    /// File IDs to associate with the store.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub file_ids: Field<Vec<String>>,

    /// Key/value metadata.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub metadata: Field<HashMap<String, String>>,
}

impl VectorStoreRequest {
    /// Create a request with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Field::set(name.into());
        self
    }

    /// Send an empty name.
    pub fn clear_name(mut self) -> Self {
        self.name = Field::Empty;
        self
    }

    /// Set the associated file IDs. An empty iterator clears them.
    pub fn file_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_ids = Field::set(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Send an empty file ID list.
    pub fn clear_file_ids(mut self) -> Self {
        self.file_ids = Field::Empty;
        self
    }

    /// Add one metadata entry.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut map = match std::mem::take(&mut self.metadata) {
            Field::Value(map) => map,
            Field::Absent | Field::Empty => HashMap::new(),
        };
        map.insert(key.into(), value.into());
        self.metadata = Field::Value(map);
        self
    }

    /// Send an empty metadata object.
    pub fn clear_metadata(mut self) -> Self {
        self.metadata = Field::Empty;
        self
    }
}

/// Acknowledgement returned when a vector store is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorStoreDeleted {
    /// ID of the deleted store.
    pub id: String,
    /// Object type, `vector_store.deleted`.
    pub object: String,
    /// Whether the store was deleted.
    pub deleted: bool,
}
