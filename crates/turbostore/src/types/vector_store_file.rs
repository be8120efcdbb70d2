//! Vector store file types

use derive_builder::Builder;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A file attached to a vector store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorStoreFile {
    /// Unique identifier of the attachment (the file ID).
    pub id: String,

    /// Object type, always `vector_store.file`.
    #[serde(default = "default_object")]
    pub object: String,

    /// Unix timestamp (seconds) of creation.
    #[serde(default)]
    pub created_at: i64,

    /// Bytes used by the file after processing.
    #[serde(default)]
    pub usage_bytes: i64,

    /// ID of the parent vector store.
    pub vector_store_id: String,

    /// Processing status.
    pub status: VectorStoreFileStatus,

    /// Last processing error, if the file failed.
    #[serde(
        default,
        deserialize_with = "deserialize_last_error",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_error: Option<LastError>,
}

fn default_object() -> String {
    "vector_store.file".to_string()
}

/// Processing status of a file within a vector store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VectorStoreFileStatus {
    /// Still being processed.
    InProgress,
    /// Ready for use.
    Completed,
    /// Processing failed; see `last_error`.
    Failed,
    /// Processing was cancelled.
    Cancelled,
    /// A status this client does not know about yet.
    Unknown(String),
}

impl VectorStoreFileStatus {
    /// Wire token for this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Unknown(other) => other,
        }
    }

    /// Whether the server will not move this file to another status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

impl From<&str> for VectorStoreFileStatus {
    fn from(value: &str) -> Self {
        match value {
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for VectorStoreFileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for VectorStoreFileStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VectorStoreFileStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// Error reported for a file whose processing failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastError {
    /// Error code, e.g. `server_error` or `unsupported_file`.
    #[serde(default)]
    pub code: String,
    /// Human readable description.
    #[serde(default)]
    pub message: String,
}

/// Older payloads carry `last_error` as a bare string; empty strings mean no error.
fn deserialize_last_error<'de, D>(deserializer: D) -> Result<Option<LastError>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Structured(LastError),
        Text(String),
    }

    Ok(match Option::<Wire>::deserialize(deserializer)? {
        None => None,
        Some(Wire::Structured(error)) => Some(error),
        Some(Wire::Text(text)) if text.is_empty() => None,
        Some(Wire::Text(text)) => Some(LastError {
            code: String::new(),
            message: text,
        }),
    })
}

/// How the service splits a file into chunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChunkingStrategy {
    /// Server default (800 token chunks, 400 token overlap).
    Auto,
    /// Explicit chunk sizes.
    Static {
        /// Chunk parameters.
        #[serde(rename = "static")]
        config: StaticChunking,
    },
}

/// Parameters for [`ChunkingStrategy::Static`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticChunking {
    /// Maximum tokens per chunk.
    pub max_chunk_size_tokens: u32,
    /// Tokens shared by consecutive chunks.
    pub chunk_overlap_tokens: u32,
}

/// Payload for attaching a file to a vector store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(setter(into, strip_option))]
pub struct CreateVectorStoreFileRequest {
    /// ID of an uploaded file.
    pub file_id: String,

    /// Chunking strategy; the server default is used when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub chunking_strategy: Option<ChunkingStrategy>,
}

impl CreateVectorStoreFileRequest {
    /// Attach `file_id` with the default chunking strategy.
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            chunking_strategy: None,
        }
    }

    /// Create a builder for constructing the request.
    pub fn builder() -> CreateVectorStoreFileRequestBuilder {
        CreateVectorStoreFileRequestBuilder::default()
    }
}

/// Acknowledgement returned when a file is detached from a vector store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorStoreFileDeleted {
    /// ID of the detached file.
    pub id: String,
    /// Object type, `vector_store.file.deleted`.
    pub object: String,
    /// Whether the file was detached.
    pub deleted: bool,
}
