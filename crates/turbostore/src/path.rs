//! Resource path composition
//!
//! Paths are relative to the configured API base and always start with `/`.
//! Identifiers are percent-encoded; collection names are trusted literals.

use crate::query::ListParams;
use std::fmt;

/// Collection path for vector stores.
pub const VECTOR_STORES: &str = "vector_stores";

/// Sub-collection path for files within a vector store.
pub const FILES: &str = "files";

/// A relative API path such as `/vector_stores/vs_1/files`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath {
    path: String,
}

impl ResourcePath {
    /// Start a path at a top-level collection.
    pub fn collection(name: &str) -> Self {
        Self {
            path: format!("/{}", name),
        }
    }

    /// Append an identifier segment, escaping reserved characters.
    pub fn item(mut self, id: &str) -> Self {
        self.path.push('/');
        self.path.push_str(&urlencoding::encode(id));
        self
    }

    /// Append a nested collection segment.
    pub fn sub(mut self, name: &str) -> Self {
        self.path.push('/');
        self.path.push_str(name);
        self
    }

    /// Append the encoded query string, if any parameter is set.
    pub fn with_query(mut self, params: &ListParams) -> Self {
        self.path.push_str(&params.to_query_string());
        self
    }

    /// First segment that a URL parser would resolve as `.` or `..`.
    ///
    /// Percent-encoding cannot protect these: `%2E` is a dot segment too.
    pub fn dot_segment(&self) -> Option<&str> {
        let path = self.path.split('?').next().unwrap_or_default();
        path.split('/').find(|segment| {
            matches!(
                segment.to_ascii_lowercase().as_str(),
                "." | "%2e" | ".." | ".%2e" | "%2e." | "%2e%2e"
            )
        })
    }

    /// The rendered path.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// `/vector_stores`
    pub fn vector_stores() -> Self {
        Self::collection(VECTOR_STORES)
    }

    /// `/vector_stores/{id}`
    pub fn vector_store(id: &str) -> Self {
        Self::vector_stores().item(id)
    }

    /// `/vector_stores/{id}/files`
    pub fn vector_store_files(vector_store_id: &str) -> Self {
        Self::vector_store(vector_store_id).sub(FILES)
    }

    /// `/vector_stores/{id}/files/{file_id}`
    pub fn vector_store_file(vector_store_id: &str, file_id: &str) -> Self {
        Self::vector_store_files(vector_store_id).item(file_id)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl AsRef<str> for ResourcePath {
    fn as_ref(&self) -> &str {
        &self.path
    }
}
