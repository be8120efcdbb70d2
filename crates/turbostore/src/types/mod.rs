//! Wire types for the vector store APIs
//!
//! Field names match the remote contract exactly and are never renamed.

pub use field::{Emptiable, Field};
pub use page::Page;
pub use vector_store::{FileCounts, VectorStore, VectorStoreDeleted, VectorStoreRequest};
pub use vector_store_file::{
    ChunkingStrategy, CreateVectorStoreFileRequest, CreateVectorStoreFileRequestBuilder,
    CreateVectorStoreFileRequestBuilderError, LastError, StaticChunking, VectorStoreFile,
    VectorStoreFileDeleted, VectorStoreFileStatus,
};

pub mod field;
pub mod page;
pub mod vector_store;
pub mod vector_store_file;
