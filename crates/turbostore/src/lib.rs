//! # TurboStore
//!
//! Typed async client for the OpenAI vector store API:
//! - Vector stores: create, retrieve, modify, delete, list
//! - Vector store files: attach, retrieve, detach, list
//! - Three-valued optional fields for partial updates
//! - Cursor pagination with a lazy auto-paging stream
//! - Pluggable HTTP providers, per-call timeouts and cancellation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use turbostore::{Client, ListParams, Order, VectorStoreRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("your-api-key");
//!
//!     let store = client
//!         .vector_stores()
//!         .create(VectorStoreRequest::new().name("docs").file_ids(["file-1"]))
//!         .await?;
//!
//!     let page = client
//!         .vector_stores()
//!         .list(ListParams::new().limit(10).order(Order::Desc))
//!         .await?;
//!
//!     println!("created {}, {} stores on first page", store.id, page.data.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Partial updates
//!
//! [`VectorStoreRequest`] fields are [`Field`]s: `Absent` leaves the server value
//! alone, `Empty` clears it and `Value` replaces it.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder, ConnectionPoolConfig, RateLimitConfig};
pub use error::{ApiErrorBody, Error, ErrorKind, Result};
pub use http::RequestOptions;
pub use pagination::Paginator;
pub use path::ResourcePath;
pub use query::{ListParams, Order};
pub use types::*;

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod pagination;
pub mod path;
pub mod query;
pub mod resources;
pub mod types;

#[cfg(feature = "trace")]
#[cfg_attr(docsrs, doc(cfg(feature = "trace")))]
pub use observability::init_tracing;

// Re-export key dependencies for convenience
pub use async_trait::async_trait;
pub use tokio_util::sync::CancellationToken;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default value of the protocol version header.
pub const DEFAULT_API_VERSION: &str = "assistants=v2";

/// Header carrying the protocol version (`OpenAI-Beta` on the wire).
pub const API_VERSION_HEADER: &str = "openai-beta";

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::resources::Resource;
    pub use crate::{
        Client, Error, Field, ListParams, Order, Page, RequestOptions, Result, VectorStore,
        VectorStoreFile, VectorStoreRequest,
    };
}
