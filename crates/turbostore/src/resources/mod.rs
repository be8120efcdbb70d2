//! API resource endpoints
//!
//! Each resource is a thin, stateless mapping from typed calls to requests
//! sent through the shared [`Dispatcher`].

pub mod vector_store_files;
pub mod vector_stores;

pub use vector_store_files::VectorStoreFiles;
pub use vector_stores::VectorStores;

use crate::http::{Dispatcher, RequestOptions};

/// Base trait for API resources.
pub trait Resource {
    /// The dispatcher requests are sent through.
    fn dispatcher(&self) -> &Dispatcher;

    /// Options applied to every call made through this handle.
    fn options(&self) -> &RequestOptions;
}
