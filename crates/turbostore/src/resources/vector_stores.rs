//! Vector stores API endpoint

use super::{Resource, VectorStoreFiles};
use crate::{
    error::Result,
    http::{Dispatcher, Method, RequestOptions},
    pagination::Paginator,
    path::ResourcePath,
    query::ListParams,
    types::{Page, VectorStore, VectorStoreDeleted, VectorStoreRequest},
};

/// Vector stores API resource.
///
/// # Example
///
/// ```rust,no_run
/// use turbostore::{Client, VectorStoreRequest};
///
/// # async fn example() -> turbostore::Result<()> {
/// let client = Client::new("sk-...");
/// let store = client
///     .vector_stores()
///     .create(VectorStoreRequest::new().name("docs").file_ids(["file-1", "file-2"]))
///     .await?;
/// println!("{} holds {:?} files", store.id, store.file_counts);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct VectorStores {
    dispatcher: Dispatcher,
    options: RequestOptions,
}

impl VectorStores {
    /// Create a new VectorStores resource.
    pub(crate) fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            options: RequestOptions::default(),
        }
    }

    /// A handle whose calls all use `options`.
    pub fn with_options(&self, options: RequestOptions) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            options,
        }
    }

    /// Create a vector store.
    ///
    /// Fields left [`Absent`](crate::Field::Absent) are not sent.
    pub async fn create(&self, request: VectorStoreRequest) -> Result<VectorStore> {
        self.dispatcher
            .send_json(
                Method::POST,
                &ResourcePath::vector_stores(),
                &request,
                &self.options,
            )
            .await
    }

    /// Retrieve a vector store by ID.
    ///
    /// A missing store is an [`Error::Api`](crate::Error::Api) for which
    /// [`is_not_found`](crate::Error::is_not_found) returns `true`.
    pub async fn retrieve(&self, vector_store_id: &str) -> Result<VectorStore> {
        self.dispatcher
            .send(
                Method::GET,
                &ResourcePath::vector_store(vector_store_id),
                &self.options,
            )
            .await
    }

    /// Modify a vector store. Absent fields stay unchanged server-side.
    pub async fn modify(
        &self,
        vector_store_id: &str,
        request: VectorStoreRequest,
    ) -> Result<VectorStore> {
        self.dispatcher
            .send_json(
                Method::POST,
                &ResourcePath::vector_store(vector_store_id),
                &request,
                &self.options,
            )
            .await
    }

    /// Delete a vector store.
    pub async fn delete(&self, vector_store_id: &str) -> Result<VectorStoreDeleted> {
        self.dispatcher
            .send(
                Method::DELETE,
                &ResourcePath::vector_store(vector_store_id),
                &self.options,
            )
            .await
    }

    /// Fetch a single page of vector stores.
    pub async fn list(&self, params: ListParams) -> Result<Page<VectorStore>> {
        let path = ResourcePath::vector_stores().with_query(&params);
        self.dispatcher
            .send(Method::GET, &path, &self.options)
            .await
    }

    /// Lazily walk every page of vector stores starting at `params`.
    pub fn list_auto_paging(&self, params: ListParams) -> Paginator<VectorStore> {
        Paginator::new(
            self.dispatcher.clone(),
            ResourcePath::vector_stores(),
            params,
            self.options.clone(),
        )
    }

    /// Files attached to one vector store.
    pub fn files(&self, vector_store_id: impl Into<String>) -> VectorStoreFiles {
        VectorStoreFiles::new(
            self.dispatcher.clone(),
            vector_store_id.into(),
            self.options.clone(),
        )
    }
}

impl Resource for VectorStores {
    fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    fn options(&self) -> &RequestOptions {
        &self.options
    }
}
