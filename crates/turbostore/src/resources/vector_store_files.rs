//! Vector store files API endpoint

use super::Resource;
use crate::{
    error::Result,
    http::{Dispatcher, Method, RequestOptions},
    pagination::Paginator,
    path::ResourcePath,
    query::ListParams,
    types::{CreateVectorStoreFileRequest, Page, VectorStoreFile, VectorStoreFileDeleted},
};

/// Files attached to a single vector store.
///
/// Obtained from [`VectorStores::files`](super::VectorStores::files).
#[derive(Debug, Clone)]
pub struct VectorStoreFiles {
    dispatcher: Dispatcher,
    vector_store_id: String,
    options: RequestOptions,
}

impl VectorStoreFiles {
    pub(crate) fn new(
        dispatcher: Dispatcher,
        vector_store_id: String,
        options: RequestOptions,
    ) -> Self {
        Self {
            dispatcher,
            vector_store_id,
            options,
        }
    }

    /// The vector store these files belong to.
    pub fn vector_store_id(&self) -> &str {
        &self.vector_store_id
    }

    /// A handle whose calls all use `options`.
    pub fn with_options(&self, options: RequestOptions) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            vector_store_id: self.vector_store_id.clone(),
            options,
        }
    }

    /// Attach an uploaded file to the vector store.
    pub async fn create(&self, request: CreateVectorStoreFileRequest) -> Result<VectorStoreFile> {
        self.dispatcher
            .send_json(
                Method::POST,
                &ResourcePath::vector_store_files(&self.vector_store_id),
                &request,
                &self.options,
            )
            .await
    }

    /// Retrieve an attached file.
    pub async fn retrieve(&self, file_id: &str) -> Result<VectorStoreFile> {
        self.dispatcher
            .send(Method::GET, &self.file_path(file_id), &self.options)
            .await
    }

    /// Detach a file from the vector store.
    ///
    /// The response body is not decoded; any 2xx status is success.
    pub async fn delete(&self, file_id: &str) -> Result<()> {
        self.dispatcher
            .send_discarding(Method::DELETE, &self.file_path(file_id), &self.options)
            .await
    }

    /// Detach a file and decode the deletion acknowledgement.
    pub async fn delete_with_ack(&self, file_id: &str) -> Result<VectorStoreFileDeleted> {
        self.dispatcher
            .send(Method::DELETE, &self.file_path(file_id), &self.options)
            .await
    }

    /// Fetch a single page of attached files.
    pub async fn list(&self, params: ListParams) -> Result<Page<VectorStoreFile>> {
        let path = ResourcePath::vector_store_files(&self.vector_store_id).with_query(&params);
        self.dispatcher
            .send(Method::GET, &path, &self.options)
            .await
    }

    /// Lazily walk every page of attached files starting at `params`.
    pub fn list_auto_paging(&self, params: ListParams) -> Paginator<VectorStoreFile> {
        Paginator::new(
            self.dispatcher.clone(),
            ResourcePath::vector_store_files(&self.vector_store_id),
            params,
            self.options.clone(),
        )
    }

    fn file_path(&self, file_id: &str) -> ResourcePath {
        ResourcePath::vector_store_file(&self.vector_store_id, file_id)
    }
}

impl Resource for VectorStoreFiles {
    fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    fn options(&self) -> &RequestOptions {
        &self.options
    }
}
