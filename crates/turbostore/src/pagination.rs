//! Lazy auto-paging over cursor-paginated list endpoints
//!
//! A [`Paginator`] remembers where a listing starts. Each stream it produces
//! fetches pages on demand, following `last_id` while `has_more` is set, and
//! ends after the first error. A listing that starts from a `before` cursor
//! keeps walking backward through `first_id` instead.

use crate::error::{Error, Result};
use crate::http::{Dispatcher, Method, RequestOptions};
use crate::path::ResourcePath;
use crate::query::ListParams;
use crate::types::Page;
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;

/// Restartable description of a paginated listing.
///
/// Nothing is fetched until a stream is polled. Cloning the paginator, or
/// calling [`Paginator::items`] again, starts over from the original params.
///
/// ```rust,no_run
/// use futures::TryStreamExt;
/// use turbostore::{Client, ListParams};
///
/// # async fn example() -> turbostore::Result<()> {
/// let client = Client::new("sk-...");
/// let stores: Vec<_> = client
///     .vector_stores()
///     .list_auto_paging(ListParams::new().limit(50))
///     .items()
///     .try_collect()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct Paginator<T> {
    dispatcher: Dispatcher,
    path: ResourcePath,
    params: ListParams,
    options: RequestOptions,
    _item: PhantomData<fn() -> T>,
}

impl<T> Clone for Paginator<T> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            path: self.path.clone(),
            params: self.params.clone(),
            options: self.options.clone(),
            _item: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Paginator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("path", &self.path)
            .field("params", &self.params)
            .finish()
    }
}

impl<T> Paginator<T>
where
    T: DeserializeOwned + Send + 'static,
{
    pub(crate) fn new(
        dispatcher: Dispatcher,
        path: ResourcePath,
        params: ListParams,
        options: RequestOptions,
    ) -> Self {
        Self {
            dispatcher,
            path,
            params,
            options,
            _item: PhantomData,
        }
    }

    /// The params of the first page.
    pub fn params(&self) -> &ListParams {
        &self.params
    }

    /// Stream whole pages, in server order.
    ///
    /// With a `before` cursor, each page is the one preceding the last.
    pub fn pages(&self) -> impl Stream<Item = Result<Page<T>>> + Send + use<T> {
        let this = self.clone();
        stream::try_unfold(Some(this.params.clone()), move |next| {
            let this = this.clone();
            async move {
                let Some(params) = next else {
                    return Ok(None);
                };
                let page = this.fetch(&params).await?;
                let following = if params.before.is_some() {
                    match page.prev_cursor().filter(|_| page.has_more) {
                        Some(cursor) if params.before.as_deref() != Some(cursor) => {
                            Some(ListParams {
                                after: None,
                                before: Some(cursor.to_string()),
                                ..params
                            })
                        }
                        _ => None,
                    }
                } else {
                    match page.next_cursor() {
                        Some(cursor) if params.after.as_deref() != Some(cursor) => {
                            Some(ListParams {
                                after: Some(cursor.to_string()),
                                before: None,
                                ..params
                            })
                        }
                        _ => None,
                    }
                };
                Ok(Some((page, following)))
            }
        })
    }

    /// Stream individual items across all pages.
    pub fn items(&self) -> impl Stream<Item = Result<T>> + Send + use<T> {
        self.pages()
            .map_ok(|page| stream::iter(page.data).map(Ok::<T, Error>))
            .try_flatten()
    }

    async fn fetch(&self, params: &ListParams) -> Result<Page<T>> {
        let path = self.path.clone().with_query(params);
        self.dispatcher
            .send(Method::GET, &path, &self.options)
            .await
    }
}
