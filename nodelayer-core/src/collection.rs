//! Typed node collections: CRUD plus windowed queries.
//!
//! A [`NodeCollection`] binds a node type to its derived collection name and
//! a backend reference. It is stateless and safe for concurrent use; each
//! call is independently consistent with whatever the store returns at call
//! time.

use bson::Bson;
use chrono::{DateTime, Utc};
use std::marker::PhantomData;
use uuid::Uuid;

use crate::{
    backend::StoreBackend,
    error::{NodeStoreError, NodeStoreResult},
    node::{Node, NodeExt},
    page::{PageInfo, PageWindow, validate_pagination},
    query::{FilterInput, PaginationInput, Query, SortInput, compose_query},
};

/// A typed collection of nodes backed by a storage backend.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the backend reference
/// * `B` - The storage backend type
/// * `N` - The node type stored in this collection
#[derive(Debug)]
pub struct NodeCollection<'a, B: StoreBackend, N: Node> {
    name: String,
    backend: &'a B,
    _marker: PhantomData<N>,
}

impl<'a, B: StoreBackend, N: Node> NodeCollection<'a, B, N> {
    pub(crate) fn new(name: String, backend: &'a B) -> Self {
        Self { name, backend, _marker: PhantomData }
    }

    /// Returns the name of this collection (environment suffix included).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates a node, assigning a fresh unique identifier if it has none.
    ///
    /// Returns the node's identifier and the creation timestamp. The write is
    /// an upsert; the collection is created implicitly if absent.
    pub async fn create(&self, node: &mut N) -> NodeStoreResult<(String, DateTime<Utc>)> {
        if node.id().is_empty() {
            node.set_id(Uuid::new_v4().to_string());
        }

        let id = node.id().to_string();
        let document = node.to_bson()?;

        self.backend
            .set_document(&id, document, &self.name)
            .await?;

        Ok((id, Utc::now()))
    }

    /// Fetches the node at `id`.
    ///
    /// Fails with a not-found error if the document is absent.
    pub async fn retrieve(&self, id: &str) -> NodeStoreResult<N> {
        match self
            .backend
            .get_document(id, &self.name)
            .await?
        {
            Some(document) => N::from_bson(document),
            None => Err(NodeStoreError::NodeNotFound(
                id.to_string(),
                self.name.clone(),
            )),
        }
    }

    /// Overwrites the node at `id`, returning the update timestamp.
    ///
    /// Updating a non-existent id is NOT an error: the write is idempotent
    /// under a last-writer-wins model. Callers that need an existence check
    /// must [`retrieve`](Self::retrieve) first.
    pub async fn update(&self, id: &str, node: &N) -> NodeStoreResult<DateTime<Utc>> {
        let document = node.to_bson()?;

        self.backend
            .set_document(id, document, &self.name)
            .await?;

        Ok(Utc::now())
    }

    /// Removes the node at `id`.
    ///
    /// Returns `true` whether or not the document previously existed;
    /// deleting something absent is not an error.
    pub async fn delete(&self, id: &str) -> NodeStoreResult<bool> {
        self.backend
            .delete_document(id, &self.name)
            .await?;

        Ok(true)
    }

    /// Queries nodes with optional pagination, filtering and sorting.
    ///
    /// Composes the filtered/sorted query, applies the resolved pagination
    /// window and returns the typed rows together with a [`PageInfo`]
    /// summary.
    pub async fn query(
        &self,
        pagination: Option<&PaginationInput>,
        filter: Option<&FilterInput>,
        sort: Option<&SortInput>,
    ) -> NodeStoreResult<(Vec<N>, PageInfo)> {
        let (documents, page_info) = self
            .query_documents(pagination, filter, sort)
            .await?;

        let nodes = documents
            .into_iter()
            .map(N::from_bson)
            .collect::<NodeStoreResult<Vec<N>>>()?;

        Ok((nodes, page_info))
    }

    /// Untyped variant of [`query`](Self::query) returning raw documents.
    pub async fn query_documents(
        &self,
        pagination: Option<&PaginationInput>,
        filter: Option<&FilterInput>,
        sort: Option<&SortInput>,
    ) -> NodeStoreResult<(Vec<Bson>, PageInfo)> {
        if let Some(pagination) = pagination {
            validate_pagination(pagination)?;
        }

        let query = compose_query(filter, sort)?;

        run_windowed(self.backend, query, &self.name, pagination).await
    }
}

/// Executes `query` against `collection` with the window resolved from
/// `pagination` applied.
///
/// A resolved window fetches one row beyond its size so that
/// `PageInfo.has_next_page` reflects whether strictly more results exist; the
/// extra row is never returned. Without pagination the query runs unwindowed
/// and the page info reports no further pages.
pub(crate) async fn run_windowed<B: StoreBackend>(
    backend: &B,
    mut query: Query,
    collection: &str,
    pagination: Option<&PaginationInput>,
) -> NodeStoreResult<(Vec<Bson>, PageInfo)> {
    match PageWindow::resolve(pagination)? {
        None => {
            let documents = backend
                .query_documents(query, collection)
                .await?;
            let page_info = PageInfo::for_window(0, documents.len(), false)?;

            Ok((documents, page_info))
        }
        Some(window) => {
            query.offset = Some(window.offset);
            query.limit = Some(window.size + 1);

            let mut documents = backend
                .query_documents(query, collection)
                .await?;
            let has_next = documents.len() > window.size;
            documents.truncate(window.size);

            let page_info = PageInfo::for_window(window.offset, documents.len(), has_next)?;

            Ok((documents, page_info))
        }
    }
}
