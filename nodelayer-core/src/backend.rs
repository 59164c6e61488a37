//! Storage backend abstraction for the node store.
//!
//! The [`StoreBackend`] trait is the seam between the typed repository layer
//! and a concrete document store. Implementations are thread-safe
//! (`Send + Sync`) and support concurrent access; every method is async and
//! cancellation-safe in the usual Rust sense (dropping the returned future
//! aborts the in-flight call).
//!
//! Backend semantics required by the repository layer:
//!
//! - `set_document` is an upsert; the collection is created implicitly.
//! - `delete_document` is idempotent; deleting an absent id is a no-op.
//! - `get_document` returns `None` for an absent id (not an error).

use async_trait::async_trait;
use bson::Bson;
use std::fmt::Debug;

use crate::{error::NodeStoreResult, query::Query};

/// Abstract interface for document storage backends.
///
/// Implementers provide the concrete storage strategy; the repository layer
/// supplies collection names, identifiers, and already-composed queries.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Writes a document at `id`, creating or overwriting it.
    ///
    /// Never fails merely because the collection does not yet exist; the
    /// store creates it implicitly.
    async fn set_document(&self, id: &str, document: Bson, collection: &str)
    -> NodeStoreResult<()>;

    /// Fetches the document at `id`, or `None` if absent.
    async fn get_document(&self, id: &str, collection: &str) -> NodeStoreResult<Option<Bson>>;

    /// Removes the document at `id`. Removing an absent document is a no-op.
    async fn delete_document(&self, id: &str, collection: &str) -> NodeStoreResult<()>;

    /// Queries documents in a collection using a composed [`Query`] with its
    /// filter, sort, offset and limit applied.
    async fn query_documents(&self, query: Query, collection: &str)
    -> NodeStoreResult<Vec<Bson>>;

    /// Lists up to `limit` document ids from a collection, in no particular
    /// order. Used by the batched collection drain.
    async fn list_document_ids(
        &self,
        collection: &str,
        limit: usize,
    ) -> NodeStoreResult<Vec<String>>;

    /// Lists the names of all collections in the store.
    async fn list_collections(&self) -> NodeStoreResult<Vec<String>>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op; backends with persistent
    /// storage or external connections should override this.
    async fn shutdown(self) -> NodeStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
impl<B> StoreBackend for &B
where
    B: StoreBackend,
{
    async fn set_document(
        &self,
        id: &str,
        document: Bson,
        collection: &str,
    ) -> NodeStoreResult<()> {
        (*self)
            .set_document(id, document, collection)
            .await
    }

    async fn get_document(&self, id: &str, collection: &str) -> NodeStoreResult<Option<Bson>> {
        (*self).get_document(id, collection).await
    }

    async fn delete_document(&self, id: &str, collection: &str) -> NodeStoreResult<()> {
        (*self)
            .delete_document(id, collection)
            .await
    }

    async fn query_documents(
        &self,
        query: Query,
        collection: &str,
    ) -> NodeStoreResult<Vec<Bson>> {
        (*self)
            .query_documents(query, collection)
            .await
    }

    async fn list_document_ids(
        &self,
        collection: &str,
        limit: usize,
    ) -> NodeStoreResult<Vec<String>> {
        (*self)
            .list_document_ids(collection, limit)
            .await
    }

    async fn list_collections(&self) -> NodeStoreResult<Vec<String>> {
        (*self).list_collections().await
    }
}

#[async_trait]
impl<B> StoreBackend for &mut B
where
    B: StoreBackend,
{
    async fn set_document(
        &self,
        id: &str,
        document: Bson,
        collection: &str,
    ) -> NodeStoreResult<()> {
        (**self)
            .set_document(id, document, collection)
            .await
    }

    async fn get_document(&self, id: &str, collection: &str) -> NodeStoreResult<Option<Bson>> {
        (**self).get_document(id, collection).await
    }

    async fn delete_document(&self, id: &str, collection: &str) -> NodeStoreResult<()> {
        (**self)
            .delete_document(id, collection)
            .await
    }

    async fn query_documents(
        &self,
        query: Query,
        collection: &str,
    ) -> NodeStoreResult<Vec<Bson>> {
        (**self)
            .query_documents(query, collection)
            .await
    }

    async fn list_document_ids(
        &self,
        collection: &str,
        limit: usize,
    ) -> NodeStoreResult<Vec<String>> {
        (**self)
            .list_document_ids(collection, limit)
            .await
    }

    async fn list_collections(&self) -> NodeStoreResult<Vec<String>> {
        (**self).list_collections().await
    }
}

/// Factory trait for creating backend instances.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> NodeStoreResult<Self::Backend>;
}
