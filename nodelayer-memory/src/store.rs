//! In-memory storage implementation for node stores.
//!
//! This module provides a simple but complete in-memory backend that stores
//! documents as BSON values in HashMaps with async-safe read-write locks.

use async_trait::async_trait;
use bson::Bson;
use mea::rwlock::RwLock;
use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use nodelayer_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    enums::SortOrder,
    error::NodeStoreResult,
    query::Query,
};

use crate::evaluator::{Comparable, DocumentEvaluator};

type CollectionMap = HashMap<String, Bson>;
type StoreMap = HashMap<String, CollectionMap>;

/// Thread-safe in-memory document storage backend.
///
/// This struct implements the [`StoreBackend`] trait to provide a fully
/// functional node store that operates entirely in memory using async-aware
/// read-write locks. All documents are stored as BSON values indexed by their
/// string id.
///
/// # Thread Safety
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state,
/// allowing it to be safely shared across async tasks. Multiple clones of the
/// same instance share the same underlying data.
///
/// # Performance
///
/// Queries scan all documents in a collection (no indexing). For small to
/// medium datasets this is typically acceptable; larger datasets want a
/// persistent backend.
///
/// # Example
///
/// ```ignore
/// use nodelayer_memory::InMemoryStore;
/// use nodelayer_core::backend::StoreBackend;
/// use bson::{Bson, doc};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryStore::new();
///
///     let doc = Bson::Document(doc! { "id": "a", "name": "Alice" });
///     store.set_document("a", doc, "users").await?;
///
///     let fetched = store.get_document("a", "users").await?;
///     assert!(fetched.is_some());
///
///     Ok(())
/// }
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// The main storage map: collection_name -> (document_id -> document)
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory node store backend.
    ///
    /// The returned store is ready for use and contains no collections or
    /// documents.
    pub fn new() -> Self {
        Self { store: Arc::new(RwLock::new(StoreMap::new())) }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    ///
    /// Currently, the builder simply creates a default store, but it can be
    /// extended in future versions to support configuration options.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder
    }
}

/// Compares two documents on a multi-key sort specification, first key as the
/// primary. Missing fields and incomparable values sort as equal.
fn compare_documents(a: &Bson, b: &Bson, sort: &[nodelayer_core::query::Sort]) -> Ordering {
    for key in sort {
        let left = a
            .as_document()
            .and_then(|doc| doc.get(&key.field))
            .map(Comparable::from)
            .unwrap_or(Comparable::Null);
        let right = b
            .as_document()
            .and_then(|doc| doc.get(&key.field))
            .map(Comparable::from)
            .unwrap_or(Comparable::Null);

        let ordering = match key.order {
            SortOrder::Asc => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
            SortOrder::Desc => right.partial_cmp(&left).unwrap_or(Ordering::Equal),
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn set_document(
        &self,
        id: &str,
        document: Bson,
        collection: &str,
    ) -> NodeStoreResult<()> {
        let mut store = self.store.write().await;

        store
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);

        Ok(())
    }

    async fn get_document(&self, id: &str, collection: &str) -> NodeStoreResult<Option<Bson>> {
        let store = self.store.read().await;

        Ok(store
            .get(collection)
            .and_then(|col| col.get(id))
            .cloned())
    }

    async fn delete_document(&self, id: &str, collection: &str) -> NodeStoreResult<()> {
        let mut store = self.store.write().await;

        // Absent collections and ids are a no-op.
        if let Some(collection_map) = store.get_mut(collection) {
            collection_map.remove(id);
        }

        Ok(())
    }

    async fn query_documents(&self, query: Query, collection: &str) -> NodeStoreResult<Vec<Bson>> {
        let store = self.store.read().await;
        let collection_map = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        let mut documents = match &query.filter {
            Some(filter) => DocumentEvaluator::filter_documents(collection_map.values(), filter)?,
            None => collection_map
                .values()
                .cloned()
                .collect::<Vec<_>>(),
        };

        if query.sort.is_empty() {
            // Unsorted scans still need a stable order for paging windows.
            documents.sort_by(|a, b| {
                let left = a
                    .as_document()
                    .and_then(|doc| doc.get_str("id").ok())
                    .unwrap_or_default();
                let right = b
                    .as_document()
                    .and_then(|doc| doc.get_str("id").ok())
                    .unwrap_or_default();

                left.cmp(right)
            });
        } else {
            documents.sort_by(|a, b| compare_documents(a, b, &query.sort));
        }

        Ok(documents
            .into_iter()
            .skip(query.offset.unwrap_or(0))
            .take(query.limit.unwrap_or(usize::MAX))
            .collect())
    }

    async fn list_document_ids(
        &self,
        collection: &str,
        limit: usize,
    ) -> NodeStoreResult<Vec<String>> {
        let store = self.store.read().await;

        Ok(store
            .get(collection)
            .map(|col| {
                col.keys()
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_collections(&self) -> NodeStoreResult<Vec<String>> {
        Ok(self
            .store
            .read()
            .await
            .keys()
            .cloned()
            .collect())
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds and returns a new [`InMemoryStore`] instance.
    ///
    /// This always succeeds and returns a freshly initialized store.
    async fn build(self) -> NodeStoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}
