//! Main node store interface.
//!
//! A [`NodeStore`] pairs a storage backend with injected environment
//! settings and hands out typed [`NodeCollection`]s whose names are derived
//! from the node type. It also hosts the batched collection drain.

use crate::{
    backend::StoreBackend,
    collection::NodeCollection,
    error::{NodeStoreError, NodeStoreResult},
    node::Node,
    settings::StoreSettings,
};

/// A strongly-typed node store bound to a specific backend implementation.
///
/// The store is stateless between calls and safe for concurrent use by
/// multiple callers.
///
/// # Example
///
/// ```ignore
/// let store = NodeStore::new(backend, StoreSettings::new("staging"));
/// let models = store.nodes::<Model>();
/// ```
#[derive(Debug)]
pub struct NodeStore<B: StoreBackend> {
    backend: B,
    settings: StoreSettings,
}

impl<B: StoreBackend> NodeStore<B> {
    /// Creates a new node store with the given backend and settings.
    pub fn new(backend: B, settings: StoreSettings) -> Self {
        Self { backend, settings }
    }

    /// The injected environment settings.
    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Gets a typed collection for the specified node type.
    ///
    /// The collection name is the node's lower-cased type name plus the
    /// environment suffix.
    pub fn nodes<'a, N: Node>(&'a self) -> NodeCollection<'a, B, N> {
        NodeCollection::new(self.settings.collection_name::<N>(), &self.backend)
    }

    /// Gets a typed collection with an explicit (already suffixed) name.
    pub fn nodes_in<'a, N: Node>(&'a self, name: &str) -> NodeCollection<'a, B, N> {
        NodeCollection::new(name.to_string(), &self.backend)
    }

    /// Lists all collections in the store.
    pub async fn list_collections(&self) -> NodeStoreResult<Vec<String>> {
        self.backend.list_collections().await
    }

    /// Recursively drains a collection in bounded-size batches.
    ///
    /// Each round lists up to `batch_size` document ids and deletes them
    /// best-effort: individual delete failures are logged and skipped, while
    /// a listing failure terminates the drain. The operation is not
    /// transactional; concurrent writers can race with it, and the contract
    /// only guarantees eventual emptiness absent concurrent inserts.
    /// Cancellation is honored between batches by dropping the future.
    pub async fn delete_collection(&self, name: &str, batch_size: usize) -> NodeStoreResult<()> {
        loop {
            let ids = self
                .backend
                .list_document_ids(name, batch_size)
                .await?;

            if ids.is_empty() {
                tracing::debug!(collection = name, "collection drain complete");
                return Ok(());
            }

            let attempted = ids.len();
            let mut failed = 0_usize;

            for id in ids {
                if let Err(err) = self
                    .backend
                    .delete_document(&id, name)
                    .await
                {
                    failed += 1;
                    tracing::warn!(
                        collection = name,
                        id = %id,
                        error = %err,
                        "skipping document that failed to delete during drain"
                    );
                }
            }

            // A batch where nothing deleted would refetch the same ids forever.
            if failed == attempted {
                return Err(NodeStoreError::Backend(format!(
                    "collection drain made no progress: all {attempted} deletes in a batch failed"
                )));
            }

            tracing::debug!(
                collection = name,
                deleted = attempted - failed,
                failed,
                "drained collection batch"
            );
        }
    }

    /// Shuts down the store and releases backend resources.
    pub async fn shutdown(self) -> NodeStoreResult<()> {
        self.backend.shutdown().await?;

        Ok(())
    }
}
