//! In-memory storage backend for nodelayer.
//!
//! This crate provides a thread-safe, in-memory implementation of the
//! `StoreBackend` trait. It uses async-aware read-write locks for concurrent
//! access and is ideal for development, testing, and small-scale deployments.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Type-erased storage** - Stores documents as BSON for flexibility
//! - **Full query support** - Supports filtering, sorting, and paging windows
//!
//! # Quick Start
//!
//! ```ignore
//! use nodelayer_core::{node::Node, settings::StoreSettings, store::NodeStore};
//! use nodelayer_memory::InMemoryStore;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct User {
//!     pub id: String,
//!     pub name: String,
//! }
//!
//! impl Node for User {
//!     fn id(&self) -> &str { &self.id }
//!     fn set_id(&mut self, id: String) { self.id = id; }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = InMemoryStore::builder().build().await?;
//!     let store = NodeStore::new(backend, StoreSettings::new("staging"));
//!
//!     let mut user = User { id: String::new(), name: "Alice".to_string() };
//!     store.nodes::<User>().create(&mut user).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as nodelayer_memory;

pub mod evaluator;
pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};

#[cfg(test)]
mod tests {
    //! Repository-level tests run against the in-memory backend.

    use bson::Bson;
    use serde::{Deserialize, Serialize};

    use nodelayer_core::{
        enums::{FieldType, Operation, SortOrder},
        error::NodeStoreError,
        node::{Model, Node},
        query::{FilterInput, FilterParam, PaginationInput, SortInput, SortParam},
        settings::StoreSettings,
        store::NodeStore,
    };

    use crate::InMemoryStore;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Dummy {
        id: String,
        name: String,
        count: i64,
    }

    impl Node for Dummy {
        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: String) {
            self.id = id;
        }
    }

    fn staging_store() -> NodeStore<InMemoryStore> {
        NodeStore::new(InMemoryStore::new(), StoreSettings::new("staging"))
    }

    fn dummy(name: &str, count: i64) -> Dummy {
        Dummy { id: String::new(), name: name.to_string(), count }
    }

    #[tokio::test]
    async fn create_assigns_an_id_and_timestamp() {
        let store = staging_store();
        let nodes = store.nodes::<Dummy>();

        let mut node = dummy("test", 1);
        let (id, _created_at) = nodes.create(&mut node).await.unwrap();

        assert!(!id.is_empty());
        assert_eq!(node.id(), id);

        let fetched = nodes.retrieve(&id).await.unwrap();
        assert_eq!(fetched.name, "test");
    }

    #[tokio::test]
    async fn create_keeps_a_caller_supplied_id() {
        let store = staging_store();
        let nodes = store.nodes::<Dummy>();

        let mut node = dummy("pinned", 1);
        node.set_id("fixed-id".to_string());

        let (id, _) = nodes.create(&mut node).await.unwrap();
        assert_eq!(id, "fixed-id");
    }

    #[tokio::test]
    async fn retrieve_missing_node_is_not_found() {
        let store = staging_store();
        let nodes = store.nodes::<Dummy>();

        let err = nodes
            .retrieve("no-such-id")
            .await
            .unwrap_err();
        assert!(matches!(err, NodeStoreError::NodeNotFound(_, _)));
    }

    #[tokio::test]
    async fn update_of_a_nonexistent_node_is_idempotent() {
        let store = staging_store();
        let nodes = store.nodes::<Dummy>();

        let node = Dummy { id: "ghost".to_string(), name: "ghost".to_string(), count: 0 };
        // Writes the document rather than failing.
        nodes
            .update("ghost", &node)
            .await
            .unwrap();

        let fetched = nodes.retrieve("ghost").await.unwrap();
        assert_eq!(fetched.name, "ghost");
    }

    #[tokio::test]
    async fn delete_is_idempotent_and_reports_success() {
        let store = staging_store();
        let nodes = store.nodes::<Dummy>();

        let mut node = dummy("doomed", 1);
        let (id, _) = nodes.create(&mut node).await.unwrap();

        assert!(nodes.delete(&id).await.unwrap());
        assert!(nodes.delete(&id).await.unwrap());
        assert!(nodes.delete("never-existed").await.unwrap());
    }

    #[tokio::test]
    async fn end_to_end_create_retrieve_delete() {
        let store = staging_store();
        let nodes = store.nodes::<Model>();

        let mut model = Model { name: "test".to_string(), ..Model::default() };
        let (id, _) = nodes.create(&mut model).await.unwrap();

        let fetched = nodes.retrieve(&id).await.unwrap();
        assert_eq!(fetched.name, "test");

        assert!(nodes.delete(&id).await.unwrap());

        let err = nodes.retrieve(&id).await.unwrap_err();
        assert!(matches!(err, NodeStoreError::NodeNotFound(_, _)));
    }

    #[tokio::test]
    async fn collections_are_suffixed_with_the_environment() {
        let store = staging_store();
        assert_eq!(store.nodes::<Dummy>().name(), "dummy_bewell_staging");
    }

    async fn seeded_store(n: i64) -> NodeStore<InMemoryStore> {
        let store = staging_store();
        let nodes = store.nodes::<Dummy>();
        for i in 0..n {
            let mut node = dummy(&format!("node-{i:03}"), i);
            nodes.create(&mut node).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn windowed_query_reports_page_info() {
        let store = seeded_store(5).await;
        let nodes = store.nodes::<Dummy>();

        let sort = SortInput {
            sort_by: vec![SortParam {
                field_name: "count".to_string(),
                sort_order: SortOrder::Asc,
            }],
        };
        let pagination = PaginationInput { first: 2, ..Default::default() };

        let (page, info) = nodes
            .query(Some(&pagination), None, Some(&sort))
            .await
            .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page[0].count, 0);
        assert_eq!(page[1].count, 1);
        assert!(info.has_next_page);
        assert!(!info.has_previous_page);
        assert!(info.start_cursor.is_some());
        assert!(info.end_cursor.is_some());

        // Resume two rows in.
        let pagination = PaginationInput {
            first: 2,
            after: "2".to_string(),
            ..Default::default()
        };
        let (page, info) = nodes
            .query(Some(&pagination), None, Some(&sort))
            .await
            .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page[0].count, 2);
        assert!(info.has_next_page);
        assert!(info.has_previous_page);
    }

    #[tokio::test]
    async fn final_window_has_no_next_page() {
        let store = seeded_store(5).await;
        let nodes = store.nodes::<Dummy>();

        let pagination = PaginationInput {
            first: 10,
            after: "3".to_string(),
            ..Default::default()
        };
        let (page, info) = nodes
            .query(Some(&pagination), None, None)
            .await
            .unwrap();

        assert_eq!(page.len(), 2);
        assert!(!info.has_next_page);
        assert!(info.has_previous_page);
    }

    #[tokio::test]
    async fn first_and_last_together_are_rejected() {
        let store = seeded_store(3).await;
        let nodes = store.nodes::<Dummy>();

        let pagination = PaginationInput { first: 1, last: 1, ..Default::default() };
        let err = nodes
            .query(Some(&pagination), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, NodeStoreError::InvalidPagination(_)));
    }

    #[tokio::test]
    async fn filtered_query_applies_coerced_comparisons() {
        let store = seeded_store(5).await;
        let nodes = store.nodes::<Dummy>();

        let filter = FilterInput {
            search: None,
            filter_by: vec![FilterParam {
                field_name: "count".to_string(),
                field_type: FieldType::Integer,
                comparison_operation: Operation::GreaterThanOrEqualTo,
                field_value: Bson::String("3".to_string()),
            }],
        };

        let (page, info) = nodes
            .query(None, Some(&filter), None)
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert!(!info.has_next_page);
        assert!(page.iter().all(|node| node.count >= 3));
    }

    #[tokio::test]
    async fn delete_collection_drains_every_document() {
        let store = seeded_store(10).await;
        let name = store
            .settings()
            .suffix_collection("dummy");

        store
            .delete_collection(&name, 3)
            .await
            .unwrap();

        let (page, _) = store
            .nodes::<Dummy>()
            .query(None, None, None)
            .await
            .unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn list_collections_reflects_writes() {
        let store = seeded_store(1).await;
        let collections = store.list_collections().await.unwrap();
        assert_eq!(collections, vec!["dummy_bewell_staging".to_string()]);
    }
}
