//! Main nodelayer crate providing a unified interface for typed node storage.
//!
//! This crate is the primary entry point for users of the nodelayer
//! framework. It re-exports the core types and functionality from the
//! sub-crates and provides convenient access to the bundled storage backends.
//!
//! # Features
//!
//! - **Type-safe node storage** - Define your data structures with Serde and
//!   store them safely
//! - **Typed query composition** - Wire-shaped filter and sort inputs turned
//!   into coerced, backend-agnostic queries
//! - **Cursor paging** - Relay-style `first`/`last`/`after`/`before` windows
//!   with opaque continuation cursors
//! - **Pluggable backends** - An in-memory backend ships in the box; any
//!   document store can plug in through the `StoreBackend` trait
//!
//! # Quick Start
//!
//! ```ignore
//! use nodelayer::{prelude::*, memory::InMemoryStore};
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
//! async fn main() {
//!     // Create a store over the in-memory backend, bound to an environment.
//!     let backend = InMemoryStore::builder().build().await.unwrap();
//!     let store = NodeStore::new(backend, StoreSettings::from_env());
//!
//!     // Get a typed collection for User nodes
//!     let users = store.nodes::<User>();
//!
//!     // Create a user; an id is assigned if the node has none
//!     let mut user = User { id: String::new(), name: "Alice".to_string() };
//!     let (id, created_at) = users.create(&mut user).await.unwrap();
//!     println!("created {id} at {created_at}");
//!
//!     // Query the first page of users named Alice
//!     let filter = FilterInput {
//!         search: None,
//!         filter_by: vec![FilterParam {
//!             field_name: "name".to_string(),
//!             field_type: FieldType::String,
//!             comparison_operation: Operation::Equal,
//!             field_value: "Alice".into(),
//!         }],
//!     };
//!     let pagination = PaginationInput { first: 10, ..Default::default() };
//!     let (page, info) = users
//!         .query(Some(&pagination), Some(&filter), None)
//!         .await
//!         .unwrap();
//!     println!("got {} users, more: {}", page.len(), info.has_next_page);
//!
//!     // Shutdown the store
//!     store.shutdown().await.unwrap();
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - Fast in-memory storage for development and testing

pub mod prelude;

pub use nodelayer_core::{
    backend, collection, cursor, enums, error, node, page, query, settings, store,
};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use nodelayer_memory::{InMemoryStore, InMemoryStoreBuilder};
}
