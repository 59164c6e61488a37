//! A typed access layer over schemaless document stores.
//!
//! This crate is the core of the nodelayer project and provides:
//!
//! - **Node traits** ([`node`]) - The capability trait for persisted entities
//! - **Store backend abstraction** ([`backend`]) - The document-store seam
//! - **Query composition** ([`query`]) - Typed filter/sort inputs and the
//!   type-directed query composer
//! - **Pagination** ([`page`], [`cursor`]) - Window resolution, page
//!   summaries and opaque cursors
//! - **Node repository** ([`store`], [`collection`]) - CRUD and windowed
//!   queries for any node type, plus batched collection deletion
//! - **Settings** ([`settings`]) - Injected environment configuration and
//!   collection-name derivation
//! - **Error handling** ([`error`]) - Error taxonomy and result alias
//!
//! # Example
//!
//! ```ignore
//! use nodelayer_core::{node::Node, settings::StoreSettings, store::NodeStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Patient {
//!     pub id: String,
//!     pub name: String,
//! }
//!
//! impl Node for Patient {
//!     fn id(&self) -> &str { &self.id }
//!     fn set_id(&mut self, id: String) { self.id = id; }
//! }
//!
//! # async fn example(backend: impl nodelayer_core::backend::StoreBackend) {
//! let store = NodeStore::new(backend, StoreSettings::new("staging"));
//! let mut patient = Patient { id: String::new(), name: "Juha".to_string() };
//! let (id, _created_at) = store.nodes::<Patient>().create(&mut patient).await.unwrap();
//! # }
//! ```

#[allow(unused_extern_crates)]
extern crate self as nodelayer_core;

pub mod backend;
pub mod collection;
pub mod cursor;
pub mod enums;
pub mod error;
pub mod node;
pub mod page;
pub mod query;
pub mod settings;
pub mod store;
