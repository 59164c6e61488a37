//! Convenient re-exports of commonly used types from nodelayer.
//!
//! Import this prelude module to quickly access the most frequently used
//! types and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use nodelayer::prelude::*;
//! ```
//!
//! This provides access to:
//! - Node traits and the stock model shape
//! - Store backends and builders
//! - Query composition, filtering and sorting inputs
//! - Pagination windows and cursors
//! - Error types and settings

pub use nodelayer_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    collection::NodeCollection,
    cursor::Cursor,
    enums::{FieldType, Operation, SortOrder},
    error::{NodeStoreError, NodeStoreResult},
    node::{Model, Node, NodeExt, marshal_id, unmarshal_id},
    page::{DEFAULT_PAGE_SIZE, PageInfo, PageWindow},
    query::{
        Expr, FilterInput, FilterParam, PaginationInput, Query, QueryBuilder, QueryVisitor, Sort,
        SortInput, SortParam, compose_query,
    },
    settings::StoreSettings,
    store::NodeStore,
};
