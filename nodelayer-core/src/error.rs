//! Error types and result types for node store operations.
//!
//! The taxonomy distinguishes caller mistakes (validation errors), missing
//! records (not-found errors) and failures of the underlying store. Validation
//! and not-found errors are returned verbatim; nothing in this layer retries.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a node store.
#[derive(Error, Debug)]
pub enum NodeStoreError {
    /// Serialization/deserialization error when converting between document formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Malformed pagination input, e.g. both `first` and `last` set, or an
    /// `after`/`before` value that does not parse as a non-negative integer.
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),
    /// A filter parameter whose value cannot be coerced to the type implied by
    /// its field type, or an unrecognized enum wire value.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
    /// A pagination cursor token that cannot be decoded.
    #[error("Unable to decode cursor: {0}")]
    InvalidCursor(String),
    /// The requested node was not found in the collection.
    /// The first argument is the node ID, the second is the collection name.
    #[error("Node {0} not found in collection {1}")]
    NodeNotFound(String, String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
    /// An unknown error occurred.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// A specialized `Result` type for node store operations.
pub type NodeStoreResult<T> = Result<T, NodeStoreError>;

impl From<BsonError> for NodeStoreError {
    fn from(err: BsonError) -> Self {
        NodeStoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for NodeStoreError {
    fn from(err: SerdeJsonError) -> Self {
        NodeStoreError::Serialization(err.to_string())
    }
}
