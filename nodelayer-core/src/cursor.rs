//! Opaque pagination cursors.
//!
//! A cursor is a zero-based record offset wrapped in a compact MessagePack map
//! envelope and base64-encoded for transport. Callers treat the token as
//! opaque; the codec round-trips every representable offset, negative offsets
//! included (used internally as a "before start" sentinel).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{NodeStoreError, NodeStoreResult};

/// An opaque "position" for a record, for use in pagination.
///
/// Cursors use zero-based indexing and are created transiently to encode a
/// position; they are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Zero-based record offset.
    #[serde(rename = "Offset")]
    pub offset: i64,
}

impl Cursor {
    /// Creates a cursor from an offset.
    pub fn new(offset: i64) -> Self {
        Self { offset }
    }

    /// Encodes this cursor into a transport-safe opaque string.
    pub fn encode(&self) -> NodeStoreResult<String> {
        let bytes = rmp_serde::to_vec_named(self)
            .map_err(|err| NodeStoreError::InvalidCursor(err.to_string()))?;

        Ok(STANDARD.encode(bytes))
    }

    /// Decodes an opaque cursor string back into a cursor.
    ///
    /// Malformed base64 or a malformed envelope yields a decoding error rather
    /// than a panic.
    pub fn decode(token: &str) -> NodeStoreResult<Self> {
        let bytes = STANDARD
            .decode(token)
            .map_err(|err| NodeStoreError::InvalidCursor(err.to_string()))?;

        rmp_serde::from_slice(&bytes).map_err(|err| NodeStoreError::InvalidCursor(err.to_string()))
    }
}

/// Creates a cursor for `offset` and immediately encodes it.
pub fn encode_offset(offset: i64) -> NodeStoreResult<String> {
    Cursor::new(offset).encode()
}
