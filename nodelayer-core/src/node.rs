//! The node capability and document conversion utilities.
//!
//! A node is any entity with a stable string identifier that is persisted as a
//! first-class record. The repository is written generically against the
//! [`Node`] trait; implementing it (plus serde) is all an entity needs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bson::Bson;
use bson::{de::deserialize_from_bson, ser::serialize_to_bson};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, from_value, to_value};

use crate::error::{NodeStoreError, NodeStoreResult};

/// Separator used when building opaque refetchable identifiers.
pub const ID_SEP: &str = "|";

/// Capability trait for first-class persisted entities.
///
/// Every node has a stable string identifier and a type name from which its
/// collection name is derived. The repository never retains references to a
/// node beyond a single operation.
///
/// # Example
///
/// ```ignore
/// use nodelayer_core::node::Node;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Patient {
///     pub id: String,
///     pub name: String,
/// }
///
/// impl Node for Patient {
///     fn id(&self) -> &str { &self.id }
///     fn set_id(&mut self, id: String) { self.id = id; }
/// }
/// ```
pub trait Node: Serialize + DeserializeOwned + Send + Sync + Clone + 'static {
    /// Returns this node's identifier; empty means "not yet persisted".
    fn id(&self) -> &str;

    /// Replaces this node's identifier.
    fn set_id(&mut self, id: String);

    /// The bare type name used for collection derivation.
    ///
    /// Defaults to the last path segment of the Rust type name. Override when
    /// the persisted name must differ from the type's name.
    fn type_name() -> &'static str {
        let name = std::any::type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name)
    }
}

/// Extension trait providing serialization utilities for nodes.
///
/// Automatically implemented for all [`Node`] types.
pub trait NodeExt: Node {
    /// Converts this node to a BSON value for storage.
    fn to_bson(&self) -> NodeStoreResult<Bson>;

    /// Creates a node from a BSON value.
    fn from_bson(bson: Bson) -> NodeStoreResult<Self>;

    /// Converts this node to a JSON value.
    fn to_json(&self) -> NodeStoreResult<Value>;

    /// Creates a node from a JSON value.
    fn from_json(value: Value) -> NodeStoreResult<Self>;
}

impl<N: Node> NodeExt for N {
    fn to_bson(&self) -> NodeStoreResult<Bson> {
        Ok(serialize_to_bson(self)?)
    }

    fn from_bson(bson: Bson) -> NodeStoreResult<Self> {
        Ok(deserialize_from_bson(bson)?)
    }

    fn to_json(&self) -> NodeStoreResult<Value> {
        Ok(to_value(self)?)
    }

    fn from_json(value: Value) -> NodeStoreResult<Self> {
        Ok(from_value(value)?)
    }
}

/// Builds a refetchable opaque identifier that combines a node's id with its
/// type name and encodes the pair as base64.
pub fn marshal_id<N: Node>(id: &str) -> String {
    STANDARD.encode(format!("{id}{ID_SEP}{}", N::type_name()))
}

/// Splits an opaque identifier produced by [`marshal_id`] back into
/// `(id, type name)`.
pub fn unmarshal_id(token: &str) -> NodeStoreResult<(String, String)> {
    let decoded = STANDARD
        .decode(token)
        .map_err(|err| NodeStoreError::Serialization(format!("invalid opaque id: {err}")))?;
    let combined = String::from_utf8(decoded)
        .map_err(|err| NodeStoreError::Serialization(format!("invalid opaque id: {err}")))?;

    match combined.split_once(ID_SEP) {
        Some((id, type_name)) => Ok((id.to_string(), type_name.to_string())),
        None => Err(NodeStoreError::Serialization(format!(
            "opaque id is missing the `{ID_SEP}` separator"
        ))),
    }
}

/// Common behavior for stock persisted records.
///
/// A ready-made node shape for models that do not need custom fields beyond a
/// name and description. Derived models that do not need the name should use
/// a placeholder such as "-".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub id: String,

    /// All models have a non-nullable name field.
    #[serde(default)]
    pub name: String,

    /// All records have an optional description.
    #[serde(default)]
    pub description: String,

    /// Soft-deletion marker. Kept non-optional so that `false` is stored
    /// explicitly rather than omitted.
    #[serde(default)]
    pub deleted: bool,

    /// Audit tracking fields.
    #[serde(default, rename = "createdByUID")]
    pub created_by_uid: String,
    #[serde(default, rename = "updatedByUID")]
    pub updated_by_uid: String,
}

impl Node for Model {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
