//! Closed wire vocabularies for filter value kinds, comparison operators and
//! sort direction.
//!
//! Each enum deserializes from a fixed SCREAMING_SNAKE_CASE wire string. An
//! unrecognized string is rejected at the boundary with a typed validation
//! error; the enums themselves cannot hold invalid members.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NodeStoreError;

/// How a filter's comparison value should be coerced before it is handed to
/// the store's comparison primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    /// Boolean field; the filter value must be the literal string "true" or "false".
    Boolean,
    /// Integer field; the filter value must parse as a base-10 integer.
    Integer,
    /// Floating-point field; the filter value must already be a double.
    Number,
    /// Timestamp field; the filter value must already be a datetime.
    Timestamp,
    /// String field; the filter value is passed through unchanged.
    String,
}

impl FieldType {
    /// The wire name of this field type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Boolean => "BOOLEAN",
            FieldType::Integer => "INTEGER",
            FieldType::Number => "NUMBER",
            FieldType::Timestamp => "TIMESTAMP",
            FieldType::String => "STRING",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = NodeStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BOOLEAN" => Ok(FieldType::Boolean),
            "INTEGER" => Ok(FieldType::Integer),
            "NUMBER" => Ok(FieldType::Number),
            "TIMESTAMP" => Ok(FieldType::Timestamp),
            "STRING" => Ok(FieldType::String),
            other => Err(NodeStoreError::InvalidFilter(format!(
                "unknown field type: {other}"
            ))),
        }
    }
}

/// Supported comparison operators for filter parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    /// Strictly less than.
    LessThan,
    /// Less than or equal to.
    LessThanOrEqualTo,
    /// Equal to (exact match).
    Equal,
    /// Strictly greater than.
    GreaterThan,
    /// Greater than or equal to.
    GreaterThanOrEqualTo,
    /// Field value is a member of the supplied array.
    In,
    /// Array field contains the supplied value.
    Contains,
}

impl Operation {
    /// Maps this operation to the store's wire comparison operator.
    ///
    /// The mapping is fixed and total over the enum's members; after adding a
    /// new operation the exhaustive match forces this function to be updated.
    pub fn wire_operator(&self) -> &'static str {
        match self {
            Operation::LessThan => "<",
            Operation::LessThanOrEqualTo => "<=",
            Operation::Equal => "==",
            Operation::GreaterThan => ">",
            Operation::GreaterThanOrEqualTo => ">=",
            Operation::In => "in",
            Operation::Contains => "array-contains",
        }
    }

    /// The wire name of this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::LessThan => "LESS_THAN",
            Operation::LessThanOrEqualTo => "LESS_THAN_OR_EQUAL_TO",
            Operation::Equal => "EQUAL",
            Operation::GreaterThan => "GREATER_THAN",
            Operation::GreaterThanOrEqualTo => "GREATER_THAN_OR_EQUAL_TO",
            Operation::In => "IN",
            Operation::Contains => "CONTAINS",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = NodeStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LESS_THAN" => Ok(Operation::LessThan),
            "LESS_THAN_OR_EQUAL_TO" => Ok(Operation::LessThanOrEqualTo),
            "EQUAL" => Ok(Operation::Equal),
            "GREATER_THAN" => Ok(Operation::GreaterThan),
            "GREATER_THAN_OR_EQUAL_TO" => Ok(Operation::GreaterThanOrEqualTo),
            "IN" => Ok(Operation::In),
            "CONTAINS" => Ok(Operation::Contains),
            other => Err(NodeStoreError::InvalidFilter(format!(
                "unknown operation: {other}"
            ))),
        }
    }
}

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    /// Ascending order (A to Z, 0 to 9, earliest to latest).
    Asc,
    /// Descending order (Z to A, 9 to 0, latest to earliest).
    Desc,
}

impl SortOrder {
    /// The wire name of this sort order.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = NodeStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            other => Err(NodeStoreError::InvalidFilter(format!(
                "unknown sort order: {other}"
            ))),
        }
    }
}
