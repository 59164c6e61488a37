//! Query construction and the typed filter/sort composer.
//!
//! This module carries the wire-shaped filter, sort and pagination inputs and
//! turns a `(FilterInput, SortInput)` pair into an unpaginated [`Query`]
//! against the underlying store. Filter values are coerced according to their
//! declared [`FieldType`] before they reach the store's comparison primitive;
//! a value that does not coerce rejects the whole composition, no partial
//! query is returned.
//!
//! # Composition
//!
//! ```ignore
//! use nodelayer_core::query::{FilterInput, SortInput, compose_query};
//!
//! let query = compose_query(Some(&filter), Some(&sort))?;
//! ```

use bson::Bson;
use serde::{Deserialize, Serialize};

use crate::enums::{FieldType, Operation, SortOrder};
use crate::error::{NodeStoreError, NodeStoreResult};

/// A single field filter parameter, as received on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParam {
    /// The document field the comparison applies to.
    pub field_name: String,
    /// How [`FilterParam::field_value`] should be coerced.
    pub field_type: FieldType,
    /// The comparison operator.
    pub comparison_operation: Operation,
    /// The untyped comparison value; checked against `field_type` during
    /// composition.
    pub field_value: Bson,
}

/// A generic container for strongly typed filter parameters.
///
/// `filter_by` entries are ANDed in input order. The free-text `search` term
/// is carried for upstream layers; this layer does not interpret it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterInput {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub filter_by: Vec<FilterParam>,
}

/// A single field sort parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortParam {
    pub field_name: String,
    pub sort_order: SortOrder,
}

/// A generic container for strongly typed sort parameters.
///
/// The first entry is the primary sort key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortInput {
    #[serde(default)]
    pub sort_by: Vec<SortParam>,
}

/// Paging parameters, as received on the wire.
///
/// Zero and the empty string mean "not set", matching the wire contract.
/// `after`/`before` must be empty or parse as non-negative integers; the
/// public cursor form stays opaque to callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationInput {
    #[serde(default)]
    pub first: i64,
    #[serde(default)]
    pub last: i64,
    #[serde(default)]
    pub after: String,
    #[serde(default)]
    pub before: String,
}

/// Sort specification on a composed query.
#[derive(Debug, Clone)]
pub struct Sort {
    /// The field name to sort by.
    pub field: String,
    /// The sort direction.
    pub order: SortOrder,
}

/// A filter expression for querying documents.
///
/// The composer only produces conjunctions of field comparisons, which is all
/// the underlying stores support for this layer.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Logical AND of multiple expressions (all must match).
    And(Vec<Expr>),
    /// Field comparison expression.
    Field {
        /// The field name to compare.
        field: String,
        /// The comparison operator.
        op: Operation,
        /// The (already coerced) value to compare against.
        value: Bson,
    },
}

impl Expr {
    /// Creates a field comparison expression.
    pub fn field(field: String, op: Operation, value: Bson) -> Self {
        Expr::Field { field, op, value }
    }

    /// Combines this expression with another using logical AND.
    ///
    /// If this expression is already an AND, the other expression is appended
    /// to the list. Otherwise, a new AND expression is created.
    pub fn and(self, other: Expr) -> Self {
        match self {
            Expr::And(mut list) => {
                list.push(other);
                Expr::And(list)
            }
            _ => Expr::And(vec![self, other]),
        }
    }
}

/// A structured query for retrieving and filtering documents.
///
/// Use [`QueryBuilder`] for ergonomic construction; [`compose_query`] builds
/// one from wire-shaped filter and sort inputs.
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Optional filter expression to match documents.
    pub filter: Option<Expr>,
    /// Sort specifications, primary key first.
    pub sort: Vec<Sort>,
    /// Maximum number of documents to return.
    pub limit: Option<usize>,
    /// Number of documents to skip (for pagination).
    pub offset: Option<usize>,
}

impl Query {
    /// Creates a new empty query with no filters or limits.
    pub fn new() -> Self {
        Query::default()
    }

    /// Creates a new query builder for fluent construction.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// Creates a new query builder.
    pub fn new() -> Self {
        QueryBuilder { query: Query::default() }
    }

    /// Sets the filter expression for this query.
    pub fn filter(mut self, filter: Expr) -> Self {
        self.query.filter = Some(filter);
        self
    }

    /// Appends a sort key; the first call sets the primary key.
    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.query.sort.push(Sort { field: field.into(), order });
        self
    }

    /// Sets the maximum number of documents to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.query.limit = Some(limit);
        self
    }

    /// Sets the number of documents to skip (for pagination).
    pub fn offset(mut self, offset: usize) -> Self {
        self.query.offset = Some(offset);
        self
    }

    /// Builds and returns the final query.
    pub fn build(self) -> Query {
        self.query
    }
}

/// Visitor over [`Expr`] trees, used by backends to execute or translate
/// filter expressions.
pub trait QueryVisitor {
    type Output;
    type Error: Into<NodeStoreError>;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error>;
    fn visit_field(
        &mut self,
        field: &str,
        op: Operation,
        value: &Bson,
    ) -> Result<Self::Output, Self::Error>;

    fn visit_expr(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        match expr {
            Expr::And(exprs) => self.visit_and(exprs),
            Expr::Field { field, op, value } => self.visit_field(field, *op, value),
        }
    }
}

/// Coerces a filter parameter's value according to its declared field type.
///
/// The failure modes are deliberate and load-bearing: a Boolean filter only
/// accepts the literal strings "true"/"false", an Integer filter accepts a
/// base-10 string or an existing integer, Number and Timestamp filters must
/// already carry the right BSON kind, and String filters pass through
/// unchanged.
fn coerce_field_value(param: &FilterParam) -> NodeStoreResult<Bson> {
    match param.field_type {
        FieldType::Boolean => match &param.field_value {
            Bson::String(s) => match s.as_str() {
                "true" => Ok(Bson::Boolean(true)),
                "false" => Ok(Bson::Boolean(false)),
                other => Err(NodeStoreError::InvalidFilter(format!(
                    "expected a boolean filter value of \"true\" or \"false\" on `{}`; got {other:?}",
                    param.field_name
                ))),
            },
            other => Err(NodeStoreError::InvalidFilter(format!(
                "expected the boolean filter value on `{}` to be a string; got {other:?}",
                param.field_name
            ))),
        },
        FieldType::Integer => match &param.field_value {
            Bson::String(s) => s
                .parse::<i64>()
                .map(Bson::Int64)
                .map_err(|_| {
                    NodeStoreError::InvalidFilter(format!(
                        "expected the filter value on `{}` to be parseable as an int; got {s:?}",
                        param.field_name
                    ))
                }),
            Bson::Int32(n) => Ok(Bson::Int64(i64::from(*n))),
            Bson::Int64(n) => Ok(Bson::Int64(*n)),
            other => Err(NodeStoreError::InvalidFilter(format!(
                "expected an integer filter value on `{}`; got {other:?}",
                param.field_name
            ))),
        },
        FieldType::Number => match &param.field_value {
            Bson::Double(n) => Ok(Bson::Double(*n)),
            other => Err(NodeStoreError::InvalidFilter(format!(
                "expected a floating point filter value on `{}`; got {other:?}",
                param.field_name
            ))),
        },
        FieldType::Timestamp => match &param.field_value {
            Bson::DateTime(ts) => Ok(Bson::DateTime(*ts)),
            other => Err(NodeStoreError::InvalidFilter(format!(
                "expected a timestamp filter value on `{}`; got {other:?}",
                param.field_name
            ))),
        },
        FieldType::String => Ok(param.field_value.clone()),
    }
}

/// Composes an unpaginated query from optional filter and sort inputs.
///
/// With no filter and no sort this returns the full unfiltered query for the
/// target collection. Filter parameters are ANDed in input order after
/// type-directed coercion; a coercion failure short-circuits and no partial
/// query is returned. Sort parameters are applied in input order, first entry
/// as the primary key.
pub fn compose_query(
    filter: Option<&FilterInput>,
    sort: Option<&SortInput>,
) -> NodeStoreResult<Query> {
    let mut query = Query::new();

    if let Some(filter) = filter {
        let mut exprs = Vec::with_capacity(filter.filter_by.len());

        for param in &filter.filter_by {
            let value = coerce_field_value(param)?;

            exprs.push(Expr::field(
                param.field_name.clone(),
                param.comparison_operation,
                value,
            ));
        }

        if !exprs.is_empty() {
            query.filter = Some(Expr::And(exprs));
        }
    }

    if let Some(sort) = sort {
        for param in &sort.sort_by {
            query.sort.push(Sort {
                field: param.field_name.clone(),
                order: param.sort_order,
            });
        }
    }

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_of(field_type: FieldType, op: Operation, value: Bson) -> FilterInput {
        FilterInput {
            search: None,
            filter_by: vec![FilterParam {
                field_name: "field".to_string(),
                field_type,
                comparison_operation: op,
                field_value: value,
            }],
        }
    }

    #[test]
    fn nil_filter_and_sort_compose_to_the_full_query() {
        let query = compose_query(None, None).unwrap();
        assert!(query.filter.is_none());
        assert!(query.sort.is_empty());
        assert!(query.limit.is_none());
    }

    #[test]
    fn boolean_filter_accepts_literal_strings_only() {
        let ok = filter_of(
            FieldType::Boolean,
            Operation::Equal,
            Bson::String("false".to_string()),
        );
        let query = compose_query(Some(&ok), None).unwrap();
        match query.filter {
            Some(Expr::And(exprs)) => match &exprs[0] {
                Expr::Field { value, .. } => assert_eq!(value, &Bson::Boolean(false)),
                other => panic!("unexpected expr: {other:?}"),
            },
            other => panic!("unexpected filter: {other:?}"),
        }

        let wrong_type = filter_of(FieldType::Boolean, Operation::Equal, Bson::Boolean(false));
        assert!(compose_query(Some(&wrong_type), None).is_err());

        let unparseable = filter_of(
            FieldType::Boolean,
            Operation::Equal,
            Bson::String("bad format".to_string()),
        );
        assert!(compose_query(Some(&unparseable), None).is_err());
    }

    #[test]
    fn integer_filter_parses_strings_and_accepts_ints() {
        let from_string = filter_of(
            FieldType::Integer,
            Operation::GreaterThan,
            Bson::String("42".to_string()),
        );
        assert!(compose_query(Some(&from_string), None).is_ok());

        let from_int = filter_of(FieldType::Integer, Operation::GreaterThan, Bson::Int32(0));
        assert!(compose_query(Some(&from_int), None).is_ok());

        let bad = filter_of(
            FieldType::Integer,
            Operation::GreaterThan,
            Bson::String("not a valid int".to_string()),
        );
        assert!(compose_query(Some(&bad), None).is_err());
    }

    #[test]
    fn number_and_timestamp_filters_require_native_values() {
        let number = filter_of(FieldType::Number, Operation::LessThan, Bson::Double(1.0));
        assert!(compose_query(Some(&number), None).is_ok());

        let number_from_string = filter_of(
            FieldType::Number,
            Operation::LessThan,
            Bson::String("1.0".to_string()),
        );
        assert!(compose_query(Some(&number_from_string), None).is_err());

        let timestamp = filter_of(
            FieldType::Timestamp,
            Operation::GreaterThan,
            Bson::DateTime(bson::DateTime::now()),
        );
        assert!(compose_query(Some(&timestamp), None).is_ok());

        let timestamp_from_int = filter_of(
            FieldType::Timestamp,
            Operation::GreaterThan,
            Bson::Int64(1_700_000_000),
        );
        assert!(compose_query(Some(&timestamp_from_int), None).is_err());
    }

    #[test]
    fn string_filter_passes_values_through_unchanged() {
        let filter = filter_of(
            FieldType::String,
            Operation::Equal,
            Bson::String("a string".to_string()),
        );
        let query = compose_query(Some(&filter), None).unwrap();
        match query.filter {
            Some(Expr::And(exprs)) => match &exprs[0] {
                Expr::Field { value, .. } => {
                    assert_eq!(value, &Bson::String("a string".to_string()))
                }
                other => panic!("unexpected expr: {other:?}"),
            },
            other => panic!("unexpected filter: {other:?}"),
        }
    }

    #[test]
    fn coercion_failure_short_circuits_the_whole_composition() {
        let filter = FilterInput {
            search: None,
            filter_by: vec![
                FilterParam {
                    field_name: "name".to_string(),
                    field_type: FieldType::String,
                    comparison_operation: Operation::Equal,
                    field_value: Bson::String("ok".to_string()),
                },
                FilterParam {
                    field_name: "count".to_string(),
                    field_type: FieldType::Integer,
                    comparison_operation: Operation::GreaterThan,
                    field_value: Bson::String("nope".to_string()),
                },
            ],
        };
        assert!(compose_query(Some(&filter), None).is_err());
    }

    #[test]
    fn sorts_are_applied_in_input_order() {
        let sort = SortInput {
            sort_by: vec![
                SortParam { field_name: "name".to_string(), sort_order: SortOrder::Asc },
                SortParam { field_name: "updated".to_string(), sort_order: SortOrder::Desc },
            ],
        };
        let query = compose_query(None, Some(&sort)).unwrap();
        assert_eq!(query.sort.len(), 2);
        assert_eq!(query.sort[0].field, "name");
        assert_eq!(query.sort[0].order, SortOrder::Asc);
        assert_eq!(query.sort[1].field, "updated");
        assert_eq!(query.sort[1].order, SortOrder::Desc);
    }

    #[test]
    fn wire_inputs_deserialize_with_fixed_field_names() {
        let filter: FilterInput = serde_json::from_str(
            r#"{
                "search": "text",
                "filterBy": [{
                    "fieldName": "deleted",
                    "fieldType": "BOOLEAN",
                    "comparisonOperation": "EQUAL",
                    "fieldValue": "false"
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(filter.filter_by.len(), 1);
        assert_eq!(filter.filter_by[0].field_type, FieldType::Boolean);

        let pagination: PaginationInput =
            serde_json::from_str(r#"{"first": 10, "after": "30"}"#).unwrap();
        assert_eq!(pagination.first, 10);
        assert_eq!(pagination.last, 0);
        assert_eq!(pagination.after, "30");
        assert_eq!(pagination.before, "");
    }
}
