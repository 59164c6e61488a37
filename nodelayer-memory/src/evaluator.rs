//! Query expression evaluation for in-memory document filtering.
//!
//! Provides the evaluation engine for composed filter expressions, covering
//! the seven comparison operations the composer can produce.

use bson::{Bson, datetime::DateTime};
use std::{cmp::Ordering, collections::HashMap};

use nodelayer_core::{
    enums::Operation,
    error::{NodeStoreError, NodeStoreResult},
    query::{Expr, QueryVisitor},
};

/// Type-erased, comparable representation of BSON values.
///
/// Wraps BSON values and provides the comparison operations used for
/// filtering and sorting. All numeric types are normalized to f64.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value (all integers and floats normalized to f64)
    Number(f64),
    /// DateTime value
    DateTime(DateTime),
    /// String value
    String(&'a str),
    /// Array of comparable values
    Array(Vec<Comparable<'a>>),
    /// Map/Object of comparable values
    Map(HashMap<&'a str, Comparable<'a>>),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(*value as f64),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::Array(arr) => Comparable::Array(
                arr.iter()
                    .map(Comparable::from)
                    .collect::<Vec<_>>(),
            ),
            Bson::Document(doc) => Comparable::Map(
                doc.iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect::<HashMap<_, _>>(),
            ),
            _ => Comparable::Null, // Other types are not comparable
        }
    }
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
            (Comparable::Map(a), Comparable::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl<'a> PartialOrd for Comparable<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Comparable::Bool(a), Comparable::Bool(b)) => a.partial_cmp(b),
            (Comparable::Number(a), Comparable::Number(b)) => a.partial_cmp(b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.partial_cmp(b),
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

pub(crate) struct DocumentEvaluator<'a> {
    document: &'a Bson,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a Bson) -> Self {
        Self { document }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> NodeStoreResult<bool> {
        self.visit_expr(expr)
    }

    pub fn filter_documents(
        documents: impl IntoIterator<Item = &'a Bson>,
        expr: &Expr,
    ) -> NodeStoreResult<Vec<Bson>> {
        Ok(documents
            .into_iter()
            .filter(|doc| {
                DocumentEvaluator::new(doc)
                    .evaluate(expr)
                    .unwrap_or(false)
            })
            .cloned()
            .collect::<Vec<_>>())
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = NodeStoreError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_field(
        &mut self,
        field: &str,
        op: Operation,
        value: &Bson,
    ) -> Result<Self::Output, Self::Error> {
        let Some(document) = self.document.as_document() else {
            return Ok(false);
        };

        let Some(field_value) = document.get(field) else {
            return Ok(false);
        };

        match op {
            Operation::Equal => Ok(Comparable::from(field_value) == Comparable::from(value)),
            Operation::LessThan
            | Operation::LessThanOrEqualTo
            | Operation::GreaterThan
            | Operation::GreaterThanOrEqualTo => {
                match Comparable::from(field_value).partial_cmp(&Comparable::from(value)) {
                    Some(ordering) => Ok(match op {
                        Operation::LessThan => ordering == Ordering::Less,
                        Operation::LessThanOrEqualTo => ordering != Ordering::Greater,
                        Operation::GreaterThan => ordering == Ordering::Greater,
                        Operation::GreaterThanOrEqualTo => ordering != Ordering::Less,
                        _ => unreachable!(),
                    }),
                    None => Ok(false),
                }
            }
            Operation::In => match Comparable::from(value) {
                Comparable::Array(values) => {
                    let field_value = Comparable::from(field_value);
                    Ok(values.iter().any(|v| v == &field_value))
                }
                _ => Ok(false),
            },
            Operation::Contains => match Comparable::from(field_value) {
                Comparable::Array(array) => Ok(array
                    .iter()
                    .any(|item| item == &Comparable::from(value))),
                _ => Ok(false),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use nodelayer_core::query::Expr;

    fn doc_with(name: &str, count: i64) -> Bson {
        Bson::Document(doc! { "name": name, "count": count, "tags": ["a", "b"] })
    }

    fn matches(document: &Bson, expr: &Expr) -> bool {
        DocumentEvaluator::new(document)
            .evaluate(expr)
            .unwrap()
    }

    #[test]
    fn equality_and_ordering_operations() {
        let document = doc_with("alice", 10);

        let eq = Expr::field("name".into(), Operation::Equal, Bson::String("alice".into()));
        assert!(matches(&document, &eq));

        let gt = Expr::field("count".into(), Operation::GreaterThan, Bson::Int64(5));
        assert!(matches(&document, &gt));

        let lte = Expr::field("count".into(), Operation::LessThanOrEqualTo, Bson::Int64(10));
        assert!(matches(&document, &lte));

        let lt = Expr::field("count".into(), Operation::LessThan, Bson::Int64(10));
        assert!(!matches(&document, &lt));
    }

    #[test]
    fn membership_operations() {
        let document = doc_with("alice", 10);

        let in_op = Expr::field(
            "name".into(),
            Operation::In,
            Bson::Array(vec![Bson::String("bob".into()), Bson::String("alice".into())]),
        );
        assert!(matches(&document, &in_op));

        // `in` requires an array comparison value.
        let in_scalar = Expr::field("name".into(), Operation::In, Bson::String("alice".into()));
        assert!(!matches(&document, &in_scalar));

        let contains = Expr::field("tags".into(), Operation::Contains, Bson::String("b".into()));
        assert!(matches(&document, &contains));

        let not_contained =
            Expr::field("tags".into(), Operation::Contains, Bson::String("z".into()));
        assert!(!matches(&document, &not_contained));
    }

    #[test]
    fn conjunctions_require_every_predicate() {
        let document = doc_with("alice", 10);

        let both = Expr::And(vec![
            Expr::field("name".into(), Operation::Equal, Bson::String("alice".into())),
            Expr::field("count".into(), Operation::GreaterThan, Bson::Int64(5)),
        ]);
        assert!(matches(&document, &both));

        let one_fails = Expr::And(vec![
            Expr::field("name".into(), Operation::Equal, Bson::String("alice".into())),
            Expr::field("count".into(), Operation::GreaterThan, Bson::Int64(50)),
        ]);
        assert!(!matches(&document, &one_fails));
    }

    #[test]
    fn missing_fields_never_match() {
        let document = doc_with("alice", 10);
        let expr = Expr::field("missing".into(), Operation::Equal, Bson::Int64(1));
        assert!(!matches(&document, &expr));
    }

    #[test]
    fn mixed_numeric_widths_compare() {
        let document = Bson::Document(doc! { "score": 3_i32 });
        let expr = Expr::field("score".into(), Operation::LessThan, Bson::Double(3.5));
        assert!(matches(&document, &expr));
    }
}
