//! Query expression evaluation for in-memory document filtering.
//!
//! This module provides the evaluation engine for query expressions,
//! resolving [`Field`]s against a [`Document`] and comparing them with filter values.

use std::cmp::Ordering;
use chrono::{DateTime, Utc};

use docstash_core::{
    document::Document,
    error::{DocumentStoreError, DocumentStoreResult},
    query::{Expr, Field, FieldOp, QueryVisitor, Value},
};


/// Borrowed, comparable view of either a document field or a filter value.
///
/// Values of different kinds never compare equal and have no ordering.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    /// Missing value
    Null,
    /// String value
    String(&'a str),
    /// List of strings
    List(&'a [String]),
    /// Timestamp
    DateTime(DateTime<Utc>),
}

impl<'a> Comparable<'a> {
    fn of_field(document: &'a Document, field: Field) -> Self {
        match field {
            Field::Id => document
                .id
                .as_deref()
                .map(Comparable::String)
                .unwrap_or(Comparable::Null),
            Field::AuthorId => Comparable::String(&document.author.id),
            Field::AuthorName => Comparable::String(&document.author.name),
            Field::Title => Comparable::String(&document.title),
            Field::Content => Comparable::String(&document.content),
            Field::Created => Comparable::DateTime(document.created),
        }
    }
}

impl<'a> From<&'a Value> for Comparable<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::String(value) => Comparable::String(value),
            Value::List(values) => Comparable::List(values),
            Value::DateTime(value) => Comparable::DateTime(*value),
        }
    }
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::List(a), Comparable::List(b)) => a == b,
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            _ => false,
        }
    }
}

impl<'a> PartialOrd for Comparable<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}


pub(crate) struct DocumentEvaluator<'a> {
    document: &'a Document,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> DocumentStoreResult<bool> {
        self.visit_expr(expr)
    }

    /// Returns clones of the documents that satisfy `expr`.
    pub fn filter_documents(
        documents: impl IntoIterator<Item = &'a Document>,
        expr: &Expr,
    ) -> DocumentStoreResult<Vec<Document>> {
        let mut matched = Vec::new();

        for document in documents {
            if DocumentEvaluator::new(document).evaluate(expr)? {
                matched.push(document.clone());
            }
        }

        Ok(matched)
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = DocumentStoreError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if self.visit_expr(expr)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn visit_not(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        Ok(!self.visit_expr(expr)?)
    }

    fn visit_field(&mut self, field: Field, op: FieldOp, value: &Value) -> Result<Self::Output, Self::Error> {
        let left = Comparable::of_field(self.document, field);
        let right = Comparable::from(value);

        Ok(match op {
            FieldOp::Eq => left == right,
            FieldOp::Ne => left != right,
            FieldOp::Gt | FieldOp::Gte | FieldOp::Lt | FieldOp::Lte => match left.partial_cmp(&right) {
                Some(ordering) => match op {
                    FieldOp::Gt => ordering == Ordering::Greater,
                    FieldOp::Gte => ordering != Ordering::Less,
                    FieldOp::Lt => ordering == Ordering::Less,
                    FieldOp::Lte => ordering != Ordering::Greater,
                    _ => unreachable!(),
                },
                None => false,
            },
            FieldOp::Contains => match (left, right) {
                (Comparable::String(left), Comparable::String(right)) => left.contains(right),
                _ => false,
            },
            FieldOp::StartsWith => match (left, right) {
                (Comparable::String(left), Comparable::String(right)) => left.starts_with(right),
                _ => false,
            },
            FieldOp::EndsWith => match (left, right) {
                (Comparable::String(left), Comparable::String(right)) => left.ends_with(right),
                _ => false,
            },
            FieldOp::AnyOf => match (left, right) {
                (Comparable::String(single), Comparable::List(values)) => {
                    values.iter().any(|value| value == single)
                },
                (single, Comparable::String(value)) => single == Comparable::String(value),
                _ => false,
            },
        })
    }
}
