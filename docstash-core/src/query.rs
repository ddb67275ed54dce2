//! Search requests and the filter expressions they compile into.
//!
//! Callers normally describe what they want with a [`SearchRequest`]. Each present,
//! non-empty field of the request becomes one predicate, and the predicates are
//! joined according to the store's [`MatchMode`]:
//!
//! ```ignore
//! use docstash::query::SearchRequest;
//!
//! let request = SearchRequest::builder()
//!     .author_ids(["a1"])
//!     .title_prefixes(["Intro"])
//!     .build();
//! ```
//!
//! # Filter Expression API
//!
//! The request is lowered into an [`Expr`] tree, which backends evaluate through the
//! [`QueryVisitor`] trait. The [`Filter`] struct builds expressions directly:
//!
//! - Comparison: `eq`, `ne`, `gt`, `gte`, `lt`, `lte`
//! - String: `starts_with`, `ends_with`, `contains`
//! - List: `any_of`
//! - Logical: `and`, `or`
//!
//! An empty `Or` matches nothing and an empty `And` matches everything.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{config::MatchMode, document::JsonExt, error::DocumentStoreError};

/// Document fields an expression can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    AuthorId,
    AuthorName,
    Title,
    Content,
    Created,
}

/// Field comparison operators for filter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOp {
    /// Equal to (exact match).
    Eq,
    /// Not equal to.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal to.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal to.
    Lte,
    /// String contains value.
    Contains,
    /// String starts with value.
    StartsWith,
    /// String ends with value.
    EndsWith,
    /// Field equals any of the listed values.
    AnyOf,
}

/// Right-hand side of a field comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    List(Vec<String>),
    DateTime(DateTime<Utc>),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::List(value)
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        Value::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

/// A filter expression for querying documents.
///
/// Expressions can be combined using logical operators (`And`, `Or`, `Not`)
/// to build complex filter predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Logical AND of multiple expressions (all must match).
    And(Vec<Expr>),
    /// Logical OR of multiple expressions (any must match).
    Or(Vec<Expr>),
    /// Logical NOT of an expression (inverts the result).
    Not(Box<Expr>),
    /// Field comparison expression.
    Field {
        field: Field,
        op: FieldOp,
        value: Value,
    },
}

impl Expr {
    /// Creates a field comparison expression.
    pub fn field(field: Field, op: FieldOp, value: Value) -> Self {
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

    /// Combines this expression with another using logical OR.
    ///
    /// If this expression is already an OR, the other expression is appended
    /// to the list. Otherwise, a new OR expression is created.
    pub fn or(self, other: Expr) -> Self {
        match self {
            Expr::Or(mut list) => {
                list.push(other);
                Expr::Or(list)
            }
            _ => Expr::Or(vec![self, other]),
        }
    }

    /// Negates this expression (logical NOT).
    pub fn not(self) -> Self {
        Expr::Not(Box::new(self))
    }
}

/// Helper struct for constructing filter expressions.
///
/// ```ignore
/// use docstash::query::{Field, Filter};
///
/// let expr = Filter::eq(Field::AuthorId, "a1")
///     .and(Filter::starts_with(Field::Title, "Intro"));
/// ```
pub struct Filter;

impl Filter {
    pub fn eq(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::Eq, value.into())
    }

    pub fn ne(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::Ne, value.into())
    }

    pub fn gt(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::Gt, value.into())
    }

    pub fn gte(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::Gte, value.into())
    }

    pub fn lt(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::Lt, value.into())
    }

    pub fn lte(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::Lte, value.into())
    }

    /// Matches documents whose string field starts with the value (case-sensitive).
    pub fn starts_with(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::StartsWith, value.into())
    }

    /// Matches documents whose string field ends with the value (case-sensitive).
    pub fn ends_with(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::EndsWith, value.into())
    }

    /// Matches documents whose string field contains the value (case-sensitive).
    pub fn contains(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::Contains, value.into())
    }

    /// Matches documents whose field equals one of the listed values.
    pub fn any_of(field: Field, values: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::AnyOf, values.into())
    }

    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::And(exprs.into_iter().collect())
    }

    pub fn or(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Or(exprs.into_iter().collect())
    }
}

/// A filter descriptor where every field is optional.
///
/// An absent or empty list places no constraint on its axis. The creation window
/// only applies when both `created_from` and `created_to` are set, and both bounds
/// are exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_prefixes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_contents: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_to: Option<DateTime<Utc>>,
}

impl SearchRequest {
    pub fn builder() -> SearchRequestBuilder {
        SearchRequestBuilder::new()
    }

    /// Returns one expression per active field, in a fixed order.
    pub fn predicates(&self) -> Vec<Expr> {
        let mut predicates = Vec::new();

        if let Some(author_ids) = active(&self.author_ids) {
            predicates.push(Filter::any_of(Field::AuthorId, author_ids.to_vec()));
        }

        if let Some(prefixes) = active(&self.title_prefixes) {
            predicates.push(Filter::or(
                prefixes
                    .iter()
                    .map(|prefix| Filter::starts_with(Field::Title, prefix.as_str())),
            ));
        }

        if let Some(fragments) = active(&self.contains_contents) {
            predicates.push(Filter::or(
                fragments
                    .iter()
                    .map(|fragment| Filter::contains(Field::Content, fragment.as_str())),
            ));
        }

        if let (Some(from), Some(to)) = (self.created_from, self.created_to) {
            predicates.push(
                Filter::gt(Field::Created, from).and(Filter::lt(Field::Created, to)),
            );
        }

        predicates
    }

    /// Returns `true` if no field of this request constrains anything.
    pub fn is_unconstrained(&self) -> bool {
        self.predicates().is_empty()
    }

    /// Lowers the request into a single expression joined according to `mode`.
    pub fn to_expr(&self, mode: MatchMode) -> Expr {
        match mode {
            MatchMode::Any => Expr::Or(self.predicates()),
            MatchMode::All => Expr::And(self.predicates()),
        }
    }
}

impl JsonExt for SearchRequest {}

fn active(list: &Option<Vec<String>>) -> Option<&[String]> {
    list.as_deref().filter(|values| !values.is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct SearchRequestBuilder {
    request: SearchRequest,
}

impl SearchRequestBuilder {
    pub fn new() -> Self {
        SearchRequestBuilder { request: SearchRequest::default() }
    }

    pub fn author_ids<I, S>(mut self, author_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request.author_ids = Some(author_ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn title_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request.title_prefixes = Some(prefixes.into_iter().map(Into::into).collect());
        self
    }

    pub fn contains_contents<I, S>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request.contains_contents = Some(fragments.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the exclusive lower bound of the creation window.
    pub fn created_from(mut self, from: DateTime<Utc>) -> Self {
        self.request.created_from = Some(from);
        self
    }

    /// Sets the exclusive upper bound of the creation window.
    pub fn created_to(mut self, to: DateTime<Utc>) -> Self {
        self.request.created_to = Some(to);
        self
    }

    pub fn build(self) -> SearchRequest {
        self.request
    }
}

/// Walks an [`Expr`] tree. Backends implement this to evaluate filters.
pub trait QueryVisitor {
    type Output;
    type Error: Into<DocumentStoreError>;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error>;
    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error>;
    fn visit_not(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error>;
    fn visit_field(
        &mut self,
        field: Field,
        op: FieldOp,
        value: &Value,
    ) -> Result<Self::Output, Self::Error>;

    fn visit_expr(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        match expr {
            Expr::And(exprs) => self.visit_and(exprs),
            Expr::Or(exprs) => self.visit_or(exprs),
            Expr::Not(expr) => self.visit_not(expr),
            Expr::Field { field, op, value } => self.visit_field(*field, *op, value),
        }
    }
}
