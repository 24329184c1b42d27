//! Search query objects in the wire shape the search backend consumes
//!
//! ```text
//! { "index": "...", "type": "...", "query": { "query": { "term": { "_id": "..." } } } }
//! ```
//!
//! Everything here is immutable once built. Connectors that talk to a
//! different backend translate at their own boundary.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::value_objects::DocType;

/// Single filter clause inside a query body
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Exact match on the stored value (`{"term": {field: value}}`)
    Term { field: String, value: Value },
    /// Analysed full-text match (`{"match": {field: value}}`)
    Match { field: String, value: Value },
}

impl Clause {
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Clause::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matching(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Clause::Match {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Clause keyword as it appears on the wire
    pub fn keyword(&self) -> &'static str {
        match self {
            Clause::Term { .. } => "term",
            Clause::Match { .. } => "match",
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Clause::Term { field, .. } | Clause::Match { field, .. } => field,
        }
    }

    pub fn value(&self) -> &Value {
        match self {
            Clause::Term { value, .. } | Clause::Match { value, .. } => value,
        }
    }

    fn to_value(&self) -> Value {
        let mut filter = Map::new();
        filter.insert(self.field().to_string(), self.value().clone());

        let mut clause = Map::new();
        clause.insert(self.keyword().to_string(), Value::Object(filter));
        Value::Object(clause)
    }
}

/// Body of a search request: `{"query": {...}}`
///
/// Either built from a [`Clause`] or wrapped verbatim from a caller-shaped
/// value. The wrapped value is never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryObject(Value);

impl QueryObject {
    pub fn from_clause(clause: &Clause) -> Self {
        let mut body = Map::new();
        body.insert("query".to_string(), clause.to_value());
        Self(Value::Object(body))
    }

    /// `{"query": {"term": {field: value}}}`
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::from_clause(&Clause::term(field, value))
    }

    /// `{"query": {"match": {field: value}}}`
    pub fn matching(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::from_clause(&Clause::matching(field, value))
    }

    /// Wrap a body produced elsewhere without looking at it
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for QueryObject {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

/// Complete search request: index, type and query body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub index: String,
    #[serde(rename = "type")]
    pub doc_type: DocType,
    pub query: QueryObject,
}

impl SearchRequest {
    pub fn new(index: impl Into<String>, doc_type: DocType, query: QueryObject) -> Self {
        Self {
            index: index.into(),
            doc_type,
            query,
        }
    }

    /// Serialized wire form
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "index": self.index,
            "type": self.doc_type.as_str(),
            "query": self.query.as_value(),
        })
    }
}
