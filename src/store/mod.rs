//! Document-store abstraction.
//!
//! The remote store groups schemaless documents into collections and exposes
//! list (with filter/sort/limit queries), create, update and delete by id.
//! There are no transactions: every read-then-write built on top of this
//! trait has a race window between the two calls.

pub mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Document id placeholder asking the store to assign a fresh id.
pub const UNIQUE_ID: &str = "unique()";

/// Attribute payload of a document.
pub type Fields = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Store API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Document not found: {collection}/{document_id}")]
    NotFound {
        collection: String,
        document_id: String,
    },

    #[error("Failed to decode document: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A stored document: system attributes plus the user fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "$id")]
    pub id: String,

    #[serde(rename = "$collectionId", default)]
    pub collection_id: String,

    #[serde(rename = "$createdAt", default)]
    pub created_at: String,

    #[serde(rename = "$updatedAt", default)]
    pub updated_at: String,

    #[serde(flatten)]
    pub fields: Fields,
}

impl Document {
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.fields.get(attribute)
    }

    /// Decodes the document, system attributes included, into a typed model.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let value = serde_json::to_value(self)?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Serializes a model into a field map suitable for create/update.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Decode(format!(
            "expected an object, got {other}"
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentList {
    pub total: u64,

    pub documents: Vec<Document>,
}

impl DocumentList {
    #[must_use]
    pub fn first(&self) -> Option<&Document> {
        self.documents.first()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn decode_all<T: DeserializeOwned>(&self) -> Result<Vec<T>, StoreError> {
        self.documents.iter().map(Document::decode).collect()
    }
}

/// A single list query. Queries passed together are combined with AND.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Equal { attribute: String, values: Vec<Value> },
    OrderAsc(String),
    OrderDesc(String),
    Limit(usize),
}

impl Query {
    pub fn equal(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equal {
            attribute: attribute.into(),
            values: vec![value.into()],
        }
    }

    pub fn order_asc(attribute: impl Into<String>) -> Self {
        Self::OrderAsc(attribute.into())
    }

    pub fn order_desc(attribute: impl Into<String>) -> Self {
        Self::OrderDesc(attribute.into())
    }

    #[must_use]
    pub const fn limit(limit: usize) -> Self {
        Self::Limit(limit)
    }

    /// Encodes the query in the JSON form the REST API expects in `queries[]`.
    pub fn to_wire(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(&WireQuery::from(self))?)
    }

    pub fn parse_wire(raw: &str) -> Result<Self, StoreError> {
        let wire: WireQuery = serde_json::from_str(raw)?;
        Self::try_from(wire)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WireQuery {
    method: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    attribute: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    values: Option<Vec<Value>>,
}

impl From<&Query> for WireQuery {
    fn from(query: &Query) -> Self {
        match query {
            Query::Equal { attribute, values } => Self {
                method: "equal".to_string(),
                attribute: Some(attribute.clone()),
                values: Some(values.clone()),
            },
            Query::OrderAsc(attribute) => Self {
                method: "orderAsc".to_string(),
                attribute: Some(attribute.clone()),
                values: None,
            },
            Query::OrderDesc(attribute) => Self {
                method: "orderDesc".to_string(),
                attribute: Some(attribute.clone()),
                values: None,
            },
            Query::Limit(limit) => Self {
                method: "limit".to_string(),
                attribute: None,
                values: Some(vec![Value::from(*limit)]),
            },
        }
    }
}

impl TryFrom<WireQuery> for Query {
    type Error = StoreError;

    fn try_from(wire: WireQuery) -> Result<Self, Self::Error> {
        let attribute = || {
            wire.attribute
                .clone()
                .ok_or_else(|| StoreError::Decode(format!("{} query without attribute", wire.method)))
        };

        match wire.method.as_str() {
            "equal" => Ok(Self::Equal {
                attribute: attribute()?,
                values: wire.values.clone().unwrap_or_default(),
            }),
            "orderAsc" => Ok(Self::OrderAsc(attribute()?)),
            "orderDesc" => Ok(Self::OrderDesc(attribute()?)),
            "limit" => wire
                .values
                .as_deref()
                .and_then(<[Value]>::first)
                .and_then(Value::as_u64)
                .and_then(|n| usize::try_from(n).ok())
                .map(Self::Limit)
                .ok_or_else(|| StoreError::Decode("limit query without a count".to_string())),
            other => Err(StoreError::Decode(format!("unsupported query method: {other}"))),
        }
    }
}

/// Collection-scoped document operations of the remote store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Lists documents matching all `queries`, in query order.
    async fn list(&self, collection: &str, queries: &[Query]) -> Result<DocumentList, StoreError>;

    /// Creates a document. Pass [`UNIQUE_ID`] to let the store pick the id.
    async fn create(
        &self,
        collection: &str,
        document_id: &str,
        data: Fields,
    ) -> Result<Document, StoreError>;

    /// Overwrites only the attributes present in `data`.
    async fn update(
        &self,
        collection: &str,
        document_id: &str,
        data: Fields,
    ) -> Result<Document, StoreError>;

    async fn delete(&self, collection: &str, document_id: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn queries_encode_to_rest_json() {
        assert_eq!(
            Query::equal("searchTerm", "inception").to_wire().unwrap(),
            r#"{"method":"equal","attribute":"searchTerm","values":["inception"]}"#
        );
        assert_eq!(
            Query::order_desc("count").to_wire().unwrap(),
            r#"{"method":"orderDesc","attribute":"count"}"#
        );
        assert_eq!(
            Query::limit(5).to_wire().unwrap(),
            r#"{"method":"limit","values":[5]}"#
        );
    }

    #[test]
    fn wire_queries_parse_back() {
        for query in [
            Query::equal("movie_id", 603),
            Query::order_asc("saved_at"),
            Query::order_desc("count"),
            Query::limit(1),
        ] {
            let wire = query.to_wire().unwrap();
            assert_eq!(Query::parse_wire(&wire).unwrap(), query);
        }
    }

    #[test]
    fn unknown_query_method_is_rejected() {
        let err = Query::parse_wire(r#"{"method":"search","attribute":"title"}"#).unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[test]
    fn document_keeps_system_attributes_apart_from_fields() {
        let doc: Document = serde_json::from_value(json!({
            "$id": "abc",
            "$collectionId": "saved",
            "$createdAt": "2024-01-01T00:00:00.000+00:00",
            "$updatedAt": "2024-01-01T00:00:00.000+00:00",
            "title": "Heat",
            "movie_id": 949
        }))
        .unwrap();

        assert_eq!(doc.id, "abc");
        assert_eq!(doc.get("title"), Some(&json!("Heat")));
        assert!(doc.get("$id").is_none());
    }

    #[test]
    fn to_fields_rejects_non_objects() {
        assert!(to_fields(&42).is_err());
        let fields = to_fields(&json!({"count": 1})).unwrap();
        assert_eq!(fields.get("count"), Some(&json!(1)));
    }
}
