//! In-process document store with the same list semantics as the remote one.

use super::{Document, DocumentList, DocumentStore, Fields, Query, StoreError, UNIQUE_ID};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Collections are kept in insertion order, which is also the tie-break order
/// for sorted lists.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a collection in insertion order.
    pub async fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn timestamp() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    fn not_found(collection: &str, document_id: &str) -> StoreError {
        StoreError::NotFound {
            collection: collection.to_string(),
            document_id: document_id.to_string(),
        }
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            x.as_f64().partial_cmp(&y.as_f64()).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn values_match(stored: Option<&Value>, wanted: &Value) -> bool {
    match (stored, wanted) {
        (Some(Value::Number(x)), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Some(value), wanted) => value == wanted,
        (None, _) => false,
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn list(&self, collection: &str, queries: &[Query]) -> Result<DocumentList, StoreError> {
        let collections = self.collections.read().await;
        let mut documents: Vec<Document> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| {
                        queries.iter().all(|query| match query {
                            Query::Equal { attribute, values } => values
                                .iter()
                                .any(|wanted| values_match(doc.get(attribute), wanted)),
                            _ => true,
                        })
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        drop(collections);

        let orders: Vec<(&str, bool)> = queries
            .iter()
            .filter_map(|query| match query {
                Query::OrderAsc(attribute) => Some((attribute.as_str(), false)),
                Query::OrderDesc(attribute) => Some((attribute.as_str(), true)),
                _ => None,
            })
            .collect();

        if !orders.is_empty() {
            documents.sort_by(|a, b| {
                orders
                    .iter()
                    .map(|(attribute, descending)| {
                        let ordering = compare_values(a.get(attribute), b.get(attribute));
                        if *descending {
                            ordering.reverse()
                        } else {
                            ordering
                        }
                    })
                    .find(|ordering| ordering.is_ne())
                    .unwrap_or(Ordering::Equal)
            });
        }

        let total = documents.len() as u64;

        if let Some(limit) = queries.iter().rev().find_map(|query| match query {
            Query::Limit(limit) => Some(*limit),
            _ => None,
        }) {
            documents.truncate(limit);
        }

        Ok(DocumentList { total, documents })
    }

    async fn create(
        &self,
        collection: &str,
        document_id: &str,
        data: Fields,
    ) -> Result<Document, StoreError> {
        let id = if document_id == UNIQUE_ID {
            uuid::Uuid::new_v4().simple().to_string()
        } else {
            document_id.to_string()
        };

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if docs.iter().any(|doc| doc.id == id) {
            return Err(StoreError::Api {
                status: 409,
                message: format!("Document with the requested ID already exists: {id}"),
            });
        }

        let now = Self::timestamp();
        let document = Document {
            id,
            collection_id: collection.to_string(),
            created_at: now.clone(),
            updated_at: now,
            fields: data,
        };
        docs.push(document.clone());

        Ok(document)
    }

    async fn update(
        &self,
        collection: &str,
        document_id: &str,
        data: Fields,
    ) -> Result<Document, StoreError> {
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == document_id))
            .ok_or_else(|| Self::not_found(collection, document_id))?;

        document.fields.extend(data);
        document.updated_at = Self::timestamp();

        Ok(document.clone())
    }

    async fn delete(&self, collection: &str, document_id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| Self::not_found(collection, document_id))?;

        let index = docs
            .iter()
            .position(|doc| doc.id == document_id)
            .ok_or_else(|| Self::not_found(collection, document_id))?;
        docs.remove(index);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::to_fields;
    use serde_json::json;

    async fn seed(store: &InMemoryStore, rows: &[Value]) {
        for row in rows {
            store
                .create("items", UNIQUE_ID, to_fields(row).unwrap())
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn list_filters_sorts_and_limits() {
        let store = InMemoryStore::new();
        seed(
            &store,
            &[
                json!({"kind": "a", "n": 3}),
                json!({"kind": "b", "n": 9}),
                json!({"kind": "a", "n": 7}),
                json!({"kind": "a", "n": 1}),
            ],
        )
        .await;

        let list = store
            .list(
                "items",
                &[Query::equal("kind", "a"), Query::order_desc("n"), Query::limit(2)],
            )
            .await
            .unwrap();

        assert_eq!(list.total, 3);
        let ns: Vec<_> = list.documents.iter().map(|d| d.get("n").cloned()).collect();
        assert_eq!(ns, vec![Some(json!(7)), Some(json!(3))]);
    }

    #[tokio::test]
    async fn ties_keep_insertion_order() {
        let store = InMemoryStore::new();
        seed(
            &store,
            &[
                json!({"name": "first", "n": 1}),
                json!({"name": "second", "n": 1}),
            ],
        )
        .await;

        let list = store
            .list("items", &[Query::order_desc("n")])
            .await
            .unwrap();
        assert_eq!(list.documents[0].get("name"), Some(&json!("first")));
    }

    #[tokio::test]
    async fn equal_matches_numbers_across_representations() {
        let store = InMemoryStore::new();
        seed(&store, &[json!({"movie_id": 603})]).await;

        let list = store
            .list("items", &[Query::equal("movie_id", 603.0)])
            .await
            .unwrap();
        assert_eq!(list.documents.len(), 1);
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let store = InMemoryStore::new();
        let doc = store
            .create("items", UNIQUE_ID, to_fields(&json!({"a": 1, "b": 2})).unwrap())
            .await
            .unwrap();

        let updated = store
            .update("items", &doc.id, to_fields(&json!({"b": 5})).unwrap())
            .await
            .unwrap();

        assert_eq!(updated.get("a"), Some(&json!(1)));
        assert_eq!(updated.get("b"), Some(&json!(5)));
        assert_eq!(updated.id, doc.id);
    }

    #[tokio::test]
    async fn missing_documents_are_not_found() {
        let store = InMemoryStore::new();
        let err = store.delete("items", "nope").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        let err = store
            .update("items", "nope", Fields::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn explicit_ids_must_be_unique() {
        let store = InMemoryStore::new();
        store.create("items", "fixed", Fields::new()).await.unwrap();
        let err = store.create("items", "fixed", Fields::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::Api { status: 409, .. }));
    }
}
