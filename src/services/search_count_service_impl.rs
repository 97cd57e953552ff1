//! Document-store implementation of the `SearchCountService` trait.

use crate::config::Config;
use crate::models::{Movie, NewSearchCounter, SearchCounter};
use crate::services::search_count_service::{SearchCountError, SearchCountService};
use crate::store::{DocumentStore, Fields, Query, StoreError, UNIQUE_ID, to_fields};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

const SEARCH_TERM: &str = "searchTerm";
const COUNT: &str = "count";

pub struct DocumentSearchCountService {
    store: Arc<dyn DocumentStore>,
    collection_id: String,
    image_base_url: String,
    trending_limit: usize,
}

impl DocumentSearchCountService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, config: &Config) -> Self {
        Self {
            store,
            collection_id: config.appwrite.search_count_collection_id.clone(),
            image_base_url: config.catalog.image_base_url.clone(),
            trending_limit: config.catalog.trending_limit,
        }
    }

    fn poster_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.image_base_url, poster_path)
    }

    async fn write(&self, query: &str, movie: &Movie) -> Result<SearchCounter, SearchCountError> {
        let existing = self
            .store
            .list(&self.collection_id, &[Query::equal(SEARCH_TERM, query)])
            .await?;

        if existing.documents.len() > 1 {
            debug!(
                search_term = %query,
                matches = existing.documents.len(),
                "Duplicate search counters, updating the first"
            );
        }

        let document = if let Some(current) = existing.first() {
            let count = current.get(COUNT).and_then(Value::as_i64).ok_or_else(|| {
                StoreError::Decode(format!(
                    "search counter {} has no integer count: {:?}",
                    current.id,
                    current.get(COUNT)
                ))
            })?;

            let mut fields = Fields::new();
            fields.insert(COUNT.to_string(), Value::from(count + 1));

            let updated = self
                .store
                .update(&self.collection_id, &current.id, fields)
                .await?;
            metrics::counter!("search_count_writes_total", "op" => "update").increment(1);
            updated
        } else {
            let poster_path = movie.poster_path.as_deref().ok_or_else(|| {
                SearchCountError::Validation(format!("movie {} has no poster path", movie.id))
            })?;

            let counter = NewSearchCounter {
                search_term: query.to_string(),
                movie_id: movie.id,
                title: movie.title.clone(),
                count: 1,
                poster_url: self.poster_url(poster_path),
            };

            let created = self
                .store
                .create(&self.collection_id, UNIQUE_ID, to_fields(&counter)?)
                .await?;
            info!(search_term = %query, movie_id = %movie.id, "Created search counter");
            metrics::counter!("search_count_writes_total", "op" => "create").increment(1);
            created
        };

        Ok(document.decode()?)
    }
}

#[async_trait]
impl SearchCountService for DocumentSearchCountService {
    async fn record_search(
        &self,
        query: &str,
        movie: &Movie,
    ) -> Result<SearchCounter, SearchCountError> {
        if query.trim().is_empty() {
            return Err(SearchCountError::Validation(
                "search query cannot be empty".to_string(),
            ));
        }

        self.write(query, movie).await.inspect_err(|e| {
            error!(search_term = %query, error = %e, "Error updating search count");
        })
    }

    async fn try_fetch_trending(&self) -> Result<Vec<SearchCounter>, SearchCountError> {
        let list = self
            .store
            .list(
                &self.collection_id,
                &[Query::limit(self.trending_limit), Query::order_desc(COUNT)],
            )
            .await?;

        Ok(list.decode_all()?)
    }
}
