//! Document-store implementation of the `SavedMovieService` trait.

use crate::config::Config;
use crate::domain::MovieId;
use crate::models::{MovieDetails, NewSavedMovie, SavedMovie};
use crate::services::saved_movie_service::{SavedMovieError, SavedMovieService};
use crate::store::{DocumentStore, Query, UNIQUE_ID, to_fields};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

const MOVIE_ID: &str = "movie_id";
const SAVED_AT: &str = "saved_at";

pub struct DocumentSavedMovieService {
    store: Arc<dyn DocumentStore>,
    collection_id: String,
}

impl DocumentSavedMovieService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, config: &Config) -> Self {
        Self {
            store,
            collection_id: config.appwrite.saved_movies_collection_id.clone(),
        }
    }

    async fn create(&self, details: &MovieDetails) -> Result<SavedMovie, SavedMovieError> {
        let row = NewSavedMovie::from_details(details, chrono::Utc::now());
        let document = self
            .store
            .create(&self.collection_id, UNIQUE_ID, to_fields(&row)?)
            .await?;

        Ok(document.decode()?)
    }

    async fn delete_first(&self, movie_id: MovieId) -> Result<bool, SavedMovieError> {
        let matches = self
            .store
            .list(&self.collection_id, &[Query::equal(MOVIE_ID, movie_id)])
            .await?;

        let Some(first) = matches.first() else {
            return Ok(false);
        };

        self.store.delete(&self.collection_id, &first.id).await?;
        Ok(true)
    }
}

#[async_trait]
impl SavedMovieService for DocumentSavedMovieService {
    async fn save(&self, details: &MovieDetails) -> Result<SavedMovie, SavedMovieError> {
        let saved = self.create(details).await.inspect_err(|e| {
            error!(movie_id = %details.id, error = %e, "Error saving movie");
        })?;

        info!(movie_id = %details.id, title = %details.title, "Saved movie");
        metrics::counter!("saved_movie_writes_total", "op" => "create").increment(1);
        Ok(saved)
    }

    async fn remove(&self, movie_id: MovieId) -> Result<bool, SavedMovieError> {
        let removed = self.delete_first(movie_id).await.inspect_err(|e| {
            error!(movie_id = %movie_id, error = %e, "Error removing saved movie");
        })?;

        if removed {
            info!(movie_id = %movie_id, "Removed saved movie");
            metrics::counter!("saved_movie_writes_total", "op" => "delete").increment(1);
        }
        Ok(removed)
    }

    async fn try_list_all(&self) -> Result<Vec<SavedMovie>, SavedMovieError> {
        let list = self
            .store
            .list(&self.collection_id, &[Query::order_desc(SAVED_AT)])
            .await?;

        Ok(list.decode_all()?)
    }

    async fn try_is_saved(&self, movie_id: MovieId) -> Result<bool, SavedMovieError> {
        let list = self
            .store
            .list(
                &self.collection_id,
                &[Query::equal(MOVIE_ID, movie_id), Query::limit(1)],
            )
            .await?;

        Ok(!list.is_empty())
    }
}
