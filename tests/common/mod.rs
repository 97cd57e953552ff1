//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use popcorn::config::Config;
use popcorn::domain::MovieId;
use popcorn::models::{Genre, Movie, MovieDetails};
use popcorn::store::{Document, DocumentList, DocumentStore, Fields, InMemoryStore, Query, StoreError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub const SEARCH_COLLECTION: &str = "search-metrics";
pub const SAVED_COLLECTION: &str = "saved-movies";

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.appwrite.project_id = "test-project".to_string();
    config.appwrite.database_id = "movies-db".to_string();
    config.appwrite.search_count_collection_id = SEARCH_COLLECTION.to_string();
    config.appwrite.saved_movies_collection_id = SAVED_COLLECTION.to_string();
    config
}

pub fn movie(id: i64, title: &str) -> Movie {
    Movie {
        id: MovieId::new(id),
        title: title.to_string(),
        poster_path: Some(format!("/{}.jpg", title.to_lowercase().replace(' ', "-"))),
        release_date: Some("2010-07-15".to_string()),
        vote_average: 8.0,
        overview: None,
    }
}

pub fn details(id: i64, title: &str) -> MovieDetails {
    MovieDetails {
        id: MovieId::new(id),
        title: title.to_string(),
        poster_path: Some(format!("/{id}.jpg")),
        release_date: Some("1999-03-30".to_string()),
        vote_average: 8.2,
        overview: Some(format!("Overview of {title}")),
        runtime: Some(120),
        genres: vec![
            Genre {
                id: 28,
                name: "Action".to_string(),
            },
            Genre {
                id: 878,
                name: "Science Fiction".to_string(),
            },
        ],
    }
}

/// In-memory store that can be switched into failing every call.
#[derive(Debug, Default)]
pub struct FlakyStore {
    pub inner: InMemoryStore,
    failing: AtomicBool,
    pub lists: AtomicUsize,
    pub writes: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let store = Self::default();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Network("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn list(&self, collection: &str, queries: &[Query]) -> Result<DocumentList, StoreError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.list(collection, queries).await
    }

    async fn create(
        &self,
        collection: &str,
        document_id: &str,
        data: Fields,
    ) -> Result<Document, StoreError> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.create(collection, document_id, data).await
    }

    async fn update(
        &self,
        collection: &str,
        document_id: &str,
        data: Fields,
    ) -> Result<Document, StoreError> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.update(collection, document_id, data).await
    }

    async fn delete(&self, collection: &str, document_id: &str) -> Result<(), StoreError> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(collection, document_id).await
    }
}
