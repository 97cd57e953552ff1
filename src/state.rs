use std::sync::Arc;

use crate::clients::AppwriteClient;
use crate::config::Config;
use crate::screen::SavedMoviesScreen;
use crate::services::{
    DocumentSavedMovieService, DocumentSearchCountService, SavedMovieService, SearchCountService,
};
use crate::store::DocumentStore;

/// Services wired against one store handle.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Arc<dyn DocumentStore>,

    pub search_counts: Arc<dyn SearchCountService>,

    pub saved_movies: Arc<dyn SavedMovieService>,
}

impl SharedState {
    /// Validates `config` and connects the services to the Appwrite API.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;
        let client = AppwriteClient::new(&config.appwrite)?;
        Ok(Self::with_store(config, Arc::new(client)))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        let search_counts = Arc::new(DocumentSearchCountService::new(Arc::clone(&store), &config));
        let saved_movies = Arc::new(DocumentSavedMovieService::new(Arc::clone(&store), &config));

        Self {
            config: Arc::new(config),
            store,
            search_counts,
            saved_movies,
        }
    }

    #[must_use]
    pub fn saved_movies_screen(&self) -> SavedMoviesScreen {
        SavedMoviesScreen::new(Arc::clone(&self.saved_movies))
    }
}
