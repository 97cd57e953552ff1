//! Domain service for the user's saved-movies list.
//!
//! Writes propagate failures to the caller. Reads come in two forms: a
//! `try_*` method returning the store outcome, and a best-effort method that
//! logs failures and returns a safe default.

use crate::domain::MovieId;
use crate::models::{MovieDetails, SavedMovie};
use crate::store::StoreError;
use thiserror::Error;
use tracing::error;

/// Errors specific to saved-movie operations.
#[derive(Debug, Error)]
pub enum SavedMovieError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Domain service trait for saved movies.
#[async_trait::async_trait]
pub trait SavedMovieService: Send + Sync {
    /// Stores `details` with the current time as `saved_at`.
    ///
    /// No existence check is made: saving the same movie twice creates two
    /// documents. Call [`Self::is_saved`] first to avoid that, keeping in mind
    /// the check and the save are not atomic.
    async fn save(&self, details: &MovieDetails) -> Result<SavedMovie, SavedMovieError>;

    /// Deletes the first saved document for `movie_id`.
    ///
    /// Returns `false` when nothing matched. If duplicates exist, only one is
    /// removed per call.
    async fn remove(&self, movie_id: MovieId) -> Result<bool, SavedMovieError>;

    /// Saved movies, most recently saved first.
    ///
    /// No limit or cursor is sent, so the store's default page applies: an
    /// in-memory store returns everything, the Appwrite API returns its
    /// first page (25 documents unless the server is configured otherwise).
    async fn try_list_all(&self) -> Result<Vec<SavedMovie>, SavedMovieError>;

    async fn try_is_saved(&self, movie_id: MovieId) -> Result<bool, SavedMovieError>;

    /// Best-effort [`Self::try_list_all`]: `None` on failure.
    async fn list_all(&self) -> Option<Vec<SavedMovie>> {
        match self.try_list_all().await {
            Ok(movies) => Some(movies),
            Err(e) => {
                error!(error = %e, "Error fetching saved movies");
                metrics::counter!("store_read_failures_total", "operation" => "list_saved")
                    .increment(1);
                None
            }
        }
    }

    /// Best-effort [`Self::try_is_saved`]: `false` on failure.
    async fn is_saved(&self, movie_id: MovieId) -> bool {
        match self.try_is_saved(movie_id).await {
            Ok(saved) => saved,
            Err(e) => {
                error!(movie_id = %movie_id, error = %e, "Error checking if movie is saved");
                metrics::counter!("store_read_failures_total", "operation" => "is_saved")
                    .increment(1);
                false
            }
        }
    }
}
