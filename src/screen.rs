//! Saved-movies list screen.
//!
//! The screen owns a lazy [`Fetcher`] over the saved-movies list and refetches
//! on every focus gain. What it shows is derived from the fetcher state alone.

use crate::fetch::{FetchMode, FetchState, Fetcher};
use crate::models::SavedMovie;
use crate::models::movie::release_year;
use crate::services::SavedMovieService;
use std::fmt::Write;
use std::sync::Arc;
use tokio::sync::watch;

/// What the screen displays, checked in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState {
    Loading,
    Error(String),
    /// No data yet, or an empty list.
    Empty,
    Populated(Vec<SavedMovie>),
}

impl ScreenState {
    #[must_use]
    pub fn from_fetch(state: &FetchState<Vec<SavedMovie>>) -> Self {
        if state.loading {
            return Self::Loading;
        }

        if let Some(error) = &state.error {
            return Self::Error(error.message.clone());
        }

        match &state.data {
            Some(movies) if !movies.is_empty() => Self::Populated(movies.clone()),
            _ => Self::Empty,
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Loading => "Loading...".to_string(),
            Self::Error(message) => format!("Error loading saved movies: {message}"),
            Self::Empty => "No saved movies yet\nSave movies from the details page to see them here"
                .to_string(),
            Self::Populated(movies) => {
                let mut out = format!("Saved Movies ({})\n", movies.len());
                for movie in movies {
                    let year = release_year(movie.release_date.as_deref()).unwrap_or("----");
                    let _ = writeln!(
                        out,
                        "  {} ({}) ★ {:.1}  [{}]",
                        movie.title, year, movie.vote_average, movie.movie_id
                    );
                }
                out
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    FocusGained,
    FocusLost,
}

pub struct SavedMoviesScreen {
    fetcher: Fetcher<Vec<SavedMovie>>,
}

impl SavedMoviesScreen {
    /// The list is fetched through the `Result`-returning read so store
    /// failures reach the error state instead of showing as an empty list.
    #[must_use]
    pub fn new(saved_movies: Arc<dyn SavedMovieService>) -> Self {
        let fetcher = Fetcher::new(
            move || {
                let saved_movies = Arc::clone(&saved_movies);
                async move { saved_movies.try_list_all().await.map_err(anyhow::Error::from) }
            },
            FetchMode::Lazy,
        );

        Self { fetcher }
    }

    /// Every focus gain refetches, however recent the last fetch was.
    pub async fn handle(&self, event: ViewEvent) {
        if event == ViewEvent::FocusGained {
            self.fetcher.refetch().await;
        }
    }

    #[must_use]
    pub fn state(&self) -> ScreenState {
        ScreenState::from_fetch(&self.fetcher.state())
    }

    #[must_use]
    pub fn render(&self) -> String {
        self.state().render()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchState<Vec<SavedMovie>>> {
        self.fetcher.subscribe()
    }

    #[must_use]
    pub const fn fetcher(&self) -> &Fetcher<Vec<SavedMovie>> {
        &self.fetcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MovieId;
    use crate::fetch::ErrorInfo;
    use chrono::Utc;

    fn movie(title: &str) -> SavedMovie {
        SavedMovie {
            id: format!("doc-{title}"),
            movie_id: MovieId::new(1),
            title: title.to_string(),
            poster_path: None,
            release_date: Some("2010-07-15".to_string()),
            vote_average: 8.4,
            overview: None,
            runtime: None,
            genres: String::new(),
            saved_at: Utc::now(),
        }
    }

    fn fetch_state(
        loading: bool,
        error: Option<&str>,
        data: Option<Vec<SavedMovie>>,
    ) -> FetchState<Vec<SavedMovie>> {
        FetchState {
            data,
            loading,
            error: error.map(|message| ErrorInfo {
                message: message.to_string(),
            }),
        }
    }

    #[test]
    fn loading_wins_over_everything() {
        let state = fetch_state(true, Some("boom"), Some(vec![movie("Heat")]));
        assert_eq!(ScreenState::from_fetch(&state), ScreenState::Loading);
    }

    #[test]
    fn error_wins_over_data() {
        let state = fetch_state(false, Some("boom"), Some(vec![movie("Heat")]));
        assert_eq!(
            ScreenState::from_fetch(&state),
            ScreenState::Error("boom".to_string())
        );
    }

    #[test]
    fn absent_or_empty_data_is_empty() {
        assert_eq!(
            ScreenState::from_fetch(&fetch_state(false, None, None)),
            ScreenState::Empty
        );
        assert_eq!(
            ScreenState::from_fetch(&fetch_state(false, None, Some(vec![]))),
            ScreenState::Empty
        );
    }

    #[test]
    fn rendering_per_state() {
        assert_eq!(
            ScreenState::Error("timeout".to_string()).render(),
            "Error loading saved movies: timeout"
        );
        assert!(ScreenState::Empty.render().starts_with("No saved movies yet"));

        let populated = ScreenState::Populated(vec![movie("Inception")]).render();
        assert!(populated.starts_with("Saved Movies (1)"));
        assert!(populated.contains("Inception (2010) ★ 8.4"));
    }
}
