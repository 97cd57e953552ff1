pub mod search_count_service;
pub mod search_count_service_impl;
pub use search_count_service::{SearchCountError, SearchCountService};
pub use search_count_service_impl::DocumentSearchCountService;

pub mod saved_movie_service;
pub mod saved_movie_service_impl;
pub use saved_movie_service::{SavedMovieError, SavedMovieService};
pub use saved_movie_service_impl::DocumentSavedMovieService;
