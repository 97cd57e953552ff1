pub mod movie;
pub mod saved_movie;
pub mod search_counter;

pub use movie::{Genre, Movie, MovieDetails};
pub use saved_movie::{NewSavedMovie, SavedMovie};
pub use search_counter::{NewSearchCounter, SearchCounter};
