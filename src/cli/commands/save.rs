//! Save command handler

use crate::domain::MovieId;
use crate::models::{Genre, MovieDetails};
use crate::state::SharedState;

#[allow(clippy::too_many_arguments)]
pub fn details_from_args(
    movie_id: i64,
    title: String,
    poster_path: Option<String>,
    release_date: Option<String>,
    vote_average: f64,
    overview: Option<String>,
    runtime: Option<i32>,
    genres: Vec<String>,
) -> anyhow::Result<MovieDetails> {
    Ok(MovieDetails {
        id: MovieId::try_from(movie_id)?,
        title,
        poster_path,
        release_date,
        vote_average,
        overview,
        runtime,
        genres: genres
            .into_iter()
            .map(|name| Genre { id: 0, name })
            .collect(),
    })
}

pub async fn cmd_save(state: &SharedState, details: &MovieDetails) -> anyhow::Result<()> {
    if state.saved_movies.is_saved(details.id).await {
        println!("{} is already saved.", details.title);
        return Ok(());
    }

    let saved = state.saved_movies.save(details).await?;
    println!("✓ Saved {} ({})", saved.title, saved.movie_id);

    Ok(())
}
