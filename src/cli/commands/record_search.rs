//! Record search command handler

use crate::domain::MovieId;
use crate::models::Movie;
use crate::state::SharedState;

pub async fn cmd_record_search(
    state: &SharedState,
    query: &str,
    movie_id: i64,
    title: String,
    poster_path: String,
) -> anyhow::Result<()> {
    let movie = Movie {
        id: MovieId::try_from(movie_id)?,
        title,
        poster_path: Some(poster_path),
        release_date: None,
        vote_average: 0.0,
        overview: None,
    };

    let counter = state.search_counts.record_search(query, &movie).await?;

    println!(
        "\"{}\" searched {} time{}",
        counter.search_term,
        counter.count,
        if counter.count == 1 { "" } else { "s" }
    );

    Ok(())
}
