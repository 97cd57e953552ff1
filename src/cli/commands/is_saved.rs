//! Is-saved command handler

use crate::domain::MovieId;
use crate::state::SharedState;

pub async fn cmd_is_saved(state: &SharedState, movie_id: i64) -> anyhow::Result<()> {
    let movie_id = MovieId::try_from(movie_id)?;
    let saved = state.saved_movies.is_saved(movie_id).await;

    println!("{movie_id}: {}", if saved { "saved" } else { "not saved" });
    Ok(())
}
