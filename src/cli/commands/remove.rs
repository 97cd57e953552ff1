//! Remove command handler

use crate::domain::MovieId;
use crate::state::SharedState;

pub async fn cmd_remove(state: &SharedState, movie_id: i64) -> anyhow::Result<()> {
    let movie_id = MovieId::try_from(movie_id)?;

    if state.saved_movies.remove(movie_id).await? {
        println!("✓ Removed movie {movie_id} from saved movies");
    } else {
        println!("Movie {movie_id} is not saved.");
    }

    Ok(())
}
