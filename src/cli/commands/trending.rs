//! Trending command handler

use crate::state::SharedState;

pub async fn cmd_trending(state: &SharedState) -> anyhow::Result<()> {
    let Some(trending) = state.search_counts.fetch_trending().await else {
        println!("Trending movies are unavailable right now.");
        return Ok(());
    };

    if trending.is_empty() {
        println!("No searches recorded yet.");
        return Ok(());
    }

    println!("Trending Movies");
    println!("{:-<50}", "");

    for (rank, counter) in trending.iter().enumerate() {
        println!(
            "{:>2}. {} ({} searches)",
            rank + 1,
            counter.title,
            counter.count
        );
        println!("    term: \"{}\" | {}", counter.search_term, counter.poster_url);
    }

    Ok(())
}
