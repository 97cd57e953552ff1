//! CLI module - Command-line interface for Popcorn
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use crate::config::Config;
use crate::state::SharedState;
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

/// Popcorn - search trends and saved movies on an Appwrite database
#[derive(Parser)]
#[command(name = "popcorn")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count a search for a term, creating its counter on first use
    #[command(alias = "rs")]
    RecordSearch {
        /// Search term, stored exactly as given
        query: String,
        #[arg(long, value_parser = movie_id_parser())]
        movie_id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        poster_path: String,
    },

    /// Show the most searched terms
    #[command(alias = "t")]
    Trending,

    /// Save a movie to the list
    Save {
        #[arg(long, value_parser = movie_id_parser())]
        movie_id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        poster_path: Option<String>,
        #[arg(long)]
        release_date: Option<String>,
        #[arg(long, default_value = "0")]
        vote_average: f64,
        #[arg(long)]
        overview: Option<String>,
        #[arg(long)]
        runtime: Option<i32>,
        /// Genre name, repeatable
        #[arg(long = "genre")]
        genres: Vec<String>,
    },

    /// Remove one saved entry for a movie
    #[command(alias = "rm")]
    Remove {
        #[arg(value_parser = movie_id_parser())]
        movie_id: i64,
    },

    /// Show the saved movies list
    #[command(alias = "ls")]
    Saved,

    /// Check whether a movie is saved
    IsSaved {
        #[arg(value_parser = movie_id_parser())]
        movie_id: i64,
    },

    /// Write a default config.toml if none exists
    InitConfig,
}

fn movie_id_parser() -> clap::builder::RangedI64ValueParser<i64> {
    clap::value_parser!(i64).range(0..)
}

/// Runs `command`, connecting to the store only for commands that need it.
pub async fn dispatch(config: Config, command: Commands) -> anyhow::Result<()> {
    if matches!(command, Commands::InitConfig) {
        return commands::cmd_init_config();
    }

    let state = SharedState::new(config).context("Invalid configuration")?;
    debug!(
        endpoint = %state.config.appwrite.endpoint,
        database = %state.config.appwrite.database_id,
        "Document store configured"
    );

    run_command(&state, command).await
}

pub async fn run_command(state: &SharedState, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::RecordSearch {
            query,
            movie_id,
            title,
            poster_path,
        } => commands::cmd_record_search(state, &query, movie_id, title, poster_path).await,
        Commands::Trending => commands::cmd_trending(state).await,
        Commands::Save {
            movie_id,
            title,
            poster_path,
            release_date,
            vote_average,
            overview,
            runtime,
            genres,
        } => {
            let details = commands::details_from_args(
                movie_id,
                title,
                poster_path,
                release_date,
                vote_average,
                overview,
                runtime,
                genres,
            )?;
            commands::cmd_save(state, &details).await
        }
        Commands::Remove { movie_id } => commands::cmd_remove(state, movie_id).await,
        Commands::Saved => commands::cmd_saved(state).await,
        Commands::IsSaved { movie_id } => commands::cmd_is_saved(state, movie_id).await,
        Commands::InitConfig => commands::cmd_init_config(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_record_search() {
        let cli = Cli::try_parse_from([
            "popcorn",
            "record-search",
            "inception",
            "--movie-id",
            "27205",
            "--title",
            "Inception",
            "--poster-path",
            "/inception.jpg",
        ])
        .unwrap();

        match cli.command {
            Commands::RecordSearch {
                query, movie_id, ..
            } => {
                assert_eq!(query, "inception");
                assert_eq!(movie_id, 27205);
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn save_collects_repeated_genres() {
        let cli = Cli::try_parse_from([
            "popcorn", "save", "--movie-id", "949", "--title", "Heat", "--genre", "Action",
            "--genre", "Crime",
        ])
        .unwrap();

        match cli.command {
            Commands::Save { genres, .. } => assert_eq!(genres, vec!["Action", "Crime"]),
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn negative_movie_ids_are_rejected() {
        assert!(Cli::try_parse_from(["popcorn", "remove", "--", "-5"]).is_err());
        assert!(Cli::try_parse_from(["popcorn", "is-saved", "--", "-1"]).is_err());
        assert!(
            Cli::try_parse_from(["popcorn", "save", "--movie-id=-3", "--title", "Heat"]).is_err()
        );
    }
}
