use crate::domain::MovieId;
use serde::{Deserialize, Serialize};

/// Aggregate of how many times a search term was entered.
///
/// At most one counter should exist per `search_term`; the store does not
/// enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCounter {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    pub movie_id: MovieId,
    pub title: String,
    pub count: i64,
    pub poster_url: String,
}

/// Attributes written when a term is searched for the first time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSearchCounter {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    pub movie_id: MovieId,
    pub title: String,
    pub count: i64,
    pub poster_url: String,
}
