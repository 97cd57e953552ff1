use crate::domain::MovieId;
use crate::models::movie::MovieDetails;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A movie on the user's saved list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMovie {
    #[serde(rename = "$id")]
    pub id: String,
    pub movie_id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub runtime: Option<i32>,
    #[serde(default)]
    pub genres: String,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSavedMovie {
    pub movie_id: MovieId,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: f64,
    pub overview: Option<String>,
    pub runtime: Option<i32>,
    pub genres: String,
    /// ISO-8601 with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
    /// Fixed width keeps string ordering equal to time ordering.
    pub saved_at: String,
}

impl NewSavedMovie {
    #[must_use]
    pub fn from_details(details: &MovieDetails, saved_at: DateTime<Utc>) -> Self {
        Self {
            movie_id: details.id,
            title: details.title.clone(),
            poster_path: details.poster_path.clone(),
            release_date: details.release_date.clone(),
            vote_average: details.vote_average,
            overview: details.overview.clone(),
            runtime: details.runtime,
            genres: details.genre_names(),
            saved_at: saved_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
