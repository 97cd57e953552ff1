//! Domain primitives shared by the store layer and the services.
//!
//! Movie identifiers come from the metadata provider and are stored verbatim
//! in the `movie_id` attribute of both collections. The newtype keeps them
//! apart from store-assigned document ids, which are plain strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Raised when a raw value cannot be a provider movie id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("movie id must be non-negative, got {0}")]
pub struct InvalidMovieId(pub i64);

/// Identifier of a movie at the metadata provider.
///
/// # Examples
///
/// ```rust
/// use popcorn::domain::MovieId;
///
/// let id = MovieId::new(27205);
/// assert_eq!(id.value(), 27205);
/// assert_eq!(id.to_string(), "27205");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MovieId(i64);

impl MovieId {
    /// Creates a new `MovieId` from a known-good id. Values read from the
    /// store or the command line go through [`MovieId::try_from`] instead.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `id` is negative.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        debug_assert!(id >= 0, "MovieId should be non-negative");
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MovieId> for i64 {
    fn from(id: MovieId) -> Self {
        id.0
    }
}

impl TryFrom<i64> for MovieId {
    type Error = InvalidMovieId;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        if id < 0 {
            return Err(InvalidMovieId(id));
        }
        Ok(Self(id))
    }
}

impl From<MovieId> for serde_json::Value {
    fn from(id: MovieId) -> Self {
        Self::from(id.0)
    }
}

impl Serialize for MovieId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i64::deserialize(deserializer)?;
        Self::try_from(id).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_id_conversions() {
        let id = MovieId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(i64::from(id), 42);
        assert_eq!(MovieId::try_from(42), Ok(id));
        assert_eq!(serde_json::Value::from(id), serde_json::json!(42));
    }

    #[test]
    fn movie_id_serializes_as_bare_integer() {
        let id = MovieId::new(603);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "603");
        let back: MovieId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn negative_ids_are_rejected() {
        assert_eq!(MovieId::try_from(-5), Err(InvalidMovieId(-5)));

        let err = serde_json::from_str::<MovieId>("-1").unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }
}
