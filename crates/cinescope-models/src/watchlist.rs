use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned watchlist identifier (the backend's `_id`)
///
/// Opaque to the client: it is only compared, displayed and echoed back in
/// request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WatchlistId(String);

impl WatchlistId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WatchlistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WatchlistId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for WatchlistId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for WatchlistId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Movie reference stored inside a watchlist
///
/// The backend stores TMDB ids, which arrive as numbers from most endpoints
/// but as strings from some older lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovieId::Numeric(id) => write!(f, "{}", id),
            MovieId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Watchlist {
    #[serde(rename = "_id")]
    pub id: WatchlistId,
    pub name: String,
    /// Display order is insertion order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub movies: Vec<WatchlistMovieEntry>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Watchlist {
    pub fn new(id: impl Into<WatchlistId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            movies: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_movies(mut self, movies: Vec<WatchlistMovieEntry>) -> Self {
        self.movies = movies;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistMovieEntry {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub title: String,
    /// Partial path on the image host, e.g. `/abc123.jpg`
    #[serde(rename = "posterPath", default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
}

// Lists created before any movie was added come back with `movies: null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<WatchlistMovieEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<WatchlistMovieEntry>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
