use cinescope_api::{ApiError, MovieCatalog};
use cinescope_config::DiscoverConfig;
use cinescope_models::MovieSummary;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscoverError {
    #[error("unknown genre '{given}', expected one of: {}", .allowed.join(", "))]
    UnknownGenre { given: String, allowed: Vec<String> },

    #[error("year {given} is outside {oldest}-{newest}")]
    YearOutOfRange { given: u32, oldest: u32, newest: u32 },
}

/// Filter for the discover endpoint. Both parts empty means "everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverFilter {
    /// Lowercased, as the backend expects
    pub genre: Option<String>,
    pub year: Option<u32>,
}

impl DiscoverFilter {
    pub fn is_cleared(&self) -> bool {
        self.genre.is_none() && self.year.is_none()
    }
}

/// Values the genre and year pickers may offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverOptions {
    pub genres: Vec<String>,
    /// Newest first
    pub years: Vec<u32>,
}

impl DiscoverOptions {
    pub fn from_config(config: &DiscoverConfig) -> Self {
        let span = config.year_span.min(config.latest_year);
        let years = (0..span).map(|offset| config.latest_year - offset).collect();

        Self {
            genres: config.genres.clone(),
            years,
        }
    }

    /// Check user input against the offered values and build a filter.
    /// Genre matching ignores case and surrounding whitespace.
    pub fn build_filter(
        &self,
        genre: Option<&str>,
        year: Option<u32>,
    ) -> Result<DiscoverFilter, DiscoverError> {
        let genre = match genre.map(str::trim).filter(|g| !g.is_empty()) {
            None => None,
            Some(given) => {
                let known = self
                    .genres
                    .iter()
                    .find(|g| g.eq_ignore_ascii_case(given))
                    .ok_or_else(|| DiscoverError::UnknownGenre {
                        given: given.to_string(),
                        allowed: self.genres.clone(),
                    })?;
                Some(known.to_lowercase())
            }
        };

        if let Some(given) = year {
            if !self.years.contains(&given) {
                return Err(DiscoverError::YearOutOfRange {
                    given,
                    oldest: self.years.last().copied().unwrap_or_default(),
                    newest: self.years.first().copied().unwrap_or_default(),
                });
            }
        }

        Ok(DiscoverFilter { genre, year })
    }
}

pub async fn discover(
    catalog: &dyn MovieCatalog,
    filter: &DiscoverFilter,
) -> Result<Vec<MovieSummary>, ApiError> {
    debug!(genre = ?filter.genre, year = ?filter.year, "Discovering movies");
    catalog
        .discover_movies(filter.genre.as_deref(), filter.year)
        .await
}
