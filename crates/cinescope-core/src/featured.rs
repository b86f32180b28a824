use cinescope_api::{ApiError, MovieCatalog};
use cinescope_config::ImageConfig;
use cinescope_models::{image_url, MovieSummary};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

pub const NO_FEATURED_MESSAGE: &str = "No featured movie available";

/// Hero entry picked from the popular movies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturedMovie {
    pub id: u64,
    pub title: String,
    pub year: Option<u32>,
    pub rating: Option<f64>,
    pub overview: Option<String>,
    pub backdrop_url: String,
}

/// Feature `movies[index]`. A movie without a backdrop cannot be featured.
pub fn featured_at(movies: &[MovieSummary], index: usize, images: &ImageConfig) -> Option<FeaturedMovie> {
    let movie = movies.get(index)?;
    let backdrop_url = image_url(&images.base_url, images.backdrop_size, movie.backdrop_path.as_deref())?;

    Some(FeaturedMovie {
        id: movie.id,
        title: movie.title.clone(),
        year: movie.release_year(),
        rating: movie.vote_average,
        overview: movie.overview.clone().filter(|o| !o.trim().is_empty()),
        backdrop_url,
    })
}

/// Fetch popular movies and feature one at random; `None` when there is nothing to show
pub async fn pick_featured(
    catalog: &dyn MovieCatalog,
    images: &ImageConfig,
) -> Result<Option<FeaturedMovie>, ApiError> {
    let movies = catalog.popular_movies().await?;
    if movies.is_empty() {
        debug!("No popular movies to feature");
        return Ok(None);
    }

    let index = rand::rng().random_range(0..movies.len());
    debug!(index, count = movies.len(), "Picked featured movie");
    Ok(featured_at(&movies, index, images))
}
