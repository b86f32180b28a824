use crate::client::ApiClient;
use crate::error::ApiError;
use cinescope_models::MovieSummary;
use reqwest::Method;
use tracing::debug;

pub const POPULAR_PATH: &str = "/api/movies/popular";
pub const DISCOVER_PATH: &str = "/api/discover";

pub async fn get_popular(client: &ApiClient) -> Result<Vec<MovieSummary>, ApiError> {
    let request = client.request(Method::GET, POPULAR_PATH);
    let movies: Vec<MovieSummary> = client.send_json(request, "Failed to load popular movies").await?;
    debug!(count = movies.len(), "Fetched popular movies");
    Ok(movies)
}

pub async fn discover(
    client: &ApiClient,
    genre: Option<&str>,
    year: Option<u32>,
) -> Result<Vec<MovieSummary>, ApiError> {
    let mut query: Vec<(&str, String)> = Vec::new();
    if let Some(genre) = genre.filter(|g| !g.is_empty()) {
        query.push(("genre", genre.to_string()));
    }
    if let Some(year) = year {
        query.push(("year", year.to_string()));
    }

    let mut request = client.request(Method::GET, DISCOVER_PATH);
    if !query.is_empty() {
        request = request.query(&query);
    }

    let movies: Vec<MovieSummary> = client.send_json(request, "Failed to discover movies").await?;
    debug!(count = movies.len(), ?genre, ?year, "Fetched discover results");
    Ok(movies)
}
