use crate::error::ApiError;
use async_trait::async_trait;
use cinescope_models::{MovieSummary, Watchlist, WatchlistId};

/// Watchlist endpoints of the backend, scoped to the signed-in account
#[async_trait]
pub trait WatchlistApi: Send + Sync {
    async fn list_watchlists(&self) -> Result<Vec<Watchlist>, ApiError>;

    // The created/updated list in the response body is not needed: callers re-fetch
    async fn create_watchlist(&self, name: &str) -> Result<(), ApiError>;
    async fn rename_watchlist(&self, id: &WatchlistId, name: &str) -> Result<(), ApiError>;
    async fn delete_watchlist(&self, id: &WatchlistId) -> Result<(), ApiError>;
}

/// Movie metadata proxied by the backend
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn popular_movies(&self) -> Result<Vec<MovieSummary>, ApiError>;

    /// Query parameters are only sent for the filters that are set
    async fn discover_movies(
        &self,
        genre: Option<&str>,
        year: Option<u32>,
    ) -> Result<Vec<MovieSummary>, ApiError>;
}
