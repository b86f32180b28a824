use crate::client::ApiClient;
use crate::error::ApiError;
use cinescope_models::{Watchlist, WatchlistId};
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, info};

pub const WATCHLISTS_PATH: &str = "/api/watchlists";

#[derive(Debug, Serialize)]
struct NamePayload<'a> {
    name: &'a str,
}

/// Path of a single list; ids are percent-encoded
pub fn watchlist_path(id: &WatchlistId) -> String {
    format!("{}/{}", WATCHLISTS_PATH, urlencoding::encode(id.as_str()))
}

/// Fetch every watchlist of the signed-in user, in server order
pub async fn get_watchlists(client: &ApiClient) -> Result<Vec<Watchlist>, ApiError> {
    let request = client.request(Method::GET, WATCHLISTS_PATH);
    let lists: Vec<Watchlist> = client.send_json(request, "Failed to load watchlists").await?;
    debug!(count = lists.len(), "Fetched watchlists");
    Ok(lists)
}

pub async fn create_watchlist(client: &ApiClient, name: &str) -> Result<(), ApiError> {
    let request = client
        .request(Method::POST, WATCHLISTS_PATH)
        .json(&NamePayload { name });
    client.send(request, "Failed to create watchlist").await?;
    info!(name, "Created watchlist");
    Ok(())
}

pub async fn rename_watchlist(client: &ApiClient, id: &WatchlistId, name: &str) -> Result<(), ApiError> {
    let request = client
        .request(Method::PUT, &watchlist_path(id))
        .json(&NamePayload { name });
    client.send(request, "Failed to rename watchlist").await?;
    info!(id = %id, name, "Renamed watchlist");
    Ok(())
}

pub async fn delete_watchlist(client: &ApiClient, id: &WatchlistId) -> Result<(), ApiError> {
    let request = client.request(Method::DELETE, &watchlist_path(id));
    client.send(request, "Failed to delete watchlist").await?;
    info!(id = %id, "Deleted watchlist");
    Ok(())
}
