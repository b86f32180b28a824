use crate::auth::TokenSource;
use crate::catalog;
use crate::error::ApiError;
use crate::traits::{MovieCatalog, WatchlistApi};
use crate::watchlists;
use async_trait::async_trait;
use cinescope_config::ApiConfig;
use cinescope_models::{MovieSummary, Watchlist, WatchlistId};
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Error bodies longer than this are cut before they reach `ApiError`
const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP client for the movie backend.
///
/// Every request built through it carries `Authorization: Bearer <token>`
/// when the token source currently holds a token.
#[derive(Clone)]
pub struct ApiClient {
    client: Arc<Client>,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl ApiClient {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenSource>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT, tokens)
    }

    pub fn from_config(config: &ApiConfig, tokens: Arc<dyn TokenSource>) -> Result<Self, ApiError> {
        Self::with_timeout(&config.base_url, Duration::from_secs(config.timeout_seconds), tokens)
    }

    pub fn with_timeout(
        base_url: &str,
        timeout: Duration,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url,
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request against `path` (which begins with `/`)
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "API request");

        let builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");

        match self.tokens.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and return the body of a successful response
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = summarize_body(&response.text().await.unwrap_or_default());
            warn!(status = %status, context, "API request failed");
            return Err(ApiError::Status {
                context,
                status,
                body,
            });
        }

        Ok(response.text().await?)
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> Result<T, ApiError> {
        let body = self.send(request, context).await?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode { context, source })
    }
}

/// Collapse whitespace and cut to [`MAX_ERROR_BODY_CHARS`] characters
fn summarize_body(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}…", &collapsed[..cut]),
        None => collapsed,
    }
}

fn normalize_base_url(base_url: &str) -> Result<String, ApiError> {
    let invalid = |reason: String| ApiError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let parsed = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    if parsed.query().is_some() {
        return Err(invalid("query strings are not allowed".to_string()));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[async_trait]
impl WatchlistApi for ApiClient {
    async fn list_watchlists(&self) -> Result<Vec<Watchlist>, ApiError> {
        watchlists::get_watchlists(self).await
    }

    async fn create_watchlist(&self, name: &str) -> Result<(), ApiError> {
        watchlists::create_watchlist(self, name).await
    }

    async fn rename_watchlist(&self, id: &WatchlistId, name: &str) -> Result<(), ApiError> {
        watchlists::rename_watchlist(self, id, name).await
    }

    async fn delete_watchlist(&self, id: &WatchlistId) -> Result<(), ApiError> {
        watchlists::delete_watchlist(self, id).await
    }
}

#[async_trait]
impl MovieCatalog for ApiClient {
    async fn popular_movies(&self) -> Result<Vec<MovieSummary>, ApiError> {
        catalog::get_popular(self).await
    }

    async fn discover_movies(
        &self,
        genre: Option<&str>,
        year: Option<u32>,
    ) -> Result<Vec<MovieSummary>, ApiError> {
        catalog::discover(self, genre, year).await
    }
}
