pub mod auth;
pub mod catalog;
pub mod client;
pub mod error;
pub mod traits;
pub mod watchlists;

pub use auth::{AuthSession, TokenSource};
pub use client::ApiClient;
pub use error::ApiError;
pub use traits::{MovieCatalog, WatchlistApi};
