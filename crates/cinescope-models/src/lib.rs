pub mod image;
pub mod movie;
pub mod user;
pub mod watchlist;

pub use image::{image_url, ImageSize, DEFAULT_IMAGE_BASE_URL, MISSING_IMAGE_TEXT};
pub use movie::{MovieSummary, CARD_TITLE_MAX_CHARS};
pub use user::User;
pub use watchlist::{MovieId, Watchlist, WatchlistId, WatchlistMovieEntry};
