pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{ApiConfig, Config, DiscoverConfig, ImageConfig, DEFAULT_API_BASE_URL, DEFAULT_GENRES};
pub use credentials::CredentialStore;
pub use paths::{container_base_path, PathManager};
