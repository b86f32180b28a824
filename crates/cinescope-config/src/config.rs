use cinescope_models::{ImageSize, DEFAULT_IMAGE_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_API_BASE_URL: &str = "https://movie-backend-1-3le3.onrender.com";

/// Genres offered by the discover filter
pub const DEFAULT_GENRES: [&str; 6] = ["Action", "Comedy", "Drama", "Horror", "Romance", "Sci-Fi"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub images: ImageConfig,
    #[serde(default)]
    pub discover: DiscoverConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_image_base_url")]
    pub base_url: String,
    /// Size used for watchlist entries
    #[serde(default = "default_poster_size")]
    pub poster_size: ImageSize,
    /// Size used for catalog grid cards
    #[serde(default = "default_grid_size")]
    pub grid_size: ImageSize,
    #[serde(default = "default_backdrop_size")]
    pub backdrop_size: ImageSize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoverConfig {
    #[serde(default = "default_genres")]
    pub genres: Vec<String>,
    /// Newest year offered by the year filter
    #[serde(default = "default_latest_year")]
    pub latest_year: u32,
    /// Number of years offered, counting back from `latest_year`
    #[serde(default = "default_year_span")]
    pub year_span: u32,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

fn default_poster_size() -> ImageSize {
    ImageSize::W500
}

fn default_grid_size() -> ImageSize {
    ImageSize::W300
}

fn default_backdrop_size() -> ImageSize {
    ImageSize::Original
}

fn default_genres() -> Vec<String> {
    DEFAULT_GENRES.iter().map(|g| g.to_string()).collect()
}

fn default_latest_year() -> u32 {
    2025
}

fn default_year_span() -> u32 {
    20
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: default_image_base_url(),
            poster_size: default_poster_size(),
            grid_size: default_grid_size(),
            backdrop_size: default_backdrop_size(),
        }
    }
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            genres: default_genres(),
            latest_year: default_latest_year(),
            year_span: default_year_span(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to built-in defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        validate_http_url("api.base_url", &self.api.base_url)?;
        validate_http_url("images.base_url", &self.images.base_url)?;

        if self.api.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("api.timeout_seconds must be greater than zero"));
        }

        if self.discover.genres.is_empty() {
            return Err(anyhow::anyhow!("discover.genres cannot be empty"));
        }
        if self.discover.genres.iter().any(|g| g.trim().is_empty()) {
            return Err(anyhow::anyhow!("discover.genres cannot contain blank entries"));
        }
        if self.discover.year_span == 0 {
            return Err(anyhow::anyhow!("discover.year_span must be greater than zero"));
        }
        if self.discover.year_span > self.discover.latest_year {
            return Err(anyhow::anyhow!(
                "discover.year_span ({}) reaches before year zero from latest_year {}",
                self.discover.year_span,
                self.discover.latest_year
            ));
        }

        Ok(())
    }
}

fn validate_http_url(field: &str, value: &str) -> anyhow::Result<()> {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .ok_or_else(|| anyhow::anyhow!("{} must start with http:// or https:// (got '{}')", field, value))?;

    if rest.trim_matches('/').is_empty() {
        return Err(anyhow::anyhow!("{} is missing a host", field));
    }
    Ok(())
}
