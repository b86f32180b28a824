use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Public TMDB image host used by the backend's poster and backdrop paths
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Text shown in place of an image when the entity has no path
pub const MISSING_IMAGE_TEXT: &str = "No image";

/// Size segment of an image URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    /// Movie grid cards
    W300,
    /// Watchlist entries
    W500,
    /// Featured movie backdrop
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W300 => "w300",
            ImageSize::W500 => "w500",
            ImageSize::Original => "original",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "w300" => Ok(ImageSize::W300),
            "w500" => Ok(ImageSize::W500),
            "original" => Ok(ImageSize::Original),
            _ => Err(format!("Invalid image size: {}. Use 'w300', 'w500', or 'original'", s)),
        }
    }
}

/// Build a loadable image URL from the host base, a size and a partial path.
///
/// Returns `None` when the path is absent or blank so callers render the
/// fallback instead of a broken image. Paths are accepted with or without a
/// leading slash; exactly one slash separates each segment.
pub fn image_url(base_url: &str, size: ImageSize, path: Option<&str>) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    Some(format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        size.as_str(),
        path.trim_start_matches('/')
    ))
}
