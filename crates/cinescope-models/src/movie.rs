use serde::{Deserialize, Serialize};

/// Titles longer than this are shortened on grid cards
pub const CARD_TITLE_MAX_CHARS: usize = 30;

/// Catalog entry as returned by the backend's TMDB proxy endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl MovieSummary {
    /// Title as shown on a grid card
    pub fn card_title(&self) -> String {
        if self.title.chars().count() > CARD_TITLE_MAX_CHARS {
            let mut short: String = self.title.chars().take(CARD_TITLE_MAX_CHARS).collect();
            short.push('…');
            short
        } else {
            self.title.clone()
        }
    }

    /// Year parsed from `release_date` (`YYYY-MM-DD`)
    pub fn release_year(&self) -> Option<u32> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn movie(title: &str) -> MovieSummary {
        MovieSummary {
            id: 1,
            title: title.to_string(),
            poster_path: None,
            backdrop_path: None,
            overview: None,
            release_date: None,
            vote_average: None,
        }
    }

    #[test]
    fn test_card_title_truncation() {
        assert_eq!(movie("Alien").card_title(), "Alien");

        let exact = "a".repeat(CARD_TITLE_MAX_CHARS);
        assert_eq!(movie(&exact).card_title(), exact);

        let long = movie("Dr. Strangelove or: How I Learned to Stop Worrying");
        assert_eq!(long.card_title(), "Dr. Strangelove or: How I Lear…");
    }

    #[test]
    fn test_card_title_counts_chars_not_bytes() {
        let title = "é".repeat(31);
        let card = movie(&title).card_title();
        assert_eq!(card.chars().count(), CARD_TITLE_MAX_CHARS + 1);
        assert!(card.ends_with('…'));
    }

    #[test]
    fn test_decode_tmdb_shape() {
        let movie: MovieSummary = serde_json::from_value(json!({
            "id": 603,
            "title": "The Matrix",
            "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            "backdrop_path": null,
            "release_date": "1999-03-30",
            "vote_average": 8.2,
            "genre_ids": [28, 878]
        }))
        .unwrap();

        assert_eq!(movie.release_year(), Some(1999));
        assert!(movie.backdrop_path.is_none());
        assert!(movie.overview.is_none());
    }
}
