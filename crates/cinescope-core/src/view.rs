use cinescope_config::ImageConfig;
use cinescope_models::{image_url, ImageSize, MovieId, WatchlistId};
use serde::Serialize;

use crate::state::ManagerViewState;

pub const EMPTY_LIST_MESSAGE: &str = "No movies in this list yet.";
pub const VIEW_LABEL: &str = "View Movies";
pub const HIDE_LABEL: &str = "Hide Movies";

/// Where poster images come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterStyle {
    pub base_url: String,
    pub size: ImageSize,
}

impl PosterStyle {
    pub fn from_config(images: &ImageConfig) -> Self {
        Self {
            base_url: images.base_url.clone(),
            size: images.poster_size,
        }
    }

    pub fn url(&self, path: Option<&str>) -> Option<String> {
        image_url(&self.base_url, self.size, path)
    }
}

/// Everything a front end needs to draw one watchlist card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListCard {
    pub id: WatchlistId,
    pub name: String,
    pub movie_count: usize,
    pub rename_text: String,
    pub toggle_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<ExpandedMovies>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpandedMovies {
    Empty { message: &'static str },
    Entries { movies: Vec<MovieTile> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieTile {
    pub movie_id: MovieId,
    pub title: String,
    /// `None` means render the fallback
    pub poster_url: Option<String>,
}

pub fn build_cards(state: &ManagerViewState, posters: &PosterStyle) -> Vec<ListCard> {
    let expanded_id = state.valid_expanded_id();

    state
        .lists
        .iter()
        .map(|list| {
            let is_expanded = expanded_id == Some(&list.id);
            let expanded = is_expanded.then(|| {
                if list.movies.is_empty() {
                    ExpandedMovies::Empty {
                        message: EMPTY_LIST_MESSAGE,
                    }
                } else {
                    ExpandedMovies::Entries {
                        movies: list
                            .movies
                            .iter()
                            .map(|entry| MovieTile {
                                movie_id: entry.movie_id.clone(),
                                title: entry.title.clone(),
                                poster_url: posters.url(entry.poster_path.as_deref()),
                            })
                            .collect(),
                    }
                }
            });

            ListCard {
                id: list.id.clone(),
                name: list.name.clone(),
                movie_count: list.movies.len(),
                rename_text: state.rename_buffers.get(&list.id).cloned().unwrap_or_default(),
                toggle_label: if is_expanded { HIDE_LABEL } else { VIEW_LABEL },
                expanded,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinescope_models::{Watchlist, WatchlistMovieEntry};

    fn posters() -> PosterStyle {
        PosterStyle::from_config(&ImageConfig::default())
    }

    fn state_with_lists() -> ManagerViewState {
        let mut state = ManagerViewState::default();
        state.lists = vec![
            Watchlist::new("a", "Favorites").with_movies(vec![
                WatchlistMovieEntry {
                    movie_id: MovieId::Numeric(603),
                    title: "The Matrix".to_string(),
                    poster_path: Some("/matrix.jpg".to_string()),
                },
                WatchlistMovieEntry {
                    movie_id: MovieId::Numeric(78),
                    title: "Blade Runner".to_string(),
                    poster_path: None,
                },
            ]),
            Watchlist::new("b", "Later"),
        ];
        state
    }

    #[test]
    fn test_collapsed_cards() {
        let cards = build_cards(&state_with_lists(), &posters());
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|c| c.expanded.is_none()));
        assert!(cards.iter().all(|c| c.toggle_label == VIEW_LABEL));
        assert_eq!(cards[0].movie_count, 2);
    }

    #[test]
    fn test_expanded_card_shows_entries_with_fallback() {
        let mut state = state_with_lists();
        state.expanded_list_id = Some(WatchlistId::from("a"));

        let cards = build_cards(&state, &posters());
        assert_eq!(cards[0].toggle_label, HIDE_LABEL);
        assert_eq!(cards[1].toggle_label, VIEW_LABEL);

        match &cards[0].expanded {
            Some(ExpandedMovies::Entries { movies }) => {
                assert_eq!(movies.len(), 2);
                assert_eq!(
                    movies[0].poster_url.as_deref(),
                    Some("https://image.tmdb.org/t/p/w500/matrix.jpg")
                );
                assert_eq!(movies[1].poster_url, None);
            }
            other => panic!("expected entries, got {:?}", other),
        }
    }

    #[test]
    fn test_expanded_empty_list_shows_message() {
        let mut state = state_with_lists();
        state.expanded_list_id = Some(WatchlistId::from("b"));

        let cards = build_cards(&state, &posters());
        assert_eq!(
            cards[1].expanded,
            Some(ExpandedMovies::Empty {
                message: EMPTY_LIST_MESSAGE
            })
        );
    }

    #[test]
    fn test_dangling_expansion_is_not_rendered() {
        let mut state = state_with_lists();
        state.expanded_list_id = Some(WatchlistId::from("deleted"));

        let cards = build_cards(&state, &posters());
        assert!(cards.iter().all(|c| c.expanded.is_none()));
    }

    #[test]
    fn test_rename_text_is_per_card() {
        let mut state = state_with_lists();
        state
            .rename_buffers
            .insert(WatchlistId::from("b"), "Someday".to_string());

        let cards = build_cards(&state, &posters());
        assert_eq!(cards[0].rename_text, "");
        assert_eq!(cards[1].rename_text, "Someday");
    }
}
