pub mod collaborators;
pub mod discover;
pub mod featured;
pub mod manager;
pub mod operation;
pub mod state;
pub mod view;

pub use collaborators::{Confirmer, FixedAnswer, Notifier};
pub use discover::{discover, DiscoverError, DiscoverFilter, DiscoverOptions};
pub use featured::{featured_at, pick_featured, FeaturedMovie, NO_FEATURED_MESSAGE};
pub use manager::{WatchlistManager, DELETE_CONFIRMATION};
pub use operation::{Operation, OperationStatus, Outcome, SkipReason};
pub use state::ManagerViewState;
pub use view::{build_cards, ExpandedMovies, ListCard, MovieTile, PosterStyle, EMPTY_LIST_MESSAGE};
