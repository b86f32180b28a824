use cinescope_models::{Watchlist, WatchlistId};
use std::collections::HashMap;

use crate::operation::OperationTable;

/// Client-only view state of the watchlist manager. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct ManagerViewState {
    /// Everything the server returned on the last successful fetch, in server order
    pub lists: Vec<Watchlist>,
    pub expanded_list_id: Option<WatchlistId>,
    pub pending_new_list_name: String,
    /// Unsubmitted rename text, one buffer per list
    pub rename_buffers: HashMap<WatchlistId, String>,
    pub operations: OperationTable,
    /// Ticket handed to the most recently started fetch
    pub(crate) fetch_seq: u64,
    /// Ticket of the fetch whose result is currently in `lists`
    pub(crate) applied_seq: u64,
}

impl ManagerViewState {
    pub fn contains(&self, id: &WatchlistId) -> bool {
        self.lists.iter().any(|list| &list.id == id)
    }

    /// False until the first successful fetch has been applied
    pub fn has_loaded(&self) -> bool {
        self.applied_seq > 0
    }

    pub fn find(&self, id: &WatchlistId) -> Option<&Watchlist> {
        self.lists.iter().find(|list| &list.id == id)
    }

    /// The expanded id, but only while that list still exists
    pub fn valid_expanded_id(&self) -> Option<&WatchlistId> {
        self.expanded_list_id.as_ref().filter(|id| self.contains(id))
    }

    pub(crate) fn next_fetch_ticket(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.fetch_seq
    }

    /// Replace the lists wholesale with the result of fetch `ticket`.
    ///
    /// Results of fetches started before the currently applied one are
    /// dropped. Returns whether the result was applied.
    pub(crate) fn apply_fetch(&mut self, ticket: u64, lists: Vec<Watchlist>) -> bool {
        if ticket <= self.applied_seq {
            return false;
        }
        self.applied_seq = ticket;
        self.lists = lists;

        if self.expanded_list_id.as_ref().is_some_and(|id| !self.contains(id)) {
            self.expanded_list_id = None;
        }
        let lists = &self.lists;
        self.rename_buffers
            .retain(|id, _| lists.iter().any(|list| &list.id == id));
        true
    }
}
