use cinescope_api::WatchlistApi;
use cinescope_models::{Watchlist, WatchlistId};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::collaborators::{Confirmer, Notifier};
use crate::operation::{Operation, OperationStatus, Outcome, PendingGuard, SkipReason};
use crate::state::ManagerViewState;
use crate::view::{build_cards, ListCard, PosterStyle};

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this list?";

/// Keeps a local view of the user's watchlists in step with the server.
///
/// Every successful mutation is followed by a full re-fetch; the server's
/// answer replaces the local lists wholesale. Operations take `&self` so a
/// front end can share one manager between tasks. The state lock is never
/// held across a request.
pub struct WatchlistManager {
    api: Arc<dyn WatchlistApi>,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
    state: Mutex<ManagerViewState>,
}

impl WatchlistManager {
    pub fn new(
        api: Arc<dyn WatchlistApi>,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        Self {
            api,
            notifier,
            confirmer,
            state: Mutex::new(ManagerViewState::default()),
        }
    }

    /// Initial load when the view opens
    pub async fn mount(&self) -> Outcome {
        self.refresh_lists().await
    }

    /// Re-fetch all lists. On failure the last good lists stay in place.
    pub async fn refresh_lists(&self) -> Outcome {
        let Some(guard) = PendingGuard::begin(&self.state, Operation::Refresh) else {
            debug!("Refresh already in flight");
            return Outcome::Busy;
        };

        let outcome = self.resync().await;
        guard.finish(if outcome.is_failed() {
            OperationStatus::Failed
        } else {
            OperationStatus::Succeeded
        });
        outcome
    }

    /// Create a list named `name` (trimmed). Blank names are ignored silently.
    pub async fn create_list(&self, name: &str) -> Outcome {
        let name = name.trim();
        if name.is_empty() {
            debug!("Ignoring create with empty name");
            return Outcome::Skipped(SkipReason::EmptyName);
        }

        let Some(guard) = PendingGuard::begin(&self.state, Operation::Create) else {
            return Outcome::Busy;
        };

        match self.api.create_watchlist(name).await {
            Ok(()) => {
                guard.finish(OperationStatus::Succeeded);
                self.state.lock().pending_new_list_name.clear();
                info!(name, "Watchlist created");
                self.notifier
                    .report_success(&format!("Created watchlist \"{}\"", name));
                self.resync_after_mutation().await
            }
            Err(e) => {
                guard.finish(OperationStatus::Failed);
                self.fail(e.to_string())
            }
        }
    }

    /// Create a list from the new-list input buffer
    pub async fn submit_new_list(&self) -> Outcome {
        let name = self.state.lock().pending_new_list_name.clone();
        self.create_list(&name).await
    }

    /// Rename list `id`. Uses the same blank-name rule as [`create_list`](Self::create_list).
    pub async fn rename_list(&self, id: &WatchlistId, new_name: &str) -> Outcome {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            debug!(id = %id, "Ignoring rename with empty name");
            return Outcome::Skipped(SkipReason::EmptyName);
        }

        let Some(guard) = PendingGuard::begin(&self.state, Operation::Rename) else {
            return Outcome::Busy;
        };

        match self.api.rename_watchlist(id, new_name).await {
            Ok(()) => {
                guard.finish(OperationStatus::Succeeded);
                self.state.lock().rename_buffers.remove(id);
                info!(id = %id, name = new_name, "Watchlist renamed");
                self.notifier
                    .report_success(&format!("Renamed watchlist to \"{}\"", new_name));
                self.resync_after_mutation().await
            }
            Err(e) => {
                guard.finish(OperationStatus::Failed);
                self.fail(e.to_string())
            }
        }
    }

    /// Rename list `id` to whatever is in its rename buffer
    pub async fn submit_rename(&self, id: &WatchlistId) -> Outcome {
        let text = self.rename_text(id);
        self.rename_list(id, &text).await
    }

    /// Delete list `id` after the user confirms.
    ///
    /// If the list being deleted is the expanded one, the expansion is
    /// cleared before the request and restored when the delete fails.
    pub async fn delete_list(&self, id: &WatchlistId) -> Outcome {
        let Some(guard) = PendingGuard::begin(&self.state, Operation::Delete) else {
            return Outcome::Busy;
        };

        if !self.confirmer.confirm(DELETE_CONFIRMATION) {
            debug!(id = %id, "Delete declined");
            return Outcome::Skipped(SkipReason::Declined);
        }

        let cleared = {
            let mut state = self.state.lock();
            if state.expanded_list_id.as_ref() == Some(id) {
                state.expanded_list_id.take()
            } else {
                None
            }
        };

        match self.api.delete_watchlist(id).await {
            Ok(()) => {
                guard.finish(OperationStatus::Succeeded);
                self.state.lock().rename_buffers.remove(id);
                info!(id = %id, "Watchlist deleted");
                self.notifier.report_success("Watchlist deleted");
                self.resync_after_mutation().await
            }
            Err(e) => {
                guard.finish(OperationStatus::Failed);
                if let Some(previous) = cleared {
                    let mut state = self.state.lock();
                    // Only restore if nothing else was expanded meanwhile
                    if state.expanded_list_id.is_none() && state.contains(&previous) {
                        state.expanded_list_id = Some(previous);
                    }
                }
                self.fail(e.to_string())
            }
        }
    }

    /// Show the movies of list `id`, or hide them if they are already shown.
    /// At most one list is expanded at a time.
    pub fn toggle_expand(&self, id: &WatchlistId) -> Outcome {
        let mut state = self.state.lock();
        if state.expanded_list_id.as_ref() == Some(id) {
            state.expanded_list_id = None;
            return Outcome::Done;
        }
        if !state.contains(id) {
            return Outcome::Skipped(SkipReason::UnknownList);
        }
        state.expanded_list_id = Some(id.clone());
        Outcome::Done
    }

    pub fn set_new_list_name(&self, text: impl Into<String>) {
        self.state.lock().pending_new_list_name = text.into();
    }

    pub fn new_list_name(&self) -> String {
        self.state.lock().pending_new_list_name.clone()
    }

    pub fn set_rename_text(&self, id: &WatchlistId, text: impl Into<String>) {
        self.state.lock().rename_buffers.insert(id.clone(), text.into());
    }

    pub fn rename_text(&self, id: &WatchlistId) -> String {
        self.state
            .lock()
            .rename_buffers
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn lists(&self) -> Vec<Watchlist> {
        self.state.lock().lists.clone()
    }

    /// Expanded list id; never points at a list that is not loaded
    pub fn expanded_list_id(&self) -> Option<WatchlistId> {
        self.state.lock().valid_expanded_id().cloned()
    }

    pub fn expanded_list(&self) -> Option<Watchlist> {
        let state = self.state.lock();
        state.valid_expanded_id().and_then(|id| state.find(id)).cloned()
    }

    /// Whether any fetch has been applied yet; false means `lists()` is not server data
    pub fn has_loaded(&self) -> bool {
        self.state.lock().has_loaded()
    }

    pub fn operation_status(&self, operation: Operation) -> OperationStatus {
        self.state.lock().operations.get(operation)
    }

    pub fn snapshot(&self) -> ManagerViewState {
        self.state.lock().clone()
    }

    pub fn cards(&self, posters: &PosterStyle) -> Vec<ListCard> {
        build_cards(&self.state.lock(), posters)
    }

    /// Fetch and apply the server's lists; the newest fetch wins when several overlap
    async fn resync(&self) -> Outcome {
        let ticket = self.state.lock().next_fetch_ticket();

        match self.api.list_watchlists().await {
            Ok(lists) => {
                let count = lists.len();
                if self.state.lock().apply_fetch(ticket, lists) {
                    debug!(count, "Watchlists resynchronized");
                } else {
                    debug!(ticket, "Dropped result of an older fetch");
                }
                Outcome::Done
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    async fn resync_after_mutation(&self) -> Outcome {
        match self.resync().await {
            Outcome::Failed(message) => Outcome::Unsynced(message),
            outcome => outcome,
        }
    }

    fn fail(&self, message: String) -> Outcome {
        warn!(error = %message, "Watchlist request failed");
        self.notifier.report_error(&message);
        Outcome::Failed(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::FixedAnswer;
    use async_trait::async_trait;
    use cinescope_api::ApiError;
    use reqwest::StatusCode;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use tokio::sync::Notify;

    /// In-memory backend that records every request
    #[derive(Default)]
    struct FakeApi {
        server: Mutex<Vec<Watchlist>>,
        calls: Mutex<Vec<String>>,
        failing: Mutex<HashSet<&'static str>>,
        create_gate: Mutex<Option<Arc<Notify>>>,
        next_id: AtomicU64,
    }

    impl FakeApi {
        fn with_lists(lists: Vec<Watchlist>) -> Arc<Self> {
            let api = Self::default();
            *api.server.lock() = lists;
            Arc::new(api)
        }

        fn fail(&self, call: &'static str) {
            self.failing.lock().insert(call);
        }

        fn recover(&self, call: &'static str) {
            self.failing.lock().remove(call);
        }

        fn set_server(&self, lists: Vec<Watchlist>) {
            *self.server.lock() = lists;
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }

        fn check(&self, call: &'static str) -> Result<(), ApiError> {
            if self.failing.lock().contains(call) {
                return Err(ApiError::Status {
                    context: "fake request failed",
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl WatchlistApi for FakeApi {
        async fn list_watchlists(&self) -> Result<Vec<Watchlist>, ApiError> {
            self.calls.lock().push("list".to_string());
            self.check("list")?;
            Ok(self.server.lock().clone())
        }

        async fn create_watchlist(&self, name: &str) -> Result<(), ApiError> {
            self.calls.lock().push(format!("create:{}", name));
            let gate = self.create_gate.lock().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            self.check("create")?;
            let id = format!("id-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
            self.server.lock().push(Watchlist::new(id, name));
            Ok(())
        }

        async fn rename_watchlist(&self, id: &WatchlistId, name: &str) -> Result<(), ApiError> {
            self.calls.lock().push(format!("rename:{}:{}", id, name));
            self.check("rename")?;
            let mut server = self.server.lock();
            let list = server.iter_mut().find(|l| &l.id == id).ok_or(ApiError::Status {
                context: "fake rename",
                status: StatusCode::NOT_FOUND,
                body: "not found".to_string(),
            })?;
            list.name = name.to_string();
            Ok(())
        }

        async fn delete_watchlist(&self, id: &WatchlistId) -> Result<(), ApiError> {
            self.calls.lock().push(format!("delete:{}", id));
            self.check("delete")?;
            self.server.lock().retain(|l| &l.id != id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        errors: Mutex<Vec<String>>,
        successes: Mutex<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn report_error(&self, message: &str) {
            self.errors.lock().push(message.to_string());
        }

        fn report_success(&self, message: &str) {
            self.successes.lock().push(message.to_string());
        }
    }

    /// Records whether it was asked before answering
    struct AskingConfirmer {
        answer: bool,
        asked: AtomicBool,
    }

    impl Confirmer for AskingConfirmer {
        fn confirm(&self, message: &str) -> bool {
            assert_eq!(message, DELETE_CONFIRMATION);
            self.asked.store(true, Ordering::SeqCst);
            self.answer
        }
    }

    fn id(s: &str) -> WatchlistId {
        WatchlistId::from(s)
    }

    fn names(manager: &WatchlistManager) -> Vec<String> {
        manager.lists().into_iter().map(|l| l.name).collect()
    }

    fn setup(lists: Vec<Watchlist>) -> (Arc<FakeApi>, Arc<RecordingNotifier>, WatchlistManager) {
        let api = FakeApi::with_lists(lists);
        let notifier = Arc::new(RecordingNotifier::default());
        let manager = WatchlistManager::new(api.clone(), notifier.clone(), Arc::new(FixedAnswer(true)));
        (api, notifier, manager)
    }

    fn two_lists() -> Vec<Watchlist> {
        vec![Watchlist::new("a", "A"), Watchlist::new("b", "B")]
    }

    #[tokio::test]
    async fn test_mount_loads_lists() {
        let (api, _, manager) = setup(two_lists());
        assert!(manager.lists().is_empty());

        assert!(manager.mount().await.is_done());
        assert_eq!(names(&manager), vec!["A", "B"]);
        assert_eq!(api.calls(), vec!["list"]);
        assert_eq!(manager.operation_status(Operation::Refresh), OperationStatus::Succeeded);
    }

    #[tokio::test]
    async fn test_create_with_blank_name_sends_nothing() {
        let (api, notifier, manager) = setup(two_lists());
        manager.mount().await;
        manager.set_new_list_name("draft");

        for blank in ["", "   ", "\t\n"] {
            assert_eq!(
                manager.create_list(blank).await,
                Outcome::Skipped(SkipReason::EmptyName)
            );
        }

        assert_eq!(api.calls(), vec!["list"]);
        assert_eq!(names(&manager), vec!["A", "B"]);
        assert_eq!(manager.new_list_name(), "draft");
        assert!(notifier.errors.lock().is_empty());
        assert_eq!(manager.operation_status(Operation::Create), OperationStatus::Idle);
    }

    #[tokio::test]
    async fn test_refresh_replaces_wholesale() {
        let (api, _, manager) = setup(two_lists());
        manager.mount().await;

        api.set_server(vec![Watchlist::new("a", "A"), Watchlist::new("c", "C")]);
        assert_eq!(manager.refresh_lists().await, Outcome::Done);

        let ids: Vec<String> = manager.lists().iter().map(|l| l.id.to_string()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_last_good_lists() {
        let (api, notifier, manager) = setup(two_lists());
        manager.mount().await;

        api.fail("list");
        api.set_server(vec![]);
        assert!(manager.refresh_lists().await.is_failed());

        assert_eq!(names(&manager), vec!["A", "B"]);
        assert_eq!(notifier.errors.lock().len(), 1);
        assert_eq!(manager.operation_status(Operation::Refresh), OperationStatus::Failed);
        // No automatic retry
        assert_eq!(api.calls(), vec!["list", "list"]);
    }

    #[tokio::test]
    async fn test_create_applied_but_refetch_failed() {
        let (api, notifier, manager) = setup(vec![]);
        api.fail("list");

        let outcome = manager.create_list("Favorites").await;

        assert!(matches!(outcome, Outcome::Unsynced(_)));
        assert!(outcome.is_applied());
        assert!(!outcome.is_failed());
        assert!(manager.lists().is_empty());
        assert!(!manager.has_loaded());
        assert_eq!(manager.operation_status(Operation::Create), OperationStatus::Succeeded);
        assert_eq!(notifier.successes.lock().len(), 1);
        assert_eq!(notifier.errors.lock().len(), 1);
        assert_eq!(api.calls(), vec!["create:Favorites", "list"]);

        api.recover("list");
        assert_eq!(manager.refresh_lists().await, Outcome::Done);
        assert!(manager.has_loaded());
        assert_eq!(names(&manager), vec!["Favorites"]);
    }

    #[tokio::test]
    async fn test_rename_and_delete_report_unsynced_refetch() {
        let (api, notifier, manager) = setup(two_lists());
        manager.mount().await;
        api.fail("list");

        assert!(matches!(manager.rename_list(&id("a"), "A2").await, Outcome::Unsynced(_)));
        assert!(matches!(manager.delete_list(&id("b")).await, Outcome::Unsynced(_)));

        // Local lists still show the last good fetch
        assert!(manager.has_loaded());
        assert_eq!(names(&manager), vec!["A", "B"]);
        assert_eq!(notifier.successes.lock().len(), 2);
        assert_eq!(notifier.errors.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_create_then_refresh() {
        let (api, notifier, manager) = setup(vec![]);
        manager.mount().await;
        manager.set_new_list_name("  Favorites ");

        assert_eq!(manager.submit_new_list().await, Outcome::Done);

        assert_eq!(names(&manager), vec!["Favorites"]);
        assert_eq!(manager.new_list_name(), "");
        assert_eq!(api.calls(), vec!["list", "create:Favorites", "list"]);
        assert_eq!(notifier.successes.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_names_are_sent() {
        let (api, _, manager) = setup(vec![Watchlist::new("a", "Favorites")]);
        manager.mount().await;

        assert_eq!(manager.create_list("Favorites").await, Outcome::Done);
        assert_eq!(names(&manager), vec!["Favorites", "Favorites"]);
        assert!(api.calls().contains(&"create:Favorites".to_string()));
    }

    #[tokio::test]
    async fn test_create_failure_keeps_buffer() {
        let (api, notifier, manager) = setup(vec![]);
        manager.mount().await;
        api.fail("create");
        manager.set_new_list_name("Favorites");

        assert!(manager.submit_new_list().await.is_failed());
        assert_eq!(manager.new_list_name(), "Favorites");
        assert!(manager.lists().is_empty());
        assert_eq!(notifier.errors.lock().len(), 1);
        // No refresh after a failed mutation
        assert_eq!(api.calls(), vec!["list", "create:Favorites"]);
    }

    #[tokio::test]
    async fn test_toggle_expand() {
        let (_, _, manager) = setup(two_lists());
        manager.mount().await;

        assert_eq!(manager.toggle_expand(&id("a")), Outcome::Done);
        assert_eq!(manager.expanded_list_id(), Some(id("a")));
        manager.toggle_expand(&id("a"));
        assert_eq!(manager.expanded_list_id(), None);

        manager.toggle_expand(&id("a"));
        manager.toggle_expand(&id("b"));
        assert_eq!(manager.expanded_list_id(), Some(id("b")));
        assert_eq!(manager.expanded_list().map(|l| l.name), Some("B".to_string()));

        assert_eq!(
            manager.toggle_expand(&id("missing")),
            Outcome::Skipped(SkipReason::UnknownList)
        );
        assert_eq!(manager.expanded_list_id(), Some(id("b")));
    }

    #[tokio::test]
    async fn test_delete_clears_expansion() {
        let (api, _, manager) = setup(two_lists());
        manager.mount().await;
        manager.toggle_expand(&id("a"));

        assert_eq!(manager.delete_list(&id("a")).await, Outcome::Done);

        assert_eq!(manager.expanded_list_id(), None);
        assert_eq!(manager.snapshot().expanded_list_id, None);
        assert_eq!(names(&manager), vec!["B"]);
        assert_eq!(api.calls(), vec!["list", "delete:a", "list"]);
    }

    #[tokio::test]
    async fn test_delete_of_other_list_keeps_expansion() {
        let (_, _, manager) = setup(two_lists());
        manager.mount().await;
        manager.toggle_expand(&id("a"));

        assert_eq!(manager.delete_list(&id("b")).await, Outcome::Done);
        assert_eq!(manager.expanded_list_id(), Some(id("a")));
    }

    #[tokio::test]
    async fn test_declined_confirmation_is_noop() {
        let api = FakeApi::with_lists(two_lists());
        let confirmer = Arc::new(AskingConfirmer {
            answer: false,
            asked: AtomicBool::new(false),
        });
        let manager = WatchlistManager::new(
            api.clone(),
            Arc::new(RecordingNotifier::default()),
            confirmer.clone(),
        );
        manager.mount().await;
        manager.toggle_expand(&id("a"));
        let before = manager.snapshot();

        assert_eq!(
            manager.delete_list(&id("a")).await,
            Outcome::Skipped(SkipReason::Declined)
        );

        assert!(confirmer.asked.load(Ordering::SeqCst));
        assert_eq!(api.calls(), vec!["list"]);
        let after = manager.snapshot();
        assert_eq!(after.lists, before.lists);
        assert_eq!(after.expanded_list_id, before.expanded_list_id);
        assert_eq!(after.operations, before.operations);
    }

    #[tokio::test]
    async fn test_failed_delete_restores_expansion() {
        let (api, notifier, manager) = setup(two_lists());
        manager.mount().await;
        manager.toggle_expand(&id("a"));
        api.fail("delete");

        assert!(manager.delete_list(&id("a")).await.is_failed());

        assert_eq!(manager.expanded_list_id(), Some(id("a")));
        assert_eq!(names(&manager), vec!["A", "B"]);
        assert_eq!(notifier.errors.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_rename_failure_keeps_buffer() {
        let (api, notifier, manager) = setup(two_lists());
        manager.mount().await;
        api.fail("rename");
        manager.set_rename_text(&id("a"), "New Name");

        assert!(manager.submit_rename(&id("a")).await.is_failed());
        assert_eq!(manager.rename_text(&id("a")), "New Name");
        assert_eq!(notifier.errors.lock().len(), 1);

        // Retry without retyping
        api.recover("rename");
        assert_eq!(manager.submit_rename(&id("a")).await, Outcome::Done);
        assert_eq!(names(&manager), vec!["New Name", "B"]);
        assert_eq!(manager.rename_text(&id("a")), "");
    }

    #[tokio::test]
    async fn test_rename_buffers_do_not_cross_cards() {
        let (api, _, manager) = setup(two_lists());
        manager.mount().await;
        manager.set_rename_text(&id("a"), "Typed on A");

        // Submitting B with nothing typed for B sends nothing
        assert_eq!(
            manager.submit_rename(&id("b")).await,
            Outcome::Skipped(SkipReason::EmptyName)
        );
        assert_eq!(manager.rename_text(&id("a")), "Typed on A");
        assert_eq!(api.calls(), vec!["list"]);
        assert_eq!(names(&manager), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_rename_blank_is_ignored() {
        let (api, _, manager) = setup(two_lists());
        manager.mount().await;

        assert_eq!(
            manager.rename_list(&id("a"), "  ").await,
            Outcome::Skipped(SkipReason::EmptyName)
        );
        assert_eq!(api.calls(), vec!["list"]);
    }

    #[tokio::test]
    async fn test_concurrent_create_is_busy() {
        let (api, _, manager) = setup(vec![]);
        manager.mount().await;
        let gate = Arc::new(Notify::new());
        *api.create_gate.lock() = Some(gate.clone());

        let first = manager.create_list("One");
        let second = async {
            while !manager.operation_status(Operation::Create).is_pending() {
                tokio::task::yield_now().await;
            }
            let outcome = manager.create_list("Two").await;
            gate.notify_one();
            outcome
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first, Outcome::Done);
        assert_eq!(second, Outcome::Busy);
        assert_eq!(names(&manager), vec!["One"]);
        assert!(!api.calls().contains(&"create:Two".to_string()));
    }

    #[tokio::test]
    async fn test_cancelled_create_is_not_left_pending() {
        let (api, _, manager) = setup(vec![]);
        let gate = Arc::new(Notify::new());
        *api.create_gate.lock() = Some(gate);

        {
            let pending = manager.create_list("Stuck");
            tokio::pin!(pending);
            tokio::select! {
                biased;
                _ = &mut pending => panic!("create should be held by the gate"),
                _ = tokio::task::yield_now() => {}
            }
            assert!(manager.operation_status(Operation::Create).is_pending());
        }

        assert_eq!(manager.operation_status(Operation::Create), OperationStatus::Idle);
    }

    #[tokio::test]
    async fn test_refresh_prunes_vanished_expansion() {
        let (api, _, manager) = setup(two_lists());
        manager.mount().await;
        manager.toggle_expand(&id("b"));

        // Deleted from another session
        api.set_server(vec![Watchlist::new("a", "A")]);
        manager.refresh_lists().await;

        assert_eq!(manager.expanded_list_id(), None);
        assert_eq!(manager.snapshot().expanded_list_id, None);
    }

    #[tokio::test]
    async fn test_cards_follow_state() {
        let (_, _, manager) = setup(two_lists());
        manager.mount().await;
        manager.toggle_expand(&id("b"));
        manager.set_rename_text(&id("a"), "Renamed");

        let cards = manager.cards(&PosterStyle::from_config(&Default::default()));
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].rename_text, "Renamed");
        assert!(cards[0].expanded.is_none());
        assert!(cards[1].expanded.is_some());
    }
}
