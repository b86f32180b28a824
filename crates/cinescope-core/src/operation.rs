use parking_lot::Mutex;
use std::collections::HashMap;

use crate::state::ManagerViewState;

/// Server-facing operations the manager tracks for de-duplication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Refresh,
    Create,
    Rename,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl OperationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, OperationStatus::Pending)
    }
}

/// Last known status per operation; absent means idle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationTable {
    statuses: HashMap<Operation, OperationStatus>,
}

impl OperationTable {
    pub fn get(&self, operation: Operation) -> OperationStatus {
        self.statuses.get(&operation).copied().unwrap_or_default()
    }

    pub fn set(&mut self, operation: Operation, status: OperationStatus) {
        if status == OperationStatus::Idle {
            self.statuses.remove(&operation);
        } else {
            self.statuses.insert(operation, status);
        }
    }

    pub fn any_pending(&self) -> bool {
        self.statuses.values().any(OperationStatus::is_pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Name was empty after trimming
    EmptyName,
    /// The user answered "no" to the confirmation
    Declined,
    /// The id is not among the loaded lists
    UnknownList,
}

/// Result of a manager operation. Failures are already reported to the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Skipped(SkipReason),
    /// An operation of the same kind is still in flight; nothing was sent
    Busy,
    Failed(String),
    /// The mutation went through but the follow-up fetch failed, so the
    /// local lists may not reflect it
    Unsynced(String),
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// True when the server accepted the request, whether or not the re-fetch worked
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Done | Outcome::Unsynced(_))
    }
}

/// Marks an operation pending for as long as it is alive.
///
/// If the owning future is dropped before [`finish`](PendingGuard::finish),
/// the previous status is put back so a cancelled call cannot leave the
/// operation stuck in `Pending`.
pub(crate) struct PendingGuard<'a> {
    state: &'a Mutex<ManagerViewState>,
    operation: Operation,
    previous: OperationStatus,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    /// Returns `None` when the operation is already pending
    pub(crate) fn begin(state: &'a Mutex<ManagerViewState>, operation: Operation) -> Option<Self> {
        let mut guard = state.lock();
        let previous = guard.operations.get(operation);
        if previous.is_pending() {
            return None;
        }
        guard.operations.set(operation, OperationStatus::Pending);

        Some(Self {
            state,
            operation,
            previous,
            armed: true,
        })
    }

    pub(crate) fn finish(mut self, status: OperationStatus) {
        self.state.lock().operations.set(self.operation, status);
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.lock().operations.set(self.operation, self.previous);
        }
    }
}
