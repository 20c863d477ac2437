//! Bounded journal of recent dispatches.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::mvi::{Action, Reducer};
use crate::store::{DispatchError, Middleware, Snapshot};

/// One dispatched action, recorded before it reached the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub action: &'static str,
    /// Version of the canonical snapshot the action was applied to.
    pub base_version: u64,
}

/// Ring buffer of the most recent actions seen by a store.
///
/// Rejected actions are recorded too, since the journal runs ahead of the
/// reducer.
#[derive(Clone)]
pub struct ActionJournal {
    capacity: usize,
    entries: Arc<RwLock<VecDeque<JournalEntry>>>,
}

impl ActionJournal {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
        }
    }

    pub fn snapshot(&self) -> Vec<JournalEntry> {
        self.entries.read().iter().cloned().collect()
    }

    /// Action names, oldest first.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.read().iter().map(|e| e.action).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn push(&self, entry: JournalEntry) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.write();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }
}

impl<R: Reducer> Middleware<R> for ActionJournal {
    fn name(&self) -> &'static str {
        "journal"
    }

    fn before(&self, action: &R::Action, state: &Snapshot<R::State>) -> Result<(), DispatchError> {
        self.push(JournalEntry {
            action: action.name(),
            base_version: state.version(),
        });
        Ok(())
    }
}
