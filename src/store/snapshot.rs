//! Versioned, shared state snapshots.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::mvi::Transition;

/// Immutable view of the canonical state at one point in time.
///
/// Every dispatch mints a new snapshot with a strictly greater version, even
/// when the reducer left the data unchanged. Two snapshots compare as the
/// same only when no dispatch happened between them.
pub struct Snapshot<S> {
    inner: Arc<Versioned<S>>,
}

struct Versioned<S> {
    version: u64,
    state: Arc<S>,
}

impl<S> Snapshot<S> {
    pub(crate) fn initial(state: S) -> Self {
        Self {
            inner: Arc::new(Versioned {
                version: 0,
                state: Arc::new(state),
            }),
        }
    }

    /// Build the snapshot that follows `self` after a reduction.
    ///
    /// `Unchanged` shares the data with `self` but still gets a new identity.
    pub(crate) fn successor(&self, transition: Transition<S>) -> Self {
        let state = match transition {
            Transition::Unchanged => Arc::clone(&self.inner.state),
            Transition::Next(state) => Arc::new(state),
        };
        Self {
            inner: Arc::new(Versioned {
                version: self.inner.version + 1,
                state,
            }),
        }
    }

    /// Monotonic dispatch counter; 0 for the initial state.
    pub fn version(&self) -> u64 {
        self.inner.version
    }

    pub fn state(&self) -> &S {
        &self.inner.state
    }

    /// Identity comparison: true only for clones of the same snapshot.
    pub fn same(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// True when both snapshots point at the same state data.
    pub fn shares_data(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner.state, &b.inner.state)
    }
}

impl<S> Clone for Snapshot<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> Deref for Snapshot<S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.state()
    }
}

impl<S: fmt::Debug> fmt::Debug for Snapshot<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("version", &self.inner.version)
            .field("state", &self.inner.state)
            .finish()
    }
}
