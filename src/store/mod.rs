//! Action store: canonical state, reducer dispatch and subscriber fan-out.
//!
//! The store exclusively owns the canonical [`Snapshot`] and the subscriber
//! registry. All mutation happens inside [`Store::dispatch`]:
//!
//! ```text
//! dispatch(action)
//!   ├─ middleware.before   (registration order, may reject)
//!   ├─ reducer             (pure, may reject)
//!   ├─ replace snapshot
//!   ├─ notify subscribers  (each call isolated)
//!   └─ middleware.after    (reverse order, may re-dispatch)
//! ```
//!
//! Once the snapshot is replaced the action is committed: every `after` hook
//! still runs and `dispatch` returns `Ok` even if one of them fails.

mod error;
mod middleware;
mod snapshot;
mod subscription;

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex, RwLock};

use crate::mvi::{Action, Reducer};

pub use error::{DispatchError, InvalidActionError};
pub use middleware::Middleware;
pub use snapshot::Snapshot;
pub use subscription::Subscription;

/// Whether a dispatch is currently running on the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    /// Ready to accept an action.
    Idle,
    /// A dispatch (possibly with nested re-dispatches) is in flight.
    Processing,
}

type Listener<S> = dyn Fn(&Snapshot<S>) + Send + Sync;

struct Subscriber<S> {
    id: u64,
    active: AtomicBool,
    callback: Box<Listener<S>>,
}

struct StoreInner<R: Reducer> {
    /// Serializes dispatches from different threads. Reentrant so that a
    /// middleware may dispatch again from inside an `after` hook.
    dispatch_lock: ReentrantMutex<()>,
    depth: AtomicUsize,
    current: RwLock<Snapshot<R::State>>,
    subscribers: Mutex<Vec<Arc<Subscriber<R::State>>>>,
    next_id: AtomicU64,
    middleware: Vec<Arc<dyn Middleware<R>>>,
}

/// Shared handle to a reducer-driven store.
///
/// Cloning the handle is cheap; all clones refer to the same state.
pub struct Store<R: Reducer> {
    inner: Arc<StoreInner<R>>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Reducer> Store<R> {
    /// Create a store without middleware.
    pub fn new(initial: R::State) -> Self {
        Self::with_middleware(initial, Vec::new())
    }

    /// Create a store whose dispatch runs through `middleware`, in order.
    pub fn with_middleware(initial: R::State, middleware: Vec<Arc<dyn Middleware<R>>>) -> Self {
        tracing::debug!(
            middleware = ?middleware.iter().map(|m| m.name()).collect::<Vec<_>>(),
            "Store created"
        );
        Self {
            inner: Arc::new(StoreInner {
                dispatch_lock: ReentrantMutex::new(()),
                depth: AtomicUsize::new(0),
                current: RwLock::new(Snapshot::initial(initial)),
                subscribers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                middleware,
            }),
        }
    }

    /// Current canonical snapshot.
    pub fn get_state(&self) -> Snapshot<R::State> {
        self.inner.current.read().clone()
    }

    pub fn phase(&self) -> DispatchPhase {
        if self.inner.depth.load(Ordering::SeqCst) == 0 {
            DispatchPhase::Idle
        } else {
            DispatchPhase::Processing
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }

    /// Register `callback` to run after every future dispatch.
    ///
    /// The callback runs synchronously on the dispatching thread, before
    /// `dispatch` returns. Ordering between subscribers is unspecified.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Snapshot<R::State>) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        let subscriber = Arc::new(Subscriber {
            id,
            active: AtomicBool::new(true),
            callback: Box::new(callback),
        });
        self.inner.subscribers.lock().push(Arc::clone(&subscriber));
        tracing::trace!(subscription = id, "Subscribed");

        let registry = Arc::downgrade(&self.inner);
        Subscription::new(
            id,
            Box::new(move || {
                subscriber.active.store(false, Ordering::SeqCst);
                if let Some(inner) = registry.upgrade() {
                    inner.subscribers.lock().retain(|s| s.id != id);
                }
            }),
        )
    }

    /// Run `f` with every dispatch held off.
    ///
    /// `f` sees the canonical snapshot, which cannot change until `f`
    /// returns. Dispatching from inside `f` on the same thread is allowed.
    pub fn atomically<T>(&self, f: impl FnOnce(&Snapshot<R::State>) -> T) -> T {
        let _serial = self.inner.dispatch_lock.lock();
        f(&self.get_state())
    }

    /// Dispatch `action` only if `guard` accepts the current snapshot.
    ///
    /// The guard and the dispatch run under the same lock, so no other
    /// dispatch can slip in between them.
    pub fn dispatch_if<E, G>(&self, action: R::Action, guard: G) -> Result<Snapshot<R::State>, E>
    where
        G: FnOnce(&Snapshot<R::State>) -> Result<(), E>,
        E: From<DispatchError>,
    {
        self.atomically(|current| {
            guard(current)?;
            Ok(self.dispatch(action)?)
        })
    }

    /// Run `action` through middleware and the reducer, then broadcast.
    ///
    /// Returns the snapshot produced by this action's own reduction. On error
    /// the canonical state is untouched and nobody is notified.
    pub fn dispatch(&self, action: R::Action) -> Result<Snapshot<R::State>, DispatchError> {
        self.run(action, false)
    }

    /// Dispatch an action that follows up on an already committed one.
    ///
    /// Meant for `after` hooks. `before` hooks still observe the action but
    /// cannot veto it; only the reducer can reject a follow-up.
    pub fn dispatch_follow_up(
        &self,
        action: R::Action,
    ) -> Result<Snapshot<R::State>, DispatchError> {
        self.run(action, true)
    }

    fn run(&self, action: R::Action, follow_up: bool) -> Result<Snapshot<R::State>, DispatchError> {
        let _serial = self.inner.dispatch_lock.lock();
        let _depth = DepthGuard::enter(&self.inner.depth);

        let name = action.name();
        let current = self.get_state();

        for middleware in &self.inner.middleware {
            if let Err(err) = middleware.before(&action, &current) {
                if !follow_up {
                    return Err(err);
                }
                tracing::warn!(action = name, error = %err, "Follow-up cannot be vetoed, applying it");
            }
        }

        let transition = R::reduce(current.state(), action.clone()).map_err(|source| {
            tracing::warn!(action = name, error = %source, "Action rejected by reducer");
            DispatchError::InvalidAction {
                action: name,
                source,
            }
        })?;

        let next = current.successor(transition);
        *self.inner.current.write() = next.clone();
        tracing::debug!(action = name, version = next.version(), "Dispatched");

        self.notify(&next);

        for middleware in self.inner.middleware.iter().rev() {
            if let Err(err) = middleware.after(&action, self) {
                tracing::error!(
                    middleware = middleware.name(),
                    action = name,
                    version = next.version(),
                    error = %err,
                    "After hook failed, action stays committed"
                );
            }
        }

        Ok(next)
    }

    fn notify(&self, snapshot: &Snapshot<R::State>) {
        // Copy the registry so callbacks may (un)subscribe without deadlocking.
        let subscribers: Vec<_> = self.inner.subscribers.lock().clone();

        for subscriber in subscribers {
            if !subscriber.active.load(Ordering::SeqCst) {
                continue;
            }
            let delivered =
                panic::catch_unwind(AssertUnwindSafe(|| (subscriber.callback)(snapshot)));
            match delivered {
                Ok(()) => tracing::trace!(
                    subscription = subscriber.id,
                    version = snapshot.version(),
                    "Notified"
                ),
                Err(_) => tracing::error!(
                    subscription = subscriber.id,
                    version = snapshot.version(),
                    "Subscriber panicked, continuing broadcast"
                ),
            }
        }
    }
}

struct DepthGuard<'a>(&'a AtomicUsize);

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a AtomicUsize) -> Self {
        depth.fetch_add(1, Ordering::SeqCst);
        Self(depth)
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
