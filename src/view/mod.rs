//! Dual-cadence view over a store.
//!
//! A [`TurnView`] observes the store twice: once directly and once through a
//! token-bucket rate limiter. The view is *synced* when both observations
//! hold the same snapshot. A player may only act while its view is synced
//! and the turn is theirs, which opens a short catch-up lockout after every
//! move.

mod error;

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::mvi::Reducer;
use crate::rate_limit::{rate_limit, Feed, RateLimitConfig};
use crate::store::{Snapshot, Store, Subscription};
use crate::turn::TurnState;

pub use error::ViewError;

/// Derived view state: `value` is the throttled snapshot.
#[derive(Debug, Clone)]
pub struct SyncState<S> {
    pub synced: bool,
    pub value: Snapshot<S>,
}

struct Cadence<S> {
    immediate: Snapshot<S>,
    delayed: Snapshot<S>,
}

impl<S> Cadence<S> {
    fn synced(&self) -> bool {
        self.immediate.version() == self.delayed.version()
    }
}

struct Shared<S> {
    cells: Mutex<Cadence<S>>,
    changed: Notify,
}

/// Per-consumer adapter holding an immediate and a throttled snapshot.
///
/// Dropping the view releases both store subscriptions and stops the task
/// that drains the throttled stream.
pub struct TurnView<R: Reducer> {
    store: Store<R>,
    player: Option<usize>,
    shared: Arc<Shared<R::State>>,
    direct: Subscription,
    throttled: Subscription,
    pump: JoinHandle<()>,
}

impl<R> TurnView<R>
where
    R: Reducer,
    R::State: TurnState,
{
    /// Attach a view for `player` (or a spectator when `None`).
    ///
    /// # Errors
    /// Fails on an invalid rate-limit config or outside a Tokio runtime.
    pub fn attach(
        store: &Store<R>,
        config: RateLimitConfig,
        player: Option<usize>,
    ) -> Result<Self, ViewError> {
        let limit = rate_limit(config)?;
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| ViewError::NoRuntime)?;

        let (tx, feed) = Feed::channel();

        // Seed and subscribe with dispatches held off, so no snapshot falls
        // between the seed and the first notification.
        let (shared, direct, throttled) = store.atomically(|initial| {
            let shared = Arc::new(Shared {
                cells: Mutex::new(Cadence {
                    immediate: initial.clone(),
                    delayed: initial.clone(),
                }),
                changed: Notify::new(),
            });

            let direct = {
                let shared = Arc::clone(&shared);
                store.subscribe(move |snapshot| {
                    shared.cells.lock().immediate = snapshot.clone();
                    shared.changed.notify_waiters();
                })
            };

            let throttled = store.subscribe(move |snapshot| {
                // Only fails once the pump is gone, i.e. during teardown.
                let _ = tx.send(snapshot.clone());
            });

            (shared, direct, throttled)
        });

        let mut limited = limit.apply(feed);
        let pump = {
            let shared = Arc::clone(&shared);
            runtime.spawn(async move {
                while let Some(snapshot) = limited.next().await {
                    shared.cells.lock().delayed = snapshot;
                    shared.changed.notify_waiters();
                }
            })
        };

        tracing::info!(
            ?player,
            count = config.count,
            window_ms = config.window_ms,
            "View attached"
        );

        Ok(Self {
            store: store.clone(),
            player,
            shared,
            direct,
            throttled,
            pump,
        })
    }

    /// Attach a view that observes without ever acting.
    pub fn spectate(store: &Store<R>, config: RateLimitConfig) -> Result<Self, ViewError> {
        Self::attach(store, config, None)
    }

    pub fn player(&self) -> Option<usize> {
        self.player
    }

    pub fn sync_state(&self) -> SyncState<R::State> {
        let cells = self.shared.cells.lock();
        SyncState {
            synced: cells.synced(),
            value: cells.delayed.clone(),
        }
    }

    pub fn synced(&self) -> bool {
        self.shared.cells.lock().synced()
    }

    /// Latest snapshot seen by the direct subscription.
    pub fn latest(&self) -> Snapshot<R::State> {
        self.shared.cells.lock().immediate.clone()
    }

    /// Snapshot seen by the throttled subscription.
    pub fn value(&self) -> Snapshot<R::State> {
        self.shared.cells.lock().delayed.clone()
    }

    /// Whether the bound player may act right now.
    pub fn can_act(&self) -> bool {
        self.check_can_act().is_ok()
    }

    fn check_can_act(&self) -> Result<usize, ViewError> {
        let current = self.shared.cells.lock().immediate.current_player();
        self.check_gate(current)
    }

    fn check_gate(&self, current: usize) -> Result<usize, ViewError> {
        let player = self.player.ok_or(ViewError::Spectator)?;
        if !self.shared.cells.lock().synced() {
            return Err(ViewError::Syncing { player });
        }
        if current != player {
            return Err(ViewError::NotYourTurn { player, current });
        }
        Ok(player)
    }

    /// Dispatch `action` on behalf of the bound player.
    ///
    /// The gate is checked again under the store's dispatch lock, so two
    /// concurrent calls cannot both act on the same turn.
    ///
    /// # Errors
    /// Refuses while the view is catching up or when it is not this player's
    /// turn; otherwise forwards dispatch errors.
    pub fn act(&self, action: R::Action) -> Result<Snapshot<R::State>, ViewError> {
        self.store.dispatch_if(action, |current| {
            let player = self.check_gate(current.current_player())?;
            tracing::debug!(player, "Player acting");
            Ok(())
        })
    }

    /// Resolve on the next update of either cadence.
    pub async fn changed(&self) {
        self.shared.changed.notified().await;
    }

    /// Resolve once both cadences hold the same snapshot.
    pub async fn wait_synced(&self) {
        self.wait_until(|view| view.synced()).await;
    }

    /// Resolve once the bound player may act.
    ///
    /// # Errors
    /// Spectator views can never act.
    pub async fn wait_actionable(&self) -> Result<(), ViewError> {
        if self.player.is_none() {
            return Err(ViewError::Spectator);
        }
        self.wait_until(|view| view.can_act()).await;
        Ok(())
    }

    /// Resolve once `ready` holds for this view.
    pub async fn wait_until(&self, ready: impl Fn(&Self) -> bool) {
        loop {
            // Register before checking so an update in between is not lost.
            let notified = self.shared.changed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if ready(self) {
                return;
            }
            notified.await;
        }
    }

    /// Release both subscriptions and stop the throttled pump.
    pub fn detach(self) {
        drop(self);
    }
}

impl<R: Reducer> Drop for TurnView<R> {
    fn drop(&mut self) {
        self.direct.unsubscribe();
        self.throttled.unsubscribe();
        self.pump.abort();
        tracing::info!(player = ?self.player, "View detached");
    }
}
