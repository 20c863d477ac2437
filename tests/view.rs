mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use common::{assert_elapsed, CounterAction, CounterReducer, CounterState};
use tokio::time::Instant;
use turnsync::middleware::TurnAdvance;
use turnsync::rate_limit::{ConfigurationError, RateLimitConfig};
use turnsync::store::{DispatchError, Middleware, Snapshot, Store};
use turnsync::view::{TurnView, ViewError};

fn one_per_second() -> RateLimitConfig {
    RateLimitConfig::new(1, 1000)
}

fn turn_store() -> Store<CounterReducer> {
    let middleware: Vec<Arc<dyn Middleware<CounterReducer>>> = vec![Arc::new(TurnAdvance)];
    Store::with_middleware(CounterState::default(), middleware)
}

#[tokio::test(start_paused = true)]
async fn fresh_view_is_synced() {
    let store = Store::<CounterReducer>::new(CounterState::default());
    let view = TurnView::attach(&store, one_per_second(), Some(0)).unwrap();

    let sync = view.sync_state();
    assert!(sync.synced);
    assert_eq!(sync.value.version(), 0);
    assert!(view.can_act());
    assert_eq!(store.subscriber_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn throttled_value_trails_the_store() {
    let store = Store::<CounterReducer>::new(CounterState::default());
    let view = TurnView::attach(&store, one_per_second(), Some(0)).unwrap();
    let start = Instant::now();

    for n in 1..=3 {
        store.dispatch(CounterAction::Add(n)).unwrap();
    }
    assert_eq!(view.latest().version(), 3);
    assert!(!view.synced());

    for (version, at_ms, total) in [(1, 0, 1), (2, 1000, 3), (3, 2000, 6)] {
        view.wait_until(|v| v.value().version() == version).await;
        assert_elapsed(start, at_ms);
        assert_eq!(view.value().value, total);
        assert_eq!(view.synced(), version == 3);
    }
}

#[tokio::test(start_paused = true)]
async fn no_intermediate_state_is_skipped() {
    let store = Store::<CounterReducer>::new(CounterState::default());
    let view = TurnView::attach(&store, RateLimitConfig::new(1, 100), None).unwrap();

    for _ in 0..7 {
        store.dispatch(CounterAction::Add(1)).unwrap();
    }

    let mut seen = Vec::new();
    while seen.last() != Some(&7) {
        view.changed().await;
        let version = view.value().version();
        if seen.last() != Some(&version) && version > 0 {
            seen.push(version);
        }
    }
    assert_eq!(seen, (1..=7).collect::<Vec<u64>>());
}

#[tokio::test(start_paused = true)]
async fn acting_locks_out_until_synced() {
    let store = turn_store();
    let p0 = TurnView::attach(&store, one_per_second(), Some(0)).unwrap();
    let p1 = TurnView::attach(&store, one_per_second(), Some(1)).unwrap();
    let start = Instant::now();

    assert!(matches!(
        p1.act(CounterAction::Add(1)),
        Err(ViewError::NotYourTurn { player: 1, current: 0 })
    ));

    let played = p0.act(CounterAction::Add(1)).unwrap();
    assert_eq!(played.version(), 1);
    assert_eq!(store.get_state().current_player, 1);

    // Both the move and the turn advance still have to come through.
    assert!(matches!(
        p1.act(CounterAction::Add(1)),
        Err(ViewError::Syncing { player: 1 })
    ));
    assert!(matches!(
        p0.act(CounterAction::Add(1)),
        Err(ViewError::Syncing { player: 0 })
    ));

    p1.wait_actionable().await.unwrap();
    assert_elapsed(start, 1000);
    assert_eq!(p1.value().version(), 2);

    p0.wait_synced().await;
    assert!(matches!(
        p0.act(CounterAction::Add(1)),
        Err(ViewError::NotYourTurn { player: 0, current: 1 })
    ));

    p1.act(CounterAction::Add(10)).unwrap();
    let state = store.get_state();
    assert_eq!(state.value, 11);
    assert_eq!(state.current_player, 0);
}

#[tokio::test(start_paused = true)]
async fn spectator_never_acts() {
    let store = turn_store();
    let spectator = TurnView::spectate(&store, one_per_second()).unwrap();

    assert_eq!(spectator.player(), None);
    assert!(!spectator.can_act());
    assert!(matches!(
        spectator.act(CounterAction::Add(1)),
        Err(ViewError::Spectator)
    ));
    assert!(matches!(
        spectator.wait_actionable().await,
        Err(ViewError::Spectator)
    ));
    assert_eq!(store.get_state().version(), 0);
}

#[tokio::test(start_paused = true)]
async fn rejected_action_surfaces_as_dispatch_error() {
    let store = turn_store();
    let view = TurnView::attach(&store, one_per_second(), Some(0)).unwrap();

    let err = view.act(CounterAction::Fail).err().unwrap();
    assert!(matches!(
        err,
        ViewError::Dispatch(DispatchError::InvalidAction { action: "fail", .. })
    ));
    assert!(view.synced());
    assert!(view.can_act());
}

#[tokio::test(start_paused = true)]
async fn dropping_view_releases_subscriptions() {
    let store = Store::<CounterReducer>::new(CounterState::default());
    let first = TurnView::attach(&store, one_per_second(), Some(0)).unwrap();
    let second = TurnView::attach(&store, one_per_second(), Some(1)).unwrap();
    assert_eq!(store.subscriber_count(), 4);

    drop(first);
    assert_eq!(store.subscriber_count(), 2);

    second.detach();
    assert_eq!(store.subscriber_count(), 0);

    // The store keeps working without observers.
    store.dispatch(CounterAction::Add(1)).unwrap();
    assert_eq!(store.get_state().version(), 1);
}

#[tokio::test(start_paused = true)]
async fn zero_count_is_rejected() {
    let store = Store::<CounterReducer>::new(CounterState::default());
    let err = TurnView::attach(&store, RateLimitConfig::new(0, 1000), Some(0))
        .err()
        .unwrap();
    assert!(matches!(
        err,
        ViewError::Configuration(ConfigurationError::ZeroCapacity)
    ));
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn attach_outside_runtime_fails() {
    let store = Store::<CounterReducer>::new(CounterState::default());
    let err = TurnView::attach(&store, one_per_second(), Some(0))
        .err()
        .unwrap();
    assert!(matches!(err, ViewError::NoRuntime));
    assert_eq!(store.subscriber_count(), 0);
}

/// Stalls the first `Add` inside its `before` hook, holding the dispatch lock.
#[derive(Default)]
struct StallFirstAdd {
    stalled: AtomicBool,
}

impl Middleware<CounterReducer> for StallFirstAdd {
    fn name(&self) -> &'static str {
        "stall_first_add"
    }

    fn before(
        &self,
        action: &CounterAction,
        _state: &Snapshot<CounterState>,
    ) -> Result<(), DispatchError> {
        if matches!(action, CounterAction::Add(_)) && !self.stalled.swap(true, Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(200));
        }
        Ok(())
    }
}

#[test]
fn concurrent_acts_cannot_share_a_turn() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let _guard = runtime.enter();
    let middleware: Vec<Arc<dyn Middleware<CounterReducer>>> =
        vec![Arc::new(StallFirstAdd::default()), Arc::new(TurnAdvance)];
    let store = Store::with_middleware(CounterState::default(), middleware);
    let view = TurnView::attach(&store, one_per_second(), Some(0)).unwrap();

    let (first, second) = thread::scope(|scope| {
        let first = scope.spawn(|| view.act(CounterAction::Add(1)));
        let second = scope.spawn(|| {
            thread::sleep(Duration::from_millis(50));
            view.act(CounterAction::Add(100))
        });
        (first.join().unwrap(), second.join().unwrap())
    });

    assert_eq!(first.unwrap().version(), 1);
    assert!(matches!(
        second,
        Err(ViewError::Syncing { player: 0 }) | Err(ViewError::NotYourTurn { player: 0, .. })
    ));
    let state = store.get_state();
    assert_eq!(state.value, 1);
    assert_eq!(state.current_player, 1);
    assert_eq!(state.version(), 2);
}

#[test]
fn attach_seeds_after_in_flight_dispatch() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let _guard = runtime.enter();
    let middleware: Vec<Arc<dyn Middleware<CounterReducer>>> =
        vec![Arc::new(StallFirstAdd::default())];
    let store = Store::with_middleware(CounterState::default(), middleware);

    let view = thread::scope(|scope| {
        scope.spawn(|| store.dispatch(CounterAction::Add(1)).unwrap());
        thread::sleep(Duration::from_millis(50));
        TurnView::attach(&store, one_per_second(), Some(0)).unwrap()
    });

    // Seeded with the committed state, not the one the dispatch started from.
    assert_eq!(view.latest().version(), 1);
    assert_eq!(view.value().version(), 1);
    assert!(view.synced());
}
