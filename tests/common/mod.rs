//! Shared test utilities: a minimal turn-based counter game.

#![allow(dead_code, unused_imports)]

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use turnsync::mvi::{Action, Reducer, State, Transition};
use turnsync::store::InvalidActionError;
use turnsync::turn::{TurnAction, TurnState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterState {
    pub value: i64,
    pub players: usize,
    pub current_player: usize,
}

impl Default for CounterState {
    fn default() -> Self {
        Self {
            value: 0,
            players: 2,
            current_player: 0,
        }
    }
}

impl State for CounterState {}

impl TurnState for CounterState {
    fn current_player(&self) -> usize {
        self.current_player
    }

    fn player_count(&self) -> usize {
        self.players
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterAction {
    Add(i64),
    /// Recognized but has no effect on the state.
    Noop,
    /// Always rejected by the reducer.
    Fail,
    AdvanceTurn,
}

impl Action for CounterAction {
    fn name(&self) -> &'static str {
        match self {
            CounterAction::Add(_) => "add",
            CounterAction::Noop => "noop",
            CounterAction::Fail => "fail",
            CounterAction::AdvanceTurn => "advance_turn",
        }
    }
}

impl TurnAction for CounterAction {
    fn advance_turn() -> Self {
        CounterAction::AdvanceTurn
    }

    fn is_advance_turn(&self) -> bool {
        matches!(self, CounterAction::AdvanceTurn)
    }
}

pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Action = CounterAction;

    fn reduce(
        state: &CounterState,
        action: CounterAction,
    ) -> Result<Transition<CounterState>, InvalidActionError> {
        match action {
            CounterAction::Add(n) => Ok(Transition::Next(CounterState {
                value: state.value + n,
                ..state.clone()
            })),
            CounterAction::Noop => Ok(Transition::Unchanged),
            CounterAction::Fail => Err(InvalidActionError::UnknownPlayer {
                player: 99,
                players: state.players,
            }),
            CounterAction::AdvanceTurn => Ok(Transition::Next(CounterState {
                current_player: state.next_player(),
                ..state.clone()
            })),
        }
    }
}

/// Shared log a subscriber can append to.
pub type Log<T> = Arc<Mutex<Vec<T>>>;

pub fn log<T>() -> Log<T> {
    Arc::new(Mutex::new(Vec::new()))
}

/// Assert that `start.elapsed()` is `expected_ms`, within timer granularity.
pub fn assert_elapsed(start: Instant, expected_ms: u64) {
    let elapsed = start.elapsed();
    let expected = Duration::from_millis(expected_ms);
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(10),
        "expected ~{expected_ms}ms, got {elapsed:?}"
    );
}
