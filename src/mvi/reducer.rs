//! Reducer trait for MVI architecture.

use super::action::Action;
use super::state::State;
use crate::store::InvalidActionError;

/// Outcome of a single reduction.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition<S> {
    /// The action does not affect this state; the store keeps the current data.
    Unchanged,
    /// The action produced a new state.
    Next(S),
}

impl<S> Transition<S> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Transition::Unchanged)
    }
}

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (&State, Action) -> State. Taking the state
/// by shared reference means it cannot be mutated in place.
pub trait Reducer: Send + Sync + 'static {
    /// The state type this reducer operates on.
    type State: State;

    /// The action type this reducer handles.
    type Action: Action;

    /// Process an action and return the transition.
    ///
    /// Actions that reference a nonexistent player, card or position are
    /// rejected with an [`InvalidActionError`] instead of corrupting state.
    fn reduce(
        state: &Self::State,
        action: Self::Action,
    ) -> Result<Transition<Self::State>, InvalidActionError>;
}
