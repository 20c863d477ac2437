//! Automatic turn rotation after every player action.

use crate::mvi::{Action, Reducer};
use crate::store::{DispatchError, Middleware, Store};
use crate::turn::TurnAction;

/// Follows every player action with exactly one turn-advance dispatch.
///
/// The follow-up runs from the `after` hook, so subscribers observe it
/// strictly after the triggering action's own notification, and the
/// original `dispatch` call returns only once the turn has rotated.
/// Turn-advance actions never trigger another rotation. The rotation is a
/// follow-up dispatch, so `before` hooks cannot veto it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnAdvance;

impl<R> Middleware<R> for TurnAdvance
where
    R: Reducer,
    R::Action: TurnAction,
{
    fn name(&self) -> &'static str {
        "turn_advance"
    }

    fn after(&self, action: &R::Action, store: &Store<R>) -> Result<(), DispatchError> {
        if action.is_advance_turn() {
            return Ok(());
        }
        let rotated = store.dispatch_follow_up(R::Action::advance_turn())?;
        tracing::trace!(
            after = action.name(),
            version = rotated.version(),
            "Turn advanced"
        );
        Ok(())
    }
}
