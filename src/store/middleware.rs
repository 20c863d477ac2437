//! Interceptor contract for the dispatch pipeline.

use super::error::DispatchError;
use super::snapshot::Snapshot;
use super::Store;
use crate::mvi::Reducer;

/// Interceptor composed into a [`Store`] at construction time.
///
/// `before` hooks run in registration order ahead of the reducer and may
/// reject the action. `after` hooks run in reverse order once subscribers
/// have been notified and may dispatch follow-up actions on the same store
/// through [`Store::dispatch_follow_up`]. An `after` error is logged; the
/// action that triggered it stays committed.
pub trait Middleware<R: Reducer>: Send + Sync {
    fn name(&self) -> &'static str;

    fn before(
        &self,
        _action: &R::Action,
        _state: &Snapshot<R::State>,
    ) -> Result<(), DispatchError> {
        Ok(())
    }

    fn after(&self, _action: &R::Action, _store: &Store<R>) -> Result<(), DispatchError> {
        Ok(())
    }
}
