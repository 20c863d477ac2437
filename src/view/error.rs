use thiserror::Error;

use crate::rate_limit::ConfigurationError;
use crate::store::DispatchError;

/// Errors raised by a [`TurnView`](super::TurnView).
#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("No Tokio runtime available to drive the throttled subscription")]
    NoRuntime,

    #[error("Spectator views cannot act")]
    Spectator,

    /// The throttled subscription has not caught up with the latest state.
    #[error("Player {player} is still catching up with the latest state")]
    Syncing { player: usize },

    #[error("Player {player} cannot act: it is player {current}'s turn")]
    NotYourTurn { player: usize, current: usize },

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
