//! Error types for dispatching actions.

use thiserror::Error;

/// Precondition violations detected by a reducer.
///
/// The reducer refuses the action and the canonical state stays untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidActionError {
    #[error("Player {player} does not exist ({players} seated)")]
    UnknownPlayer { player: usize, players: usize },

    #[error("Card {card} is not in player {player}'s hand")]
    UnknownCard { player: usize, card: u32 },

    #[error("Position ({x}, {y}) is outside the {width}x{height} board")]
    PositionOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Cell ({x}, {y}) is already occupied")]
    CellOccupied { x: usize, y: usize },
}

/// Errors returned by [`Store::dispatch`](super::Store::dispatch).
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The reducer rejected the action.
    #[error("Invalid action '{action}': {source}")]
    InvalidAction {
        action: &'static str,
        #[source]
        source: InvalidActionError,
    },

    /// A middleware refused the action before it reached the reducer.
    #[error("Middleware '{middleware}' rejected '{action}': {reason}")]
    Rejected {
        middleware: &'static str,
        action: &'static str,
        reason: String,
    },
}

impl DispatchError {
    /// The reducer error behind this failure, if any.
    pub fn invalid_action(&self) -> Option<&InvalidActionError> {
        match self {
            DispatchError::InvalidAction { source, .. } => Some(source),
            DispatchError::Rejected { .. } => None,
        }
    }
}
