//! Turn-based extensions of the MVI traits.
//!
//! A turn-based game exposes whose turn it is and designates one action
//! kind that rotates the active player.

use crate::mvi::{Action, State};

/// State of a game where players act one at a time.
pub trait TurnState: State {
    /// Index of the player allowed to act.
    fn current_player(&self) -> usize;

    /// Number of seated players.
    fn player_count(&self) -> usize;

    /// Index of the player who acts after the current one.
    fn next_player(&self) -> usize {
        match self.player_count() {
            0 => 0,
            count => (self.current_player() + 1) % count,
        }
    }
}

/// Action set that contains a designated turn-advance action.
pub trait TurnAction: Action {
    /// The internal action that rotates the active player.
    fn advance_turn() -> Self;

    /// True for the turn-advance action itself.
    fn is_advance_turn(&self) -> bool;
}
