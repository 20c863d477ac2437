//! Card combat: players spend attack cards to damage their opponent.

mod action;
mod reducer;
mod state;

pub use action::CombatAction;
pub use reducer::CombatReducer;
pub use state::{Card, CardFactory, CardKind, CombatState, Fighter, STARTING_HEALTH};
