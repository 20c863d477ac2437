//! Two-player tic-tac-toe.

mod action;
mod reducer;
mod state;

pub use action::TicTacToeAction;
pub use reducer::TicTacToeReducer;
pub use state::{Mark, TicTacToeState, SIZE};
