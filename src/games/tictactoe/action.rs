use crate::mvi::Action;
use crate::turn::TurnAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicTacToeAction {
    /// Mark a cell for the current player.
    Select { row: usize, col: usize },
    AdvanceTurn,
}

impl Action for TicTacToeAction {
    fn name(&self) -> &'static str {
        match self {
            TicTacToeAction::Select { .. } => "select",
            TicTacToeAction::AdvanceTurn => "advance_turn",
        }
    }
}

impl TurnAction for TicTacToeAction {
    fn advance_turn() -> Self {
        TicTacToeAction::AdvanceTurn
    }

    fn is_advance_turn(&self) -> bool {
        matches!(self, TicTacToeAction::AdvanceTurn)
    }
}
