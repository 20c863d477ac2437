use crate::mvi::Action;
use crate::turn::TurnAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerAction {
    /// Relocate the current player to `(x, y)`.
    Move { x: usize, y: usize },
    AdvanceTurn,
}

impl Action for ExplorerAction {
    fn name(&self) -> &'static str {
        match self {
            ExplorerAction::Move { .. } => "move",
            ExplorerAction::AdvanceTurn => "advance_turn",
        }
    }
}

impl TurnAction for ExplorerAction {
    fn advance_turn() -> Self {
        ExplorerAction::AdvanceTurn
    }

    fn is_advance_turn(&self) -> bool {
        matches!(self, ExplorerAction::AdvanceTurn)
    }
}
