use crate::mvi::Action;
use crate::turn::TurnAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatAction {
    /// Play a card from the current player's hand against the next player.
    UseCard { card: u32 },
    AdvanceTurn,
}

impl Action for CombatAction {
    fn name(&self) -> &'static str {
        match self {
            CombatAction::UseCard { .. } => "use_card",
            CombatAction::AdvanceTurn => "advance_turn",
        }
    }
}

impl TurnAction for CombatAction {
    fn advance_turn() -> Self {
        CombatAction::AdvanceTurn
    }

    fn is_advance_turn(&self) -> bool {
        matches!(self, CombatAction::AdvanceTurn)
    }
}
