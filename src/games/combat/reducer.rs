use crate::mvi::{Reducer, Transition};
use crate::store::InvalidActionError;
use crate::turn::TurnState;

use super::action::CombatAction;
use super::state::CombatState;

pub struct CombatReducer;

impl Reducer for CombatReducer {
    type State = CombatState;
    type Action = CombatAction;

    fn reduce(
        state: &Self::State,
        action: Self::Action,
    ) -> Result<Transition<Self::State>, InvalidActionError> {
        match action {
            CombatAction::UseCard { card } => {
                let attacker = state.current_player;
                let victim = state.next_player();
                let unknown_player = |player| InvalidActionError::UnknownPlayer {
                    player,
                    players: state.players.len(),
                };
                let fighter = state
                    .players
                    .get(attacker)
                    .ok_or_else(|| unknown_player(attacker))?;
                if victim == attacker || victim >= state.players.len() {
                    return Err(unknown_player(victim));
                }
                let played = fighter
                    .cards
                    .iter()
                    .find(|c| c.id == card)
                    .ok_or(InvalidActionError::UnknownCard {
                        player: attacker,
                        card,
                    })?;
                let damage = played.value;

                let mut players = state.players.clone();
                players[attacker].cards.retain(|c| c.id != card);
                players[victim].health = players[victim].health.saturating_sub(damage);
                Ok(Transition::Next(CombatState {
                    players,
                    ..state.clone()
                }))
            }
            CombatAction::AdvanceTurn => Ok(Transition::Next(CombatState {
                current_player: state.next_player(),
                ..state.clone()
            })),
        }
    }
}
