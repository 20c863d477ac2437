use crate::mvi::{Reducer, Transition};
use crate::store::InvalidActionError;
use crate::turn::TurnState;

use super::action::ExplorerAction;
use super::state::{Cell, ExplorerState, HEIGHT, WIDTH};

pub struct ExplorerReducer;

impl Reducer for ExplorerReducer {
    type State = ExplorerState;
    type Action = ExplorerAction;

    fn reduce(
        state: &Self::State,
        action: Self::Action,
    ) -> Result<Transition<Self::State>, InvalidActionError> {
        match action {
            ExplorerAction::Move { x, y } => {
                if x >= WIDTH || y >= HEIGHT {
                    return Err(InvalidActionError::PositionOutOfBounds {
                        x,
                        y,
                        width: WIDTH,
                        height: HEIGHT,
                    });
                }
                let player = state.current_player;
                let Some((from_x, from_y)) = state.position_of(player) else {
                    return Err(InvalidActionError::UnknownPlayer {
                        player,
                        players: state.players.len(),
                    });
                };
                if (from_x, from_y) == (x, y) {
                    return Ok(Transition::Unchanged);
                }
                let target = y * WIDTH + x;
                if state.board[target] != Cell::Empty {
                    return Err(InvalidActionError::CellOccupied { x, y });
                }

                let mut board = state.board.clone();
                board[from_y * WIDTH + from_x] = Cell::Empty;
                board[target] = Cell::Player(player);
                Ok(Transition::Next(ExplorerState {
                    board,
                    ..state.clone()
                }))
            }
            ExplorerAction::AdvanceTurn => Ok(Transition::Next(ExplorerState {
                current_player: state.next_player(),
                ..state.clone()
            })),
        }
    }
}
