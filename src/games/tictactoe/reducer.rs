use crate::mvi::{Reducer, Transition};
use crate::store::InvalidActionError;
use crate::turn::TurnState;

use super::action::TicTacToeAction;
use super::state::{Mark, TicTacToeState, SIZE};

pub struct TicTacToeReducer;

impl Reducer for TicTacToeReducer {
    type State = TicTacToeState;
    type Action = TicTacToeAction;

    fn reduce(
        state: &Self::State,
        action: Self::Action,
    ) -> Result<Transition<Self::State>, InvalidActionError> {
        match action {
            TicTacToeAction::Select { row, col } => {
                if row >= SIZE || col >= SIZE {
                    return Err(InvalidActionError::PositionOutOfBounds {
                        x: col,
                        y: row,
                        width: SIZE,
                        height: SIZE,
                    });
                }
                let index = row * SIZE + col;
                if state.board[index].is_some() {
                    return Err(InvalidActionError::CellOccupied { x: col, y: row });
                }
                let mut board = state.board;
                board[index] = Some(Mark::for_player(state.current_player));
                Ok(Transition::Next(TicTacToeState {
                    board,
                    ..state.clone()
                }))
            }
            TicTacToeAction::AdvanceTurn => Ok(Transition::Next(TicTacToeState {
                current_player: state.next_player(),
                ..state.clone()
            })),
        }
    }
}
