use serde::{Deserialize, Serialize};

use crate::mvi::State;
use crate::turn::TurnState;

/// Board side length.
pub const SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    O,
    X,
}

impl Mark {
    /// Player 0 plays `O`, everyone else `X`.
    pub fn for_player(player: usize) -> Self {
        if player == 0 {
            Mark::O
        } else {
            Mark::X
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeState {
    /// Row-major cells.
    pub board: [Option<Mark>; SIZE * SIZE],
    pub players: [String; 2],
    pub current_player: usize,
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self {
            board: [None; SIZE * SIZE],
            players: ["Player #1".to_string(), "Player #2".to_string()],
            current_player: 0,
        }
    }
}

impl TicTacToeState {
    pub fn cell(&self, row: usize, col: usize) -> Option<Mark> {
        if row >= SIZE || col >= SIZE {
            return None;
        }
        self.board[row * SIZE + col]
    }

    /// Empty cells as `(row, col)`, row-major.
    pub fn open_cells(&self) -> Vec<(usize, usize)> {
        self.board
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| (index / SIZE, index % SIZE))
            .collect()
    }
}

impl State for TicTacToeState {}

impl TurnState for TicTacToeState {
    fn current_player(&self) -> usize {
        self.current_player
    }

    fn player_count(&self) -> usize {
        self.players.len()
    }
}
