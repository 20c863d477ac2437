use serde::{Deserialize, Serialize};

use crate::mvi::State;
use crate::store::InvalidActionError;
use crate::turn::TurnState;

pub const WIDTH: usize = 5;
pub const HEIGHT: usize = 5;

/// Cells within this Chebyshev distance of a player are visible to them.
pub const SIGHT_RADIUS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Stone,
    Player(usize),
}

/// A cell as seen by one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sight {
    Unknown,
    Seen(Cell),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerState {
    /// Row-major cells, `WIDTH * HEIGHT` long.
    pub board: Vec<Cell>,
    pub players: Vec<String>,
    pub current_player: usize,
}

impl Default for ExplorerState {
    /// Player 0 starts top-left, player 1 bottom-right.
    fn default() -> Self {
        let mut board = vec![Cell::Empty; WIDTH * HEIGHT];
        board[0] = Cell::Player(0);
        board[WIDTH * HEIGHT - 1] = Cell::Player(1);
        Self {
            board,
            players: vec!["Player #1".to_string(), "Player #2".to_string()],
            current_player: 0,
        }
    }
}

fn to_pos(index: usize) -> (usize, usize) {
    (index % WIDTH, index / WIDTH)
}

impl ExplorerState {
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        self.board.get(y * WIDTH + x).copied()
    }

    /// `(x, y)` of `player`, if they are on the board.
    pub fn position_of(&self, player: usize) -> Option<(usize, usize)> {
        self.board
            .iter()
            .position(|cell| *cell == Cell::Player(player))
            .map(to_pos)
    }

    /// The board as `player` sees it: only cells around them are revealed.
    ///
    /// # Errors
    /// Returns `UnknownPlayer` for a player that is not seated or not on the board.
    pub fn visible_board(&self, player: usize) -> Result<Vec<Sight>, InvalidActionError> {
        let unknown = InvalidActionError::UnknownPlayer {
            player,
            players: self.players.len(),
        };
        if player >= self.players.len() {
            return Err(unknown);
        }
        let (px, py) = self.position_of(player).ok_or(unknown)?;

        Ok(self
            .board
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                let (x, y) = to_pos(index);
                if x.abs_diff(px) <= SIGHT_RADIUS && y.abs_diff(py) <= SIGHT_RADIUS {
                    Sight::Seen(*cell)
                } else {
                    Sight::Unknown
                }
            })
            .collect())
    }

    /// Empty cells next to `player` (including diagonals), row-major.
    pub fn open_neighbors(&self, player: usize) -> Vec<(usize, usize)> {
        let Some((px, py)) = self.position_of(player) else {
            return Vec::new();
        };
        self.board
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(index, _)| to_pos(index))
            .filter(|(x, y)| x.abs_diff(px) <= 1 && y.abs_diff(py) <= 1)
            .collect()
    }
}

impl State for ExplorerState {}

impl TurnState for ExplorerState {
    fn current_player(&self) -> usize {
        self.current_player
    }

    fn player_count(&self) -> usize {
        self.players.len()
    }
}
