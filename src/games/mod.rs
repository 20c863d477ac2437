//! Reducer-driven games built on the store.
//!
//! Each game is a feature module following the MVI layout:
//! - `state.rs` - Immutable game state and selectors
//! - `action.rs` - Player actions plus the turn-advance action
//! - `reducer.rs` - State transitions (pure, no side effects)
//!
//! Only the state transitions live here; win conditions are left to callers.

pub mod combat;
pub mod explorer;
pub mod tictactoe;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The games available to the demo runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    #[default]
    TicTacToe,
    Explorer,
    Combat,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::TicTacToe => "tictactoe",
            GameKind::Explorer => "explorer",
            GameKind::Combat => "combat",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tictactoe" => Ok(GameKind::TicTacToe),
            "explorer" => Ok(GameKind::Explorer),
            "combat" => Ok(GameKind::Combat),
            other => Err(format!(
                "unknown game '{other}' (expected tictactoe, explorer or combat)"
            )),
        }
    }
}
