use serde::{Deserialize, Serialize};

use crate::mvi::State;
use crate::turn::TurnState;

pub const STARTING_HEALTH: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Attack,
}

impl CardKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            CardKind::Attack => "Attack",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CardKind::Attack => "Regular attack",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique across every hand in a game.
    pub id: u32,
    pub kind: CardKind,
    /// Damage dealt when played.
    pub value: u32,
}

/// Hands out cards with increasing ids.
#[derive(Debug, Default)]
pub struct CardFactory {
    last_id: u32,
}

impl CardFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attack(&mut self, value: u32) -> Card {
        self.last_id += 1;
        Card {
            id: self.last_id,
            kind: CardKind::Attack,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    pub name: String,
    pub health: u32,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    pub players: Vec<Fighter>,
    pub current_player: usize,
}

impl Default for CombatState {
    /// Two fighters with three 1-damage attack cards each.
    fn default() -> Self {
        let mut factory = CardFactory::new();
        let players = ["Player #1", "Player #2"]
            .into_iter()
            .map(|name| Fighter {
                name: name.to_string(),
                health: STARTING_HEALTH,
                cards: (0..3).map(|_| factory.attack(1)).collect(),
            })
            .collect();
        Self {
            players,
            current_player: 0,
        }
    }
}

impl CombatState {
    pub fn fighter(&self, index: usize) -> Option<&Fighter> {
        self.players.get(index)
    }

    /// Cards in `player`'s hand; empty for an unknown player.
    pub fn hand(&self, player: usize) -> &[Card] {
        self.players
            .get(player)
            .map(|f| f.cards.as_slice())
            .unwrap_or_default()
    }
}

impl State for CombatState {}

impl TurnState for CombatState {
    fn current_player(&self) -> usize {
        self.current_player
    }

    fn player_count(&self) -> usize {
        self.players.len()
    }
}
