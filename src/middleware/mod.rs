//! Stock middleware for turn-based stores.

mod journal;
mod turn_advance;

pub use journal::{ActionJournal, JournalEntry};
pub use turn_advance::TurnAdvance;
