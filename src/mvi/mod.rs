//! Model-View-Intent (MVI) primitives shared by every game.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ Store ──→ Views
//!    ↑                                        │
//!    └────────────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable snapshot of game data
//! - **Action**: Tagged description of an intended transition
//! - **Reducer**: Pure function that computes the next state

mod action;
mod reducer;
mod state;

pub use action::Action;
pub use reducer::{Reducer, Transition};
pub use state::State;
