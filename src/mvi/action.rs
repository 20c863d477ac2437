//! Base trait for actions dispatched to a store.

use std::fmt::Debug;

/// Actions represent:
/// - Player moves (select a cell, play a card)
/// - Internal bookkeeping (turn rotation)
///
/// Each action is consumed by exactly one reducer invocation.
pub trait Action: Clone + Debug + Send + Sync + 'static {
    /// Short kind name used in logs (`"select"`, `"advance_turn"`).
    fn name(&self) -> &'static str;
}
