//! Base trait for game state held by a store.

use std::fmt::Debug;

/// Marker trait for state objects.
///
/// States should be:
/// - Immutable (the store hands out shared snapshots, never `&mut`)
/// - Self-contained (all data needed to render a board)
/// - Comparable (PartialEq for reducer purity checks)
pub trait State: Clone + PartialEq + Debug + Send + Sync + 'static {}
