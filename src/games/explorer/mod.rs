//! Fog-of-war explorer: players roam a grid and only see their surroundings.

mod action;
mod reducer;
mod state;

pub use action::ExplorerAction;
pub use reducer::ExplorerReducer;
pub use state::{Cell, ExplorerState, Sight, HEIGHT, SIGHT_RADIUS, WIDTH};
