//! Turn-synchronized state distribution for turn-based games.
//!
//! A [`Store`](store::Store) applies a pure reducer to dispatched actions and
//! broadcasts every new snapshot. The [`TurnAdvance`](middleware::TurnAdvance)
//! middleware follows each player action with a turn rotation, and a
//! [`TurnView`](view::TurnView) watches the store at two cadences (direct and
//! token-bucket throttled) to decide when its player may act.

pub mod config;
pub mod games;
pub mod logging;
pub mod middleware;
pub mod mvi;
pub mod rate_limit;
pub mod store;
pub mod turn;
pub mod view;
