//! Deterministic game logic
//!
//! All gameplay lives here. This module must stay pure:
//! - Seeded RNG only
//! - No rendering or platform dependencies
//! - State changes only through `GameState` transition methods

pub mod state;
pub mod step;

pub use state::{Ball, Bounds, GameEvent, GamePhase, GameState};
pub use step::step;
