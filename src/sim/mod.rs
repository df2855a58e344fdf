//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{boxes_overlap, first_collision, player_hits_obstacle};
pub use difficulty::{Difficulty, DifficultyProfile};
pub use spawn::spawn;
pub use state::{GameState, Obstacle, ObstacleKind, Player};
pub use tick::{TickInput, TickOutcome, autopilot_target, tick};
