//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - One tick per rendered frame, fixed pixel steps
//! - Seeded RNG only
//! - Stable iteration order (obstacles by spawn id)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::circles_overlap;
pub use entity::{Body, EntityKind, Food, Obstacle, Player};
pub use score::{ScoreState, elapsed_seconds};
pub use spawn::{Edge, SpawnCause, SpawnState, spawn_delay_ms};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
