//! Jegue Rei - A canvas arcade survival game
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (entities, collisions, spawning, score)
//! - `session`: Per-frame loop driver around the simulation
//! - `renderer`: Surface abstraction and frame drawing
//! - `platform`: Browser input, asset and viewport helpers
//! - `highscores`: Leaderboard store with local fallback
//! - `app`: Menu / play / game-over screen flow
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::{FallbackStore, HighScoreEntry, HighScoreStore, LocalHighScores, StoreError};
pub use session::{FrameOutcome, GameLoop};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Player circle radius (px)
    pub const PLAYER_RADIUS: f32 = 15.0;
    /// Player movement per frame per held direction (px)
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Obstacle circle radius (px)
    pub const OBSTACLE_RADIUS: f32 = 15.0;
    /// Obstacle speed along its single axis (px per frame)
    pub const OBSTACLE_SPEED: f32 = 3.0;
    /// Cosmetic spin per frame (radians)
    pub const OBSTACLE_SPIN_PER_FRAME: f32 = 0.02;
    /// Spawn cap for simultaneous obstacles
    pub const MAX_OBSTACLES: usize = 100;

    /// Food circle radius (px)
    pub const FOOD_RADIUS: f32 = 15.0;
    /// Food never spawns closer than this to a canvas edge
    pub const FOOD_PADDING: f32 = 30.0;
    /// Sprite bob amplitude (px)
    pub const FOOD_BOB_AMPLITUDE: f32 = 3.0;
    /// Sprite bob angular speed (radians per ms)
    pub const FOOD_BOB_SPEED: f64 = 0.05;
    /// Score awarded per food pickup
    pub const PICKUP_SCORE: u64 = 5;

    /// Delay between timed spawns at session start (ms)
    pub const SPAWN_DELAY_INITIAL_MS: f64 = 5000.0;
    /// Floor for the timed spawn delay (ms)
    pub const SPAWN_DELAY_MIN_MS: f64 = 1500.0;
    /// Elapsed seconds per difficulty step
    pub const SPAWN_RATE_DIVISOR: f64 = 20.0;
    /// Delay reduction per difficulty step (ms)
    pub const SPAWN_RATE_STEP_MS: f64 = 50.0;
    /// The first obstacle arrives this long after session start (ms)
    pub const OPENING_SPAWN_DELAY_MS: f64 = 2000.0;
}

/// Clamp a circle centre so the whole circle stays inside `[0, bounds]`.
///
/// If the bounds are smaller than the circle on an axis, the centre is
/// pinned to `radius` on that axis.
#[inline]
pub fn clamp_to_bounds(pos: Vec2, radius: f32, bounds: Vec2) -> Vec2 {
    let max = (bounds - Vec2::splat(radius)).max(Vec2::splat(radius));
    pos.clamp(Vec2::splat(radius), max)
}
