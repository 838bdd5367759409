//! Entity model: player, obstacles and food
//!
//! Every entity embeds a [`Body`] (centre + radius). Per-kind behaviour lives
//! on the owning struct; rendering dispatches on [`EntityKind`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::circles_overlap;
use super::tick::TickInput;
use crate::clamp_to_bounds;

/// Which kind of entity a body belongs to (selects sprite and fallback colour)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Obstacle,
    Food,
}

/// Shared position/size state for every entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "entity radius must be positive");
        Self { pos, radius }
    }

    /// Strict circle overlap with another body
    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        circles_overlap(self.pos, self.radius, other.pos, other.radius)
    }
}

/// The player-controlled sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            body: Body::new(pos, radius),
        }
    }

    /// Apply one frame of held directions, clamping each axis to the canvas
    pub fn steer(&mut self, input: &TickInput, speed: f32, bounds: Vec2) {
        let r = self.body.radius;
        let pos = &mut self.body.pos;
        if input.up {
            pos.y = (pos.y - speed).max(r);
        }
        if input.down {
            pos.y = (pos.y + speed).min(bounds.y - r);
        }
        if input.left {
            pos.x = (pos.x - speed).max(r);
        }
        if input.right {
            pos.x = (pos.x + speed).min(bounds.x - r);
        }
    }

    /// Pull the player back inside after the canvas shrinks
    pub fn clamp_to(&mut self, bounds: Vec2) {
        self.body.pos = clamp_to_bounds(self.body.pos, self.body.radius, bounds);
    }
}

/// A bouncing hazard moving along a single axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub body: Body,
    pub vel: Vec2,
    /// Sprite rotation (radians), cosmetic only
    pub rotation: f32,
}

impl Obstacle {
    pub fn new(id: u32, pos: Vec2, radius: f32, vel: Vec2) -> Self {
        Self {
            id,
            body: Body::new(pos, radius),
            vel,
            rotation: 0.0,
        }
    }

    /// Move one frame and bounce off any edge touched along either axis
    pub fn advance(&mut self, bounds: Vec2, spin: f32) {
        self.body.pos += self.vel;
        self.rotation += spin;

        let r = self.body.radius;
        let pos = &mut self.body.pos;
        if pos.x - r <= 0.0 || pos.x + r >= bounds.x {
            self.vel.x = -self.vel.x;
            pos.x = pos.x.min(bounds.x - r).max(r);
        }
        if pos.y - r <= 0.0 || pos.y + r >= bounds.y {
            self.vel.y = -self.vel.y;
            pos.y = pos.y.min(bounds.y - r).max(r);
        }
    }
}

/// The single collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub body: Body,
    /// Phase offset for the sprite bob animation (radians)
    pub bob_phase: f32,
}

impl Food {
    pub fn new(pos: Vec2, radius: f32, bob_phase: f32) -> Self {
        Self {
            body: Body::new(pos, radius),
            bob_phase,
        }
    }

    /// Vertical sprite offset at wall-clock time `now_ms`
    pub fn bob_offset(&self, now_ms: f64, speed: f64, amplitude: f32) -> f32 {
        ((now_ms * speed + self.bob_phase as f64).sin() as f32) * amplitude
    }
}
