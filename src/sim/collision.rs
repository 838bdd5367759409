//! Collision detection
//!
//! Everything in the game is a circle, so one primitive covers both the lethal
//! check (player vs obstacle) and the pickup check (player vs food). Sampling
//! is discrete per frame; fast movers can in principle tunnel.

use glam::Vec2;

/// True iff the circles strictly overlap (touching edges do not count)
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}
