//! Spawn controller
//!
//! Timed obstacle spawns follow a slow difficulty ramp: the gap between spawns
//! shrinks with elapsed time until it hits a floor. Placement is the same for
//! every spawn cause: pick an edge, start one radius in, head straight across.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Why an obstacle was added
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnCause {
    /// One-shot first obstacle shortly after start
    Opening,
    /// Regular schedule
    Timed,
    /// Bonus obstacle for eating the food
    Pickup,
}

/// Canvas edge an obstacle enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Unit direction pointing away from this edge, into the canvas
    pub fn inward(self) -> Vec2 {
        match self {
            Edge::Left => Vec2::X,
            Edge::Right => Vec2::NEG_X,
            Edge::Top => Vec2::Y,
            Edge::Bottom => Vec2::NEG_Y,
        }
    }
}

/// Timed spawn schedule (absolute wall-clock ms)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnState {
    pub next_spawn_at_ms: f64,
    pub current_delay_ms: f64,
    /// Pending one-shot first obstacle
    pub opening_spawn_at_ms: Option<f64>,
}

impl SpawnState {
    pub fn new(started_at_ms: f64, tuning: &Tuning) -> Self {
        Self {
            next_spawn_at_ms: started_at_ms + tuning.spawn_delay_initial_ms,
            current_delay_ms: tuning.spawn_delay_initial_ms,
            opening_spawn_at_ms: tuning.opening_spawn_delay_ms.map(|d| started_at_ms + d),
        }
    }

    /// Consume the opening spawn if it is due
    pub fn take_opening(&mut self, now_ms: f64) -> bool {
        match self.opening_spawn_at_ms {
            Some(at) if now_ms >= at => {
                self.opening_spawn_at_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn timed_spawn_due(&self, now_ms: f64) -> bool {
        now_ms >= self.next_spawn_at_ms
    }

    pub fn reschedule(&mut self, now_ms: f64, delay_ms: f64) {
        self.next_spawn_at_ms = now_ms + delay_ms;
        self.current_delay_ms = delay_ms;
    }
}

/// Delay until the next timed spawn given whole seconds survived.
///
/// Pure; non-increasing in `elapsed_secs` and never below the floor.
pub fn spawn_delay_ms(elapsed_secs: u64, tuning: &Tuning) -> f64 {
    let ramp = (elapsed_secs as f64 / tuning.spawn_rate_divisor) * tuning.spawn_rate_step_ms;
    (tuning.spawn_delay_initial_ms - ramp).max(tuning.spawn_delay_min_ms)
}

/// Uniform sample in `[lo, hi)`, collapsing to `lo` on an empty range
fn uniform_in<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo).max(0.0)
}

/// Pick an entry edge: horizontal vs vertical pair 50/50, then either side 50/50
pub fn pick_edge<R: Rng>(rng: &mut R) -> Edge {
    let horizontal = rng.random_bool(0.5);
    let first = rng.random_bool(0.5);
    match (horizontal, first) {
        (true, true) => Edge::Left,
        (true, false) => Edge::Right,
        (false, true) => Edge::Top,
        (false, false) => Edge::Bottom,
    }
}

/// Start position and velocity for an obstacle entering from `edge`
pub fn edge_launch<R: Rng>(rng: &mut R, edge: Edge, bounds: Vec2, radius: f32, speed: f32) -> (Vec2, Vec2) {
    let pos = match edge {
        Edge::Left => Vec2::new(radius, uniform_in(rng, radius, bounds.y - radius)),
        Edge::Right => Vec2::new(bounds.x - radius, uniform_in(rng, radius, bounds.y - radius)),
        Edge::Top => Vec2::new(uniform_in(rng, radius, bounds.x - radius), radius),
        Edge::Bottom => Vec2::new(uniform_in(rng, radius, bounds.x - radius), bounds.y - radius),
    };
    (pos, edge.inward() * speed)
}

/// Random food centre at least `padding` from every edge
pub fn food_position<R: Rng>(rng: &mut R, bounds: Vec2, padding: f32) -> Vec2 {
    Vec2::new(
        uniform_in(rng, padding, bounds.x - padding),
        uniform_in(rng, padding, bounds.y - padding),
    )
}
