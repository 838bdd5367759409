//! Per-frame session driver
//!
//! Wraps one [`GameState`] with the frame contract the shell relies on: a
//! frame without a drawable surface is skipped untouched, a lethal collision
//! reports the final score exactly once, and a stopped loop stays stopped.

use glam::Vec2;

use crate::renderer::{Sprites, Surface, draw_frame};
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// What a single frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No surface this frame; nothing advanced
    Skipped,
    /// Ticked and drew; session continues
    Running,
    /// Ticked into a lethal collision; the loop is now stopped
    GameOver(u64),
    /// Loop already ended (game over or teardown)
    Stopped,
}

/// One play-through from start to game over
#[derive(Debug)]
pub struct GameLoop {
    state: GameState,
    stopped: bool,
}

impl GameLoop {
    /// Start a fresh session at wall-clock `now_ms`
    pub fn start(seed: u64, bounds: Vec2, tuning: Tuning, now_ms: f64) -> Self {
        log::info!(
            "Session started ({}x{}, seed {})",
            bounds.x,
            bounds.y,
            seed
        );
        Self {
            state: GameState::new(seed, bounds, tuning, now_ms),
            stopped: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        !self.stopped
    }

    /// Run one frame: tick then draw
    pub fn frame<S: Surface>(
        &mut self,
        now_ms: f64,
        input: &TickInput,
        surface: Option<&mut S>,
        sprites: &Sprites<S::Image>,
    ) -> FrameOutcome {
        if self.stopped {
            return FrameOutcome::Stopped;
        }
        let Some(surface) = surface else {
            return FrameOutcome::Skipped;
        };

        tick(&mut self.state, input, now_ms);
        draw_frame(surface, &self.state, sprites, now_ms);

        let mut outcome = FrameOutcome::Running;
        for event in self.state.drain_events() {
            match event {
                GameEvent::GameOver { final_score } => {
                    self.stopped = true;
                    outcome = FrameOutcome::GameOver(final_score);
                }
                GameEvent::FoodCollected { pickup_score } => {
                    log::debug!("Food collected, pickup score {}", pickup_score);
                }
                GameEvent::ObstacleSpawned { .. } => {}
            }
        }
        outcome
    }

    /// Stop the loop early (leaving or restarting the session)
    pub fn teardown(&mut self) {
        if !self.stopped {
            log::info!(
                "Session torn down at score {}",
                self.state.score.total()
            );
            self.stopped = true;
        }
    }

    /// The canvas was resized
    pub fn resize(&mut self, bounds: Vec2) {
        self.state.resize(bounds);
    }
}
