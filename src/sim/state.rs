//! Game state and core simulation types
//!
//! One `GameState` is one session: everything the tick mutates lives here and
//! is dropped when the session ends. Only the final score leaves it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Food, Obstacle, Player};
use super::score::ScoreState;
use super::spawn::{SpawnCause, SpawnState, edge_launch, food_position, pick_edge};
use crate::clamp_to_bounds;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player hit an obstacle; terminal
    GameOver,
}

/// Something that happened during a tick, drained by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player ate the food; carries the new pickup score
    FoodCollected { pickup_score: u64 },
    /// A new obstacle entered the arena
    ObstacleSpawned { id: u32, cause: SpawnCause },
    /// Lethal collision; emitted once per session
    GameOver { final_score: u64 },
}

/// Complete simulation context for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    /// Canvas size (width, height) in pixels
    pub bounds: Vec2,
    /// Wall-clock session start (ms)
    pub started_at_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Live obstacles (spawn order, sorted by id)
    pub obstacles: Vec<Obstacle>,
    pub food: Food,
    pub spawn: SpawnState,
    pub score: ScoreState,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new session: player centred, food placed, no obstacles yet
    pub fn new(seed: u64, bounds: Vec2, tuning: Tuning, started_at_ms: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let food = Self::roll_food(&mut rng, bounds, &tuning);
        let spawn = SpawnState::new(started_at_ms, &tuning);
        Self {
            seed,
            rng,
            player: Player::new(bounds / 2.0, tuning.player_radius),
            tuning,
            bounds,
            started_at_ms,
            time_ticks: 0,
            phase: GamePhase::Playing,
            obstacles: Vec::new(),
            food,
            spawn,
            score: ScoreState::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    fn roll_food(rng: &mut Pcg32, bounds: Vec2, tuning: &Tuning) -> Food {
        let pos = food_position(rng, bounds, tuning.food_padding);
        let bob_phase = rng.random::<f32>() * std::f32::consts::TAU;
        Food::new(pos, tuning.food_radius, bob_phase)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Room left under the spawn cap
    pub fn can_spawn(&self) -> bool {
        self.obstacles.len() < self.tuning.max_obstacles
    }

    /// Add one obstacle at a random edge. Returns false when the cap is full.
    pub fn spawn_obstacle(&mut self, cause: SpawnCause) -> bool {
        if !self.can_spawn() {
            log::debug!("Spawn cap reached, skipping {:?} obstacle", cause);
            return false;
        }
        let edge = pick_edge(&mut self.rng);
        let (pos, vel) = edge_launch(
            &mut self.rng,
            edge,
            self.bounds,
            self.tuning.obstacle_radius,
            self.tuning.obstacle_speed,
        );
        let id = self.next_entity_id();
        self.obstacles
            .push(Obstacle::new(id, pos, self.tuning.obstacle_radius, vel));
        self.events.push(GameEvent::ObstacleSpawned { id, cause });
        log::debug!("Obstacle {} spawned ({:?}) from {:?}", id, cause, edge);
        true
    }

    /// Discard the current food and place a fresh one
    pub fn respawn_food(&mut self) {
        self.food = Self::roll_food(&mut self.rng, self.bounds, &self.tuning);
    }

    /// Canvas changed size: keep the player inside and re-roll food that no
    /// longer fits. Obstacles bounce back in on their next advance.
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
        self.player.clamp_to(bounds);

        let food = self.food.body;
        if clamp_to_bounds(food.pos, food.radius, bounds) != food.pos {
            log::debug!("Food at {} left the canvas, respawning", food.pos);
            self.respawn_food();
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
