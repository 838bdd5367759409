//! Game balance tuning
//!
//! Defaults come from [`crate::consts`]. A JSON override can be stored in
//! LocalStorage for playtesting different curves without a rebuild.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Why a tuning document was rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("minimum spawn delay {min}ms exceeds initial delay {initial}ms")]
    DelayOrder { min: f64, initial: f64 },
    #[error("food padding {padding} is smaller than the food radius {radius}")]
    FoodPadding { padding: f32, radius: f32 },
}

/// Tunable gameplay numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player_radius: f32,
    pub player_speed: f32,
    pub obstacle_radius: f32,
    pub obstacle_speed: f32,
    pub obstacle_spin: f32,
    pub max_obstacles: usize,
    pub food_radius: f32,
    pub food_padding: f32,
    pub pickup_score: u64,
    pub spawn_delay_initial_ms: f64,
    pub spawn_delay_min_ms: f64,
    pub spawn_rate_divisor: f64,
    pub spawn_rate_step_ms: f64,
    /// `None` disables the opening obstacle
    pub opening_spawn_delay_ms: Option<f64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            obstacle_radius: OBSTACLE_RADIUS,
            obstacle_speed: OBSTACLE_SPEED,
            obstacle_spin: OBSTACLE_SPIN_PER_FRAME,
            max_obstacles: MAX_OBSTACLES,
            food_radius: FOOD_RADIUS,
            food_padding: FOOD_PADDING,
            pickup_score: PICKUP_SCORE,
            spawn_delay_initial_ms: SPAWN_DELAY_INITIAL_MS,
            spawn_delay_min_ms: SPAWN_DELAY_MIN_MS,
            spawn_rate_divisor: SPAWN_RATE_DIVISOR,
            spawn_rate_step_ms: SPAWN_RATE_STEP_MS,
            opening_spawn_delay_ms: Some(OPENING_SPAWN_DELAY_MS),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("player_radius", self.player_radius as f64),
            ("player_speed", self.player_speed as f64),
            ("obstacle_radius", self.obstacle_radius as f64),
            ("obstacle_speed", self.obstacle_speed as f64),
            ("food_radius", self.food_radius as f64),
            ("max_obstacles", self.max_obstacles as f64),
            ("pickup_score", self.pickup_score as f64),
            ("spawn_rate_divisor", self.spawn_rate_divisor),
            ("spawn_delay_min_ms", self.spawn_delay_min_ms),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        let non_negative = [
            ("obstacle_spin", self.obstacle_spin as f64),
            ("spawn_rate_step_ms", self.spawn_rate_step_ms),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(TuningError::Negative { field, value });
            }
        }
        if let Some(delay) = self.opening_spawn_delay_ms {
            if delay < 0.0 {
                return Err(TuningError::Negative {
                    field: "opening_spawn_delay_ms",
                    value: delay,
                });
            }
        }
        if self.food_padding < self.food_radius {
            return Err(TuningError::FoodPadding {
                padding: self.food_padding,
                radius: self.food_radius,
            });
        }
        if self.spawn_delay_min_ms > self.spawn_delay_initial_ms {
            return Err(TuningError::DelayOrder {
                min: self.spawn_delay_min_ms,
                initial: self.spawn_delay_initial_ms,
            });
        }
        Ok(())
    }

    /// Smallest canvas side on which every entity range is non-empty
    pub fn min_canvas_side(&self) -> f32 {
        (4.0 * self.obstacle_radius)
            .max(2.0 * self.food_padding)
            .max(2.0 * self.player_radius)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "jegue_rei_tuning";

    /// Load a tuning override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let Some(json) = crate::platform::storage::read(Self::STORAGE_KEY) else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override from LocalStorage");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {e}");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
