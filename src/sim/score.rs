//! Score accumulation

use serde::{Deserialize, Serialize};

/// Whole seconds since session start; clock skew before the start reads as 0
#[inline]
pub fn elapsed_seconds(started_at_ms: f64, now_ms: f64) -> u64 {
    ((now_ms - started_at_ms) / 1000.0).floor().max(0.0) as u64
}

/// Pickup points plus survival time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub pickup_score: u64,
    pub elapsed_secs: u64,
}

impl ScoreState {
    pub fn total(&self) -> u64 {
        self.pickup_score + self.elapsed_secs
    }

    /// HUD line, e.g. `Score: 12 (Gifts: 5 + Time: 7)`
    pub fn readout(&self) -> String {
        format!(
            "Score: {} (Gifts: {} + Time: {})",
            self.total(),
            self.pickup_score,
            self.elapsed_secs
        )
    }
}
