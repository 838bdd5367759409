//! High score leaderboard
//!
//! The game only ever hands a finished score to a [`HighScoreStore`]. The
//! built-in store keeps the top 10 in LocalStorage; [`FallbackStore`] puts a
//! remote store in front of it and quietly degrades to local on failure.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Store failures. None of these ever reach the simulation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score store unavailable: {0}")]
    Unavailable(String),
    #[error("high score data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    #[serde(rename = "player_name")]
    pub name: String,
    pub score: u64,
}

/// Anything that can list and record finished scores
pub trait HighScoreStore {
    /// Best scores first, at most `limit` of them
    fn list(&self, limit: usize) -> Result<Vec<HighScoreEntry>, StoreError>;
    /// Record a score. Returns the rank it reached (1-indexed), or `None`
    /// when it did not make the board and nothing was stored.
    fn save(&mut self, name: &str, score: u64) -> Result<Option<usize>, StoreError>;

    /// A user-facing message about degraded storage, taken once
    fn take_notice(&mut self) -> Option<String> {
        None
    }
}

/// Local top-10 leaderboard, sorted descending by score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalHighScores {
    entries: Vec<HighScoreEntry>,
}

impl LocalHighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "jegueReiHighScores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Decode a stored JSON list, re-sorting and trimming it
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let mut entries: Vec<HighScoreEntry> = serde_json::from_str(json)?;
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Ok(Self { entries })
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Insert a score, keeping ties in arrival order.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_score(&mut self, name: &str, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
        };

        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load high scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let Some(json) = crate::platform::storage::read(Self::STORAGE_KEY) else {
            log::info!("No high scores found, starting fresh");
            return Self::new();
        };
        match Self::from_json(&json) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Discarding stored high scores: {e}");
                Self::new()
            }
        }
    }

    /// Save high scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    fn persist(&self) -> Result<(), StoreError> {
        let json = self.to_json()?;
        crate::platform::storage::write(Self::STORAGE_KEY, &json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn persist(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

impl HighScoreStore for LocalHighScores {
    fn list(&self, limit: usize) -> Result<Vec<HighScoreEntry>, StoreError> {
        Ok(self.entries.iter().take(limit).cloned().collect())
    }

    fn save(&mut self, name: &str, score: u64) -> Result<Option<usize>, StoreError> {
        let rank = self.add_score(name, score);
        if rank.is_some() {
            self.persist()?;
        }
        Ok(rank)
    }
}

/// A primary store backed by the local leaderboard.
///
/// Failures are logged and remembered as a user-facing notice; `save` never
/// returns an error.
#[derive(Debug)]
pub struct FallbackStore<P> {
    primary: P,
    local: LocalHighScores,
    notice: Option<String>,
}

impl<P: HighScoreStore> FallbackStore<P> {
    pub fn new(primary: P, local: LocalHighScores) -> Self {
        Self {
            primary,
            local,
            notice: None,
        }
    }

    pub fn local(&self) -> &LocalHighScores {
        &self.local
    }
}

impl<P: HighScoreStore> HighScoreStore for FallbackStore<P> {
    fn list(&self, limit: usize) -> Result<Vec<HighScoreEntry>, StoreError> {
        self.primary
            .list(limit)
            .or_else(|e| {
                log::warn!("Primary high score list failed, using local: {e}");
                self.local.list(limit)
            })
    }

    fn save(&mut self, name: &str, score: u64) -> Result<Option<usize>, StoreError> {
        let e = match self.primary.save(name, score) {
            Ok(rank) => return Ok(rank),
            Err(e) => e,
        };
        log::warn!("Failed to save score to primary store: {e}");
        match self.local.save(name, score) {
            Ok(rank) => {
                self.notice = Some(format!(
                    "Failed to save score ({e}). Using local storage as fallback."
                ));
                Ok(rank)
            }
            Err(local_err) => {
                log::warn!("Local fallback save failed too: {local_err}");
                self.notice = Some(format!("Could not save score ({local_err})."));
                Ok(None)
            }
        }
    }

    fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}
