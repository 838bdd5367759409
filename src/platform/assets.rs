//! Sprite loading progress
//!
//! Each sprite reports exactly once, loaded or failed. A failure still counts
//! as settled: the game draws a plain circle instead and never waits on it.

use crate::sim::EntityKind;

#[derive(Debug, Clone)]
pub struct AssetTracker {
    pending: Vec<EntityKind>,
    failed: Vec<EntityKind>,
}

impl AssetTracker {
    pub fn new(kinds: &[EntityKind]) -> Self {
        Self {
            pending: kinds.to_vec(),
            failed: Vec::new(),
        }
    }

    /// Record an outcome. Returns true when this report settled the last asset.
    pub fn report(&mut self, kind: EntityKind, ok: bool) -> bool {
        let Some(i) = self.pending.iter().position(|k| *k == kind) else {
            log::debug!("Duplicate load report for {:?} ignored", kind);
            return false;
        };
        self.pending.swap_remove(i);
        if !ok {
            log::warn!("Failed to load {:?} sprite, using plain circle", kind);
            self.failed.push(kind);
        }
        self.pending.is_empty()
    }

    pub fn is_ready(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn failed(&self) -> &[EntityKind] {
        &self.failed
    }
}
