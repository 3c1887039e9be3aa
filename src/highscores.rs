//! Best score across sessions
//!
//! A single scalar persisted in the host's key-value store.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::persistence::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    const STORAGE_KEY: &'static str = "star_catcher_high_score";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Only a strictly better score replaces the record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run's score. Returns true if it is a new best.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Read the stored best; missing or unreadable values count as 0
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<u64>(&json) {
                Ok(best) => {
                    log::info!("Loaded high score {best}");
                    return Self { best };
                }
                Err(e) => log::warn!("Ignoring stored high score {json:?}: {e}"),
            },
            Ok(None) => log::info!("No high score found, starting fresh"),
            Err(e) => log::warn!("Could not read high score: {e}"),
        }
        Self::default()
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        store.set(Self::STORAGE_KEY, &serde_json::to_string(&self.best)?)?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}
