//! Progress persistence
//!
//! A single value survives between sessions: the highest level attempted,
//! stored as a decimal string. Anything missing or unreadable counts as level 1.

use crate::consts::MAX_LEVEL;
use crate::platform::KeyValueStore;

/// Storage key for the highest level attempted
pub const PROGRESS_KEY: &str = "fog_pong_highest_level";

/// Highest-level-attempted record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub highest_level: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self { highest_level: 1 }
    }
}

impl Progress {
    /// Parse a stored value, falling back to level 1 and capping at `MAX_LEVEL`
    pub fn parse(raw: Option<&str>) -> Self {
        let highest_level = raw
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&n| n >= 1)
            .map_or(1, |n| n.min(MAX_LEVEL));
        Self { highest_level }
    }

    /// Load from the store
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = store.get(PROGRESS_KEY);
        let progress = Self::parse(raw.as_deref());
        match raw {
            Some(_) => log::info!("Loaded progress: highest level {}", progress.highest_level),
            None => log::info!("No saved progress, starting at level 1"),
        }
        progress
    }

    /// Write to the store
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        store.set(PROGRESS_KEY, &self.highest_level.to_string());
        log::debug!("Progress saved (highest level {})", self.highest_level);
    }

    /// Forget saved progress
    pub fn clear(store: &mut dyn KeyValueStore) {
        store.remove(PROGRESS_KEY);
        log::info!("Saved progress cleared");
    }

    /// Raise the high-water mark. Returns true if it moved.
    pub fn record_attempt(&mut self, level: u32) -> bool {
        if level > self.highest_level {
            self.highest_level = level;
            true
        } else {
            false
        }
    }

    /// Levels up to the high-water mark are selectable
    pub fn is_unlocked(&self, level: u32) -> bool {
        level >= 1 && level <= self.highest_level
    }
}
