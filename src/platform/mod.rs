//! Platform abstraction layer
//!
//! The engine talks to the page only through these seams:
//! - `KeyValueStore`: durable string storage (LocalStorage on web)
//! - `UiAdapter`: DOM collaborators (level breadcrumb, popup, reset button, confetti)
//!
//! Host implementations live in `memory`; browser ones in `web`.

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use memory::{MemoryStore, RecordingUi, UiCall};

/// Durable string key-value storage. All operations are best-effort.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Particle-burst parameters for the level-complete effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Celebration {
    pub particle_count: u32,
    /// Spread angle in degrees
    pub spread: f32,
    /// Origin as a fraction of the viewport
    pub origin: (f32, f32),
    pub duration_ms: u32,
}

impl Default for Celebration {
    fn default() -> Self {
        use crate::consts::*;
        Self {
            particle_count: CELEBRATION_PARTICLES,
            spread: CELEBRATION_SPREAD,
            origin: CELEBRATION_ORIGIN,
            duration_ms: CELEBRATION_DURATION_MS,
        }
    }
}

/// Callback invoked with the level number of a clicked breadcrumb link
pub type LevelLinkCallback = Box<dyn FnMut(u32)>;
/// Callback invoked when the reset control is used
pub type ResetCallback = Box<dyn FnMut()>;

/// Page elements surrounding the canvas
pub trait UiAdapter {
    /// Enable or disable the breadcrumb link for `level`
    fn set_level_unlocked(&mut self, level: u32, unlocked: bool);
    /// Highlight `level` as the one being played
    fn set_level_active(&mut self, level: u32);
    /// Show a modal message with a single dismiss button
    fn show_popup(&mut self, message: &str, button_label: &str);
    /// Fire the level-complete particle burst
    fn celebrate(&mut self, celebration: &Celebration);
    /// Register the reset control handler
    fn on_reset_requested(&mut self, callback: ResetCallback);
    /// Register the breadcrumb click handler
    fn on_level_link_clicked(&mut self, callback: LevelLinkCallback);
}
