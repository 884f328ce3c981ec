//! Fog Pong - two-paddle Pong with a fog-of-war reveal grid
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (paddles, ball, collisions, reveal grid)
//! - `engine`: The game loop object tying simulation, levels and rendering together
//! - `renderer`: Canvas 2D drawing behind a `Painter` seam
//! - `platform`: Browser/host abstraction (storage, DOM collaborators)
//! - `persistence`: Highest-level-attempted progress record
//! - `layout`: 16:9 canvas fitting

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod engine;
pub mod layout;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use engine::GameEngine;
pub use persistence::Progress;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Paddle dimensions (pixels)
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Paddle speed while a key is held (pixels per frame)
    pub const PADDLE_SPEED: f32 = 5.0;

    /// Ball glyph size (pixels)
    pub const BALL_SIZE: f32 = 10.0;
    /// Per-axis ball speed after a reset (pixels per frame)
    pub const BALL_SPEED: f32 = 3.0;

    /// Reveal grid partition, independent of canvas pixel size
    pub const GRID_COLS: usize = 16;
    pub const GRID_ROWS: usize = 9;

    /// Canvas aspect ratio
    pub const ASPECT_W: f32 = 16.0;
    pub const ASPECT_H: f32 = 9.0;

    /// Canvas size used before the first resize
    pub const DEFAULT_CANVAS_WIDTH: f32 = 800.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 450.0;

    /// Number of links in the level breadcrumb
    pub const NAVIGATOR_LEVELS: u32 = 10;
    /// Highest level number accepted from storage or progression
    pub const MAX_LEVEL: u32 = 9999;

    /// Confetti burst fired on level completion
    pub const CELEBRATION_PARTICLES: u32 = 150;
    pub const CELEBRATION_SPREAD: f32 = 70.0;
    pub const CELEBRATION_ORIGIN: (f32, f32) = (0.5, 0.6);
    pub const CELEBRATION_DURATION_MS: u32 = 3000;
}

/// Background image for a level
pub fn level_asset_path(level: u32) -> String {
    format!("assets/levels/level-{}.png", level)
}
