//! Frame-driven simulation module
//!
//! Gameplay rules live here:
//! - One tick per animation frame, no delta-time scaling
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod input;
pub mod state;
pub mod tick;

pub use grid::{GRID_CELLS, RevealGrid};
pub use input::KeyCommand;
pub use state::{Ball, GameState, Paddle, Side};
pub use tick::{TickEvents, tick};
