//! Game state and core simulation types
//!
//! Entities are created once and repositioned in place; nothing here is
//! allocated per frame.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Which side of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A player paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (pixels per frame)
    pub dy: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            dy: 0.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }

    /// Apply velocity and keep the paddle inside the canvas
    pub fn advance(&mut self, canvas_height: f32) {
        self.pos.y += self.dy;
        self.clamp(canvas_height);
    }

    /// Clamp to `[0, canvas_height - height]`
    pub fn clamp(&mut self, canvas_height: f32) {
        let max_y = (canvas_height - self.height).max(0.0);
        self.pos.y = self.pos.y.clamp(0.0, max_y);
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }
}

impl Default for Paddle {
    fn default() -> Self {
        Self::new()
    }
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    /// Reference point: drawn centered here, bounced as the top-left of a `size` box
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(DEFAULT_CANVAS_WIDTH / 2.0, DEFAULT_CANVAS_HEIGHT / 2.0),
            vel: Vec2::splat(BALL_SPEED),
            size: BALL_SIZE,
        }
    }
}

/// Physics state for one level: canvas bounds, both paddles and the ball
#[derive(Debug, Clone)]
pub struct GameState {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    rng: Pcg32,
}

impl GameState {
    /// Create a state with the given RNG seed and canvas size
    pub fn new(seed: u64, canvas_width: f32, canvas_height: f32) -> Self {
        let mut state = Self {
            canvas_width,
            canvas_height,
            left: Paddle::new(),
            right: Paddle::new(),
            ball: Ball::default(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.position_paddles();
        state.reset_ball();
        state
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Center both paddles vertically, flush to their edges
    pub fn position_paddles(&mut self) {
        let y = self.canvas_height / 2.0 - PADDLE_HEIGHT / 2.0;
        self.left.pos = Vec2::new(0.0, y);
        self.right.pos = Vec2::new(self.canvas_width - self.right.width, y);
    }

    /// Put the ball at the canvas center with a random diagonal direction
    pub fn reset_ball(&mut self) {
        let sx = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let sy = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.ball.pos = Vec2::new(self.canvas_width / 2.0, self.canvas_height / 2.0);
        self.ball.vel = Vec2::new(sx * BALL_SPEED, sy * BALL_SPEED);
    }

    /// Adopt a new canvas size and re-seat the paddles
    pub fn set_canvas_size(&mut self, width: f32, height: f32) {
        self.canvas_width = width;
        self.canvas_height = height;
        self.position_paddles();
    }
}
