//! Per-frame simulation tick
//!
//! One call advances the field by exactly one frame. There is no delta-time
//! scaling: velocities are pixels per frame.

use super::collision::{
    hits_left_paddle, hits_right_paddle, hits_vertical_wall, is_out_of_bounds,
};
use super::state::GameState;

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Ball bounced off the top or bottom wall
    pub wall_bounce: bool,
    /// Ball bounced off a paddle
    pub paddle_hit: bool,
    /// Ball left the field and was re-served
    pub ball_lost: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState) -> TickEvents {
    let mut events = TickEvents::default();

    let height = state.canvas_height;
    state.left.advance(height);
    state.right.advance(height);

    state.ball.pos += state.ball.vel;

    if hits_vertical_wall(&state.ball, height) {
        state.ball.vel.y = -state.ball.vel.y;
        events.wall_bounce = true;
    }

    // Velocity only, no positional correction
    if hits_left_paddle(&state.ball, &state.left) {
        state.ball.vel.x = -state.ball.vel.x;
        events.paddle_hit = true;
    }
    if hits_right_paddle(&state.ball, &state.right) {
        state.ball.vel.x = -state.ball.vel.x;
        events.paddle_hit = true;
    }

    if is_out_of_bounds(&state.ball, state.canvas_width) {
        state.reset_ball();
        events.ball_lost = true;
    }

    events
}
