//! Collision tests for an axis-aligned ball box
//!
//! The ball occupies `[pos, pos + size]` on each axis for collision purposes.
//! There is no continuous detection: a ball fast enough to skip past a paddle
//! in one frame tunnels through it.

use super::state::{Ball, Paddle};

/// Ball touching the top or bottom wall
pub fn hits_vertical_wall(ball: &Ball, canvas_height: f32) -> bool {
    ball.pos.y <= 0.0 || ball.pos.y >= canvas_height - ball.size
}

/// Ball's vertical extent overlaps the paddle's
pub fn overlaps_paddle_span(ball: &Ball, paddle: &Paddle) -> bool {
    ball.pos.y + ball.size >= paddle.pos.y && ball.pos.y <= paddle.bottom()
}

/// Ball reached the left paddle's right face within its span
pub fn hits_left_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    ball.pos.x <= paddle.pos.x + paddle.width && overlaps_paddle_span(ball, paddle)
}

/// Ball reached the right paddle's left face within its span
pub fn hits_right_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    ball.pos.x + ball.size >= paddle.pos.x && overlaps_paddle_span(ball, paddle)
}

/// Ball left the field horizontally
pub fn is_out_of_bounds(ball: &Ball, canvas_width: f32) -> bool {
    ball.pos.x <= 0.0 || ball.pos.x >= canvas_width
}
