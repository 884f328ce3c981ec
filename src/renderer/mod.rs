//! Canvas 2D rendering module
//!
//! `draw_frame` is a pure function of the frame view: it issues drawing calls
//! on a `Painter` and never touches game state.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use recording::{DrawCommand, RecordingPainter};

use crate::consts::{GRID_COLS, GRID_ROWS};
use crate::sim::{Ball, Paddle, RevealGrid};

/// Fog over unrevealed cells
pub const FOG_COLOR: &str = "#443322";
pub const PADDLE_COLOR: &str = "white";
pub const BALL_GLYPH: &str = "🎾";
pub const BALL_FONT: &str = "20px Arial";
pub const PLAY_GLYPH: &str = "▶";
pub const PLAY_FONT: &str = "80px Arial";
pub const PLAY_COLOR: &str = "rgba(255, 255, 255, 0.8)";

/// Drawing surface
pub trait Painter {
    /// Clear the whole canvas
    fn clear(&mut self, width: f64, height: f64);
    /// Stretch the background image over the canvas.
    ///
    /// Returns false if the image has not finished loading; nothing is drawn then.
    fn draw_background(&mut self, asset: &str, width: f64, height: f64) -> bool;
    fn fill_rect(&mut self, color: &str, x: f64, y: f64, w: f64, h: f64);
    /// Text centered on `(x, y)`
    fn fill_text(&mut self, text: &str, font: &str, color: &str, x: f64, y: f64);
}

/// Everything a frame needs, borrowed from the engine
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub background: &'a str,
    pub grid: &'a RevealGrid,
    pub left: &'a Paddle,
    pub right: &'a Paddle,
    pub ball: &'a Ball,
    pub paused: bool,
    pub show_play_symbol: bool,
}

/// Paint one frame: background, fog, paddles, ball, play indicator
pub fn draw_frame(view: &FrameView<'_>, painter: &mut dyn Painter) {
    let w = view.canvas_width as f64;
    let h = view.canvas_height as f64;

    painter.clear(w, h);
    painter.draw_background(view.background, w, h);

    draw_fog(view, painter);

    for paddle in [view.left, view.right] {
        painter.fill_rect(
            PADDLE_COLOR,
            paddle.pos.x as f64,
            paddle.pos.y as f64,
            paddle.width as f64,
            paddle.height as f64,
        );
    }

    painter.fill_text(
        BALL_GLYPH,
        BALL_FONT,
        PADDLE_COLOR,
        view.ball.pos.x as f64,
        view.ball.pos.y as f64,
    );

    if view.paused && view.show_play_symbol {
        painter.fill_text(PLAY_GLYPH, PLAY_FONT, PLAY_COLOR, w / 2.0, h / 2.0);
    }
}

/// Opaque cell over every hidden grid cell, redrawn in full each frame
fn draw_fog(view: &FrameView<'_>, painter: &mut dyn Painter) {
    let cell_w = view.canvas_width as f64 / GRID_COLS as f64;
    let cell_h = view.canvas_height as f64 / GRID_ROWS as f64;
    for (row, col) in view.grid.iter_hidden() {
        painter.fill_rect(
            FOG_COLOR,
            col as f64 * cell_w,
            row as f64 * cell_h,
            cell_w,
            cell_h,
        );
    }
}
