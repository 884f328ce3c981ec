//! Painter that records calls instead of drawing
//!
//! Backs host-side tests and the native headless run.

use super::{FOG_COLOR, Painter};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    Background { asset: String, drawn: bool },
    Rect { color: String, x: f64, y: f64, w: f64, h: f64 },
    Text { text: String, font: String, color: String, x: f64, y: f64 },
}

impl DrawCommand {
    /// A fog cell
    pub fn is_fog(&self) -> bool {
        matches!(self, DrawCommand::Rect { color, .. } if color == FOG_COLOR)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingPainter {
    commands: Vec<DrawCommand>,
    /// Backgrounds reported as loaded
    loaded: Vec<String>,
    frames: u64,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `asset` finished loading
    pub fn mark_loaded(&mut self, asset: &str) {
        self.loaded.push(asset.to_string());
    }

    /// Commands since the last `clear`
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.commands.clone()
    }

    /// Number of frames painted
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Painter for RecordingPainter {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.clear();
        self.frames += 1;
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn draw_background(&mut self, asset: &str, _width: f64, _height: f64) -> bool {
        let drawn = self.loaded.iter().any(|a| a == asset);
        self.commands.push(DrawCommand::Background {
            asset: asset.to_string(),
            drawn,
        });
        drawn
    }

    fn fill_rect(&mut self, color: &str, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::Rect {
            color: color.to_string(),
            x,
            y,
            w,
            h,
        });
    }

    fn fill_text(&mut self, text: &str, font: &str, color: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            font: font.to_string(),
            color: color.to_string(),
            x,
            y,
        });
    }
}
