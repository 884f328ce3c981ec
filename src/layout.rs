//! Canvas fitting
//!
//! The play field is the largest 16:9 rectangle that fits the viewport once
//! page margins and the header/info chrome are taken out.

use crate::consts::{ASPECT_H, ASPECT_W};

/// Space reserved around the canvas (CSS pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chrome {
    /// Margin on every side (3em at 16px)
    pub margin: f32,
    /// Height of the header above the canvas
    pub header_height: f32,
    /// Height of the info line below the canvas
    pub info_height: f32,
}

impl Default for Chrome {
    fn default() -> Self {
        Self {
            margin: 48.0,
            header_height: 0.0,
            info_height: 0.0,
        }
    }
}

/// Canvas pixel size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    /// Smallest canvas ever produced: one pixel per grid cell
    pub const MIN: CanvasSize = CanvasSize {
        width: ASPECT_W,
        height: ASPECT_H,
    };
}

/// Fit a 16:9 canvas into the viewport minus chrome
///
/// Sizes are whole pixels, matching what the canvas element stores.
pub fn fit_canvas(viewport_width: f32, viewport_height: f32, chrome: &Chrome) -> CanvasSize {
    let available_w = viewport_width - chrome.margin * 2.0;
    let available_h =
        viewport_height - chrome.margin * 2.0 - chrome.header_height - chrome.info_height;

    if !(available_w >= CanvasSize::MIN.width && available_h >= CanvasSize::MIN.height) {
        return CanvasSize::MIN;
    }

    let aspect = ASPECT_W / ASPECT_H;
    let (width, height) = if available_w / available_h > aspect {
        (aspect * available_h, available_h)
    } else {
        (available_w, available_w / aspect)
    };
    CanvasSize {
        width: width.floor().max(CanvasSize::MIN.width),
        height: height.floor().max(CanvasSize::MIN.height),
    }
}
