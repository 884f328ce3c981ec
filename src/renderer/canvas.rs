//! `Painter` backed by a browser `CanvasRenderingContext2d`

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::Painter;

/// Callback fired once a background image finishes loading
pub type RedrawHook = Rc<dyn Fn()>;

pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    background: Option<HtmlImageElement>,
    background_src: String,
    on_loaded: Option<RedrawHook>,
    // Keeps the onload handler alive for the current image
    _onload: Option<Closure<dyn FnMut()>>,
}

impl CanvasPainter {
    /// Wrap the canvas' 2D context. Returns None if the context is unavailable.
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            background: None,
            background_src: String::new(),
            on_loaded: None,
            _onload: None,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Set the hook called when a newly requested background has loaded
    pub fn set_redraw_hook(&mut self, hook: RedrawHook) {
        self.on_loaded = Some(hook);
    }

    /// Start loading `asset` if it is not the current background
    fn ensure_background(&mut self, asset: &str) {
        if self.background_src == asset {
            return;
        }
        let Ok(image) = HtmlImageElement::new() else {
            log::warn!("Could not create image element for {}", asset);
            return;
        };
        let hook = self.on_loaded.clone();
        let src = asset.to_string();
        let onload = Closure::<dyn FnMut()>::new(move || {
            log::debug!("Background loaded: {}", src);
            if let Some(hook) = &hook {
                hook();
            }
        });
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        image.set_src(asset);

        // Detach the previous image before its handler is dropped
        if let Some(old) = &self.background {
            old.set_onload(None);
        }
        self.background = Some(image);
        self.background_src = asset.to_string();
        self._onload = Some(onload);
    }
}

impl Painter for CanvasPainter {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn draw_background(&mut self, asset: &str, width: f64, height: f64) -> bool {
        self.ensure_background(asset);
        let Some(image) = &self.background else {
            return false;
        };
        // A failed load never completes with a size; skip it silently
        if !image.complete() || image.natural_width() == 0 {
            return false;
        }
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, width, height)
            .is_ok()
    }

    fn fill_rect(&mut self, color: &str, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn fill_text(&mut self, text: &str, font: &str, color: &str, x: f64, y: f64) {
        self.ctx.set_fill_style_str(color);
        self.ctx.set_font(font);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.fill_text(text, x, y).ok();
    }
}
