//! Browser implementations of the platform seams
//!
//! Expected page markup (all optional; missing pieces are logged and skipped):
//! - `#level-nav a[data-level]`: breadcrumb links, one per level
//! - `#popup`, `#popup-message`, `#popup-button`: modal message
//! - `#reset-progress`: reset control

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent, Storage};

use super::{Celebration, KeyValueStore, LevelLinkCallback, ResetCallback, UiAdapter};

// canvas-confetti is loaded by the page; fall back to nothing when it is absent
#[wasm_bindgen(inline_js = "
    export function fire_confetti(count, spread, origin_x, origin_y, duration_ms) {
        if (typeof window.confetti !== 'function') {
            return false;
        }
        const end = Date.now() + duration_ms;
        const burst = () => {
            window.confetti({
                particleCount: Math.max(1, Math.round(count / 10)),
                spread: spread,
                origin: { x: origin_x, y: origin_y },
            });
            if (Date.now() < end) {
                setTimeout(burst, 250);
            }
        };
        burst();
        return true;
    }
")]
extern "C" {
    fn fire_confetti(count: u32, spread: f32, origin_x: f32, origin_y: f32, duration_ms: u32) -> bool;
}

/// LocalStorage-backed store
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - progress will not be saved");
        }
        Self { storage }
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if storage.set_item(key, value).is_err() {
                log::warn!("Failed to write {}", key);
            }
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.remove_item(key);
        }
    }
}

/// DOM-backed UI collaborators
#[derive(Clone)]
pub struct DomUi {
    document: Document,
}

impl DomUi {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn level_link(&self, level: u32) -> Option<Element> {
        self.document
            .query_selector(&format!("#level-nav a[data-level=\"{}\"]", level))
            .ok()
            .flatten()
    }

    fn level_links(&self) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all("#level-nav a[data-level]") else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

impl UiAdapter for DomUi {
    fn set_level_unlocked(&mut self, level: u32, unlocked: bool) {
        let Some(link) = self.level_link(level) else {
            return;
        };
        let classes = link.class_list();
        if unlocked {
            let _ = classes.remove_1("locked");
            let _ = link.remove_attribute("aria-disabled");
        } else {
            let _ = classes.add_1("locked");
            let _ = link.set_attribute("aria-disabled", "true");
        }
    }

    fn set_level_active(&mut self, level: u32) {
        let wanted = level.to_string();
        for link in self.level_links() {
            let classes = link.class_list();
            if link.get_attribute("data-level").as_deref() == Some(wanted.as_str()) {
                let _ = classes.add_1("active");
            } else {
                let _ = classes.remove_1("active");
            }
        }
    }

    fn show_popup(&mut self, message: &str, button_label: &str) {
        let Some(popup) = self.document.get_element_by_id("popup") else {
            log::warn!("No #popup element; skipping message");
            return;
        };
        if let Some(el) = self.document.get_element_by_id("popup-message") {
            el.set_text_content(Some(message));
        }
        if let Some(button) = self.document.get_element_by_id("popup-button") {
            button.set_text_content(Some(button_label));
            let popup_clone = popup.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let _ = popup_clone.class_list().add_1("hidden");
            });
            let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        let _ = popup.class_list().remove_1("hidden");
    }

    fn celebrate(&mut self, celebration: &Celebration) {
        let fired = fire_confetti(
            celebration.particle_count,
            celebration.spread,
            celebration.origin.0,
            celebration.origin.1,
            celebration.duration_ms,
        );
        if !fired {
            log::debug!("Confetti library not loaded");
        }
    }

    fn on_reset_requested(&mut self, mut callback: ResetCallback) {
        let Some(button) = self.document.get_element_by_id("reset-progress") else {
            log::warn!("No #reset-progress element");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            event.prevent_default();
            callback();
        });
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_level_link_clicked(&mut self, callback: LevelLinkCallback) {
        let callback = std::rc::Rc::new(std::cell::RefCell::new(callback));
        for link in self.level_links() {
            let Some(level) = link
                .get_attribute("data-level")
                .and_then(|s| s.parse::<u32>().ok())
            else {
                continue;
            };
            let callback = callback.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                (&mut *callback.borrow_mut())(level);
            });
            let _ = link.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}
