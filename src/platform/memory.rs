//! In-memory platform implementations
//!
//! Used on native builds and in tests. Both types are cheap handles over
//! shared state so a test can keep a clone and inspect what the engine did.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{Celebration, KeyValueStore, LevelLinkCallback, ResetCallback, UiAdapter};

/// HashMap-backed store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// A call the engine made on its UI
#[derive(Debug, Clone, PartialEq)]
pub enum UiCall {
    LevelUnlocked { level: u32, unlocked: bool },
    LevelActive(u32),
    Popup { message: String, button_label: String },
    Celebrate(Celebration),
}

#[derive(Default)]
struct RecordingInner {
    calls: Vec<UiCall>,
    reset: Option<ResetCallback>,
    level_link: Option<LevelLinkCallback>,
}

/// UI that records every call and lets tests fire the registered callbacks
#[derive(Clone, Default)]
pub struct RecordingUi {
    inner: Rc<RefCell<RecordingInner>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<UiCall> {
        self.inner.borrow().calls.clone()
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    /// Number of celebration bursts fired
    pub fn celebrations(&self) -> usize {
        self.inner
            .borrow()
            .calls
            .iter()
            .filter(|c| matches!(c, UiCall::Celebrate(_)))
            .count()
    }

    /// Latest unlocked state reported for `level`
    pub fn is_unlocked(&self, level: u32) -> Option<bool> {
        self.inner.borrow().calls.iter().rev().find_map(|c| match c {
            UiCall::LevelUnlocked { level: l, unlocked } if *l == level => Some(*unlocked),
            _ => None,
        })
    }

    /// Latest highlighted level
    pub fn active_level(&self) -> Option<u32> {
        self.inner.borrow().calls.iter().rev().find_map(|c| match c {
            UiCall::LevelActive(level) => Some(*level),
            _ => None,
        })
    }

    /// Simulate a click on the reset control. Returns false if nothing is registered.
    pub fn click_reset(&self) -> bool {
        // Take the callback out so it may borrow the UI again
        let taken = self.inner.borrow_mut().reset.take();
        match taken {
            Some(mut callback) => {
                callback();
                self.inner.borrow_mut().reset.get_or_insert(callback);
                true
            }
            None => false,
        }
    }

    /// Simulate a click on a breadcrumb link
    pub fn click_level(&self, level: u32) -> bool {
        let taken = self.inner.borrow_mut().level_link.take();
        match taken {
            Some(mut callback) => {
                callback(level);
                self.inner.borrow_mut().level_link.get_or_insert(callback);
                true
            }
            None => false,
        }
    }

    fn record(&self, call: UiCall) {
        self.inner.borrow_mut().calls.push(call);
    }
}

impl UiAdapter for RecordingUi {
    fn set_level_unlocked(&mut self, level: u32, unlocked: bool) {
        self.record(UiCall::LevelUnlocked { level, unlocked });
    }

    fn set_level_active(&mut self, level: u32) {
        self.record(UiCall::LevelActive(level));
    }

    fn show_popup(&mut self, message: &str, button_label: &str) {
        self.record(UiCall::Popup {
            message: message.to_string(),
            button_label: button_label.to_string(),
        });
    }

    fn celebrate(&mut self, celebration: &Celebration) {
        self.record(UiCall::Celebrate(*celebration));
    }

    fn on_reset_requested(&mut self, callback: ResetCallback) {
        self.inner.borrow_mut().reset = Some(callback);
    }

    fn on_level_link_clicked(&mut self, callback: LevelLinkCallback) {
        self.inner.borrow_mut().level_link = Some(callback);
    }
}
