//! The game loop object
//!
//! `GameEngine` owns the simulation, the reveal grid, level progression and
//! pause state. Each animation frame runs `frame()`: one physics tick, one
//! grid reveal step, the completion check, then a render. The host keeps
//! scheduling frames while `frame()` returns true.

use std::cell::RefCell;
use std::rc::Rc;

use crate::consts::*;
use crate::layout::{Chrome, fit_canvas};
use crate::level_asset_path;
use crate::persistence::Progress;
use crate::platform::{Celebration, KeyValueStore, UiAdapter};
use crate::renderer::{FrameView, Painter, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameState, KeyCommand, RevealGrid, TickEvents, input, tick};

/// Message shown once when the game loads
pub const WELCOME_MESSAGE: &str =
    "Steer the ball over every tile to lift the fog. W/S and ↑/↓ move the paddles, Space starts and pauses.";
pub const WELCOME_BUTTON: &str = "Let's play";

/// Level progression state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelState {
    pub current_level: u32,
    pub progress: Progress,
    pub is_level_complete: bool,
}

/// Pause state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseState {
    pub is_paused: bool,
    pub show_play_symbol: bool,
}

impl Default for PauseState {
    fn default() -> Self {
        Self {
            is_paused: true,
            show_play_symbol: true,
        }
    }
}

/// Things that happened during a frame, for audio and logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEvents {
    pub tick: TickEvents,
    /// Cells revealed this frame
    pub cells_revealed: usize,
    /// The grid became fully revealed this frame
    pub level_complete: bool,
}

pub struct GameEngine {
    state: GameState,
    grid: RevealGrid,
    level: LevelState,
    pause: PauseState,
    settings: Settings,
    chrome: Chrome,
    background: String,
    store: Box<dyn KeyValueStore>,
    ui: Box<dyn UiAdapter>,
}

impl GameEngine {
    /// Build an engine, restore progress, and greet the player
    ///
    /// Starts paused on the highest level attempted.
    pub fn new(seed: u64, store: Box<dyn KeyValueStore>, ui: Box<dyn UiAdapter>) -> Self {
        let progress = Progress::load(&*store);
        let settings = Settings::load(&*store);
        let mut engine = Self {
            state: GameState::new(seed, DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT),
            grid: RevealGrid::new(),
            level: LevelState {
                current_level: progress.highest_level,
                progress,
                is_level_complete: false,
            },
            pause: PauseState::default(),
            settings,
            chrome: Chrome::default(),
            background: level_asset_path(progress.highest_level),
            store,
            ui,
        };
        engine.load_level(progress.highest_level);
        engine.ui.show_popup(WELCOME_MESSAGE, WELCOME_BUTTON);
        log::info!("Engine ready at level {}", engine.level.current_level);
        engine
    }

    // === Accessors ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable physics state, for hosts and tests that place entities directly
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn grid(&self) -> &RevealGrid {
        &self.grid
    }

    pub fn level(&self) -> &LevelState {
        &self.level
    }

    pub fn current_level(&self) -> u32 {
        self.level.current_level
    }

    pub fn highest_level_attempted(&self) -> u32 {
        self.level.progress.highest_level
    }

    pub fn is_level_complete(&self) -> bool {
        self.level.is_level_complete
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_paused
    }

    pub fn show_play_symbol(&self) -> bool {
        self.pause.show_play_symbol
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn set_chrome(&mut self, chrome: Chrome) {
        self.chrome = chrome;
    }

    // === Input ===

    /// Handle a key-down event
    pub fn key_down(&mut self, code: &str, key: &str) -> Option<KeyCommand> {
        let command = input::key_down(code, key)?;
        self.apply(command);
        Some(command)
    }

    /// Handle a key-up event
    pub fn key_up(&mut self, key: &str) -> Option<KeyCommand> {
        let command = input::key_up(key)?;
        self.apply(command);
        Some(command)
    }

    fn apply(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::TogglePause => self.toggle_pause(),
            KeyCommand::SetPaddleVelocity { side, dy } => {
                self.state.paddle_mut(side).dy = dy;
            }
            KeyCommand::ToggleSound => {
                self.settings.sound = !self.settings.sound;
                self.settings.save(&mut *self.store);
                log::info!("Sound {}", if self.settings.sound { "on" } else { "off" });
            }
        }
    }

    // === Pause state machine ===

    pub fn toggle_pause(&mut self) {
        if self.pause.is_paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Running -> Paused
    pub fn pause(&mut self) {
        if self.pause.is_paused {
            return;
        }
        self.pause.is_paused = true;
        self.pause.show_play_symbol = true;
        log::info!("Game paused");
    }

    /// Paused -> Running, advancing first if the level was just cleared
    pub fn resume(&mut self) {
        if !self.pause.is_paused {
            return;
        }
        if self.level.is_level_complete {
            let next = self.level.current_level.saturating_add(1).min(MAX_LEVEL);
            log::info!("Advancing to level {}", next);
            self.load_level(next);
        }
        self.pause.is_paused = false;
        self.pause.show_play_symbol = false;
        log::info!("Game resumed");
    }

    // === Frame loop ===

    /// Run one frame and paint it
    ///
    /// The flag is true while the host should schedule another frame.
    pub fn frame(&mut self, painter: &mut dyn Painter) -> (bool, FrameEvents) {
        let events = self.step();
        self.render(painter);
        (!self.pause.is_paused, events)
    }

    /// Advance one frame of game state without painting
    ///
    /// Does nothing while paused.
    pub fn step(&mut self) -> FrameEvents {
        let mut events = FrameEvents::default();
        if self.pause.is_paused {
            return events;
        }

        events.tick = tick(&mut self.state);
        if events.tick.ball_lost {
            log::debug!("Ball lost, re-serving");
            self.pause();
        }

        events.cells_revealed = self.advance_grid_reveal();

        if !self.level.is_level_complete && self.grid.is_complete() {
            self.complete_level();
            events.level_complete = true;
        }
        events
    }

    /// Reveal the cell under the ball. Returns the number of newly revealed cells.
    pub fn advance_grid_reveal(&mut self) -> usize {
        let ball = &self.state.ball;
        let Some((row, col)) = RevealGrid::cell_at(
            ball.pos.x,
            ball.pos.y,
            self.state.canvas_width,
            self.state.canvas_height,
        ) else {
            return 0;
        };
        usize::from(self.grid.reveal(row, col))
    }

    fn complete_level(&mut self) {
        log::info!("Level {} complete", self.level.current_level);
        self.pause();
        self.level.is_level_complete = true;
        if self.settings.effective_celebration() {
            self.ui.celebrate(&Celebration::default());
        }
    }

    /// Paint the current state
    pub fn render(&self, painter: &mut dyn Painter) {
        let view = FrameView {
            canvas_width: self.state.canvas_width,
            canvas_height: self.state.canvas_height,
            background: &self.background,
            grid: &self.grid,
            left: &self.state.left,
            right: &self.state.right,
            ball: &self.state.ball,
            paused: self.pause.is_paused,
            show_play_symbol: self.pause.show_play_symbol,
        };
        draw_frame(&view, painter);
    }

    // === Levels ===

    /// Enter level `n` with a fresh grid and ball, and persist progress
    pub fn load_level(&mut self, level: u32) {
        let level = level.clamp(1, MAX_LEVEL);
        self.level.current_level = level;
        self.level.progress.record_attempt(level);
        // A fresh grid is never complete
        self.level.is_level_complete = false;
        self.level.progress.save(&mut *self.store);

        self.refresh_navigator();

        self.background = level_asset_path(level);
        self.grid.reset();
        self.state.reset_ball();
        log::info!(
            "Loaded level {} (highest attempted {})",
            level,
            self.level.progress.highest_level
        );
    }

    /// Level picked from the breadcrumb. Locked levels are ignored.
    pub fn select_level(&mut self, level: u32) -> bool {
        if !self.level.progress.is_unlocked(level) {
            log::debug!("Level {} is locked", level);
            return false;
        }
        self.load_level(level);
        self.pause();
        true
    }

    /// Forget saved progress and restart from level 1
    pub fn reset_progress(&mut self) {
        Progress::clear(&mut *self.store);
        self.level.progress = Progress::default();
        self.load_level(1);
        self.pause();
        log::info!("Progress reset");
    }

    /// Sync the breadcrumb links with progress
    fn refresh_navigator(&mut self) {
        for n in 1..=NAVIGATOR_LEVELS {
            self.ui
                .set_level_unlocked(n, self.level.progress.is_unlocked(n));
        }
        self.ui.set_level_active(self.level.current_level);
    }

    // === Layout ===

    /// Fit the canvas to a new viewport and re-seat the paddles
    ///
    /// Returns the canvas size the host should apply to its element.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) -> (f32, f32) {
        let size = fit_canvas(viewport_width, viewport_height, &self.chrome);
        self.state.set_canvas_size(size.width, size.height);
        log::debug!("Canvas resized to {}x{}", size.width, size.height);
        (size.width, size.height)
    }
}

/// Route the UI's reset and breadcrumb events to a shared engine
pub fn connect_ui_callbacks(engine: &Rc<RefCell<GameEngine>>, ui: &mut dyn UiAdapter) {
    let for_reset = engine.clone();
    ui.on_reset_requested(Box::new(move || {
        for_reset.borrow_mut().reset_progress();
    }));
    let for_links = engine.clone();
    ui.on_level_link_clicked(Box::new(move |level| {
        for_links.borrow_mut().select_level(level);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::PROGRESS_KEY;
    use crate::platform::{MemoryStore, RecordingUi, UiCall};
    use crate::renderer::RecordingPainter;
    use crate::sim::Side;
    use glam::Vec2;

    fn engine_with(store: &MemoryStore, ui: &RecordingUi) -> GameEngine {
        GameEngine::new(7, Box::new(store.clone()), Box::new(ui.clone()))
    }

    fn engine() -> (GameEngine, MemoryStore, RecordingUi) {
        let store = MemoryStore::new();
        let ui = RecordingUi::new();
        (engine_with(&store, &ui), store, ui)
    }

    /// Park the ball mid-field, moving straight up and down, away from everything
    fn park_ball(engine: &mut GameEngine) {
        let state = engine.state_mut();
        state.ball.pos = Vec2::new(state.canvas_width / 2.0, state.canvas_height / 2.0);
        state.ball.vel = Vec2::new(0.0, 0.0);
    }

    fn reveal_all_but_one(engine: &mut GameEngine) {
        for r in 0..GRID_ROWS {
            for c in 0..GRID_COLS {
                if (r, c) != (0, 0) {
                    engine.grid.reveal(r, c);
                }
            }
        }
    }

    #[test]
    fn test_starts_paused_at_level_one() {
        let (engine, store, ui) = engine();
        assert!(engine.is_paused());
        assert!(engine.show_play_symbol());
        assert_eq!(engine.current_level(), 1);
        assert_eq!(engine.highest_level_attempted(), 1);
        assert_eq!(store.get(PROGRESS_KEY).as_deref(), Some("1"));
        assert_eq!(engine.background(), "assets/levels/level-1.png");
        assert!(ui.calls().iter().any(|c| matches!(c, UiCall::Popup { .. })));
        assert_eq!(ui.active_level(), Some(1));
        assert_eq!(ui.is_unlocked(1), Some(true));
        assert_eq!(ui.is_unlocked(2), Some(false));
    }

    #[test]
    fn test_restores_saved_progress() {
        let mut store = MemoryStore::new();
        store.set(PROGRESS_KEY, "3");
        let ui = RecordingUi::new();
        let engine = engine_with(&store, &ui);
        assert_eq!(engine.current_level(), 3);
        assert_eq!(engine.highest_level_attempted(), 3);
        assert_eq!(ui.is_unlocked(3), Some(true));
        assert_eq!(ui.is_unlocked(4), Some(false));
    }

    #[test]
    fn test_garbage_progress_defaults_to_one() {
        let mut store = MemoryStore::new();
        store.set(PROGRESS_KEY, "lots");
        let engine = engine_with(&store, &RecordingUi::new());
        assert_eq!(engine.current_level(), 1);
    }

    #[test]
    fn test_huge_saved_level_is_capped() {
        let mut store = MemoryStore::new();
        store.set(PROGRESS_KEY, &u32::MAX.to_string());
        let ui = RecordingUi::new();
        let mut engine = engine_with(&store, &ui);
        assert_eq!(engine.current_level(), MAX_LEVEL);
        assert_eq!(engine.highest_level_attempted(), MAX_LEVEL);
        // One unlock per breadcrumb link, one active marker, one popup
        assert_eq!(ui.calls().len(), NAVIGATOR_LEVELS as usize + 2);

        ui.clear();
        engine.load_level(u32::MAX);
        assert_eq!(engine.current_level(), MAX_LEVEL);
        assert_eq!(ui.calls().len(), NAVIGATOR_LEVELS as usize + 1);

        // Clearing the last level does not run past the cap
        engine.resume();
        for r in 0..GRID_ROWS {
            for c in 0..GRID_COLS {
                engine.grid.reveal(r, c);
            }
        }
        engine.step();
        assert!(engine.is_level_complete());
        engine.resume();
        assert_eq!(engine.current_level(), MAX_LEVEL);
        assert_eq!(store.get(PROGRESS_KEY), Some(MAX_LEVEL.to_string()));
    }

    #[test]
    fn test_space_toggles_pause() {
        let (mut engine, _, _) = engine();
        engine.key_down("Space", " ");
        assert!(!engine.is_paused());
        assert!(!engine.show_play_symbol());
        engine.key_down("Space", " ");
        assert!(engine.is_paused());
        assert!(engine.show_play_symbol());
    }

    #[test]
    fn test_keys_set_paddle_velocity() {
        let (mut engine, _, _) = engine();
        engine.key_down("KeyW", "w");
        assert_eq!(engine.state().paddle(Side::Left).dy, -PADDLE_SPEED);
        engine.key_up("w");
        assert_eq!(engine.state().paddle(Side::Left).dy, 0.0);
        engine.key_down("ArrowDown", "ArrowDown");
        assert_eq!(engine.state().paddle(Side::Right).dy, PADDLE_SPEED);
        engine.key_up("ArrowUp");
        assert_eq!(engine.state().paddle(Side::Right).dy, 0.0);
    }

    #[test]
    fn test_sound_toggle_is_persisted() {
        let (mut engine, store, _) = engine();
        assert!(engine.settings().sound);
        engine.key_down("KeyM", "m");
        assert!(!engine.settings().sound);
        assert!(!Settings::load(&store).sound);
    }

    #[test]
    fn test_paused_step_is_inert() {
        let (mut engine, _, _) = engine();
        let before = engine.state().ball.pos;
        let events = engine.step();
        assert_eq!(events, FrameEvents::default());
        assert_eq!(engine.state().ball.pos, before);
    }

    #[test]
    fn test_frame_reports_loop_continuation() {
        let (mut engine, _, _) = engine();
        let mut painter = RecordingPainter::new();
        let (keep_going, _) = engine.frame(&mut painter);
        assert!(!keep_going);
        assert_eq!(painter.frames(), 1);

        engine.resume();
        park_ball(&mut engine);
        let (keep_going, _) = engine.frame(&mut painter);
        assert!(keep_going);
        assert_eq!(painter.frames(), 2);
    }

    #[test]
    fn test_ball_lost_pauses_and_recenters() {
        let (mut engine, _, _) = engine();
        engine.resume();
        {
            let state = engine.state_mut();
            state.ball.pos = Vec2::new(2.0, 20.0);
            state.ball.vel = Vec2::new(-3.0, 3.0);
        }
        let events = engine.step();
        assert!(events.tick.ball_lost);
        assert!(engine.is_paused());
        let state = engine.state();
        assert_eq!(
            state.ball.pos,
            Vec2::new(state.canvas_width / 2.0, state.canvas_height / 2.0)
        );
        assert_eq!(state.ball.vel.x.abs(), BALL_SPEED);
        assert_eq!(state.ball.vel.y.abs(), BALL_SPEED);
    }

    #[test]
    fn test_reveal_follows_ball() {
        let (mut engine, _, _) = engine();
        engine.resume();
        park_ball(&mut engine);
        let events = engine.step();
        assert_eq!(events.cells_revealed, 1);
        // 800x450 canvas: center (400, 225) is in row 4, col 8
        assert!(engine.grid().is_revealed(4, 8));
        let events = engine.step();
        assert_eq!(events.cells_revealed, 0);
        assert!(engine.grid().is_revealed(4, 8));
    }

    #[test]
    fn test_completion_pauses_and_celebrates() {
        let (mut engine, _, ui) = engine();
        engine.resume();
        reveal_all_but_one(&mut engine);
        {
            let state = engine.state_mut();
            state.ball.pos = Vec2::new(20.0, 20.0);
            state.ball.vel = Vec2::ZERO;
        }
        let events = engine.step();
        assert!(events.level_complete);
        assert!(engine.is_paused());
        assert!(engine.is_level_complete());
        assert_eq!(ui.celebrations(), 1);
        assert_eq!(engine.current_level(), 1);
    }

    #[test]
    fn test_celebration_respects_reduced_motion() {
        let mut store = MemoryStore::new();
        Settings {
            reduced_motion: true,
            ..Default::default()
        }
        .save(&mut store);
        let ui = RecordingUi::new();
        let mut engine = engine_with(&store, &ui);
        engine.resume();
        for r in 0..GRID_ROWS {
            for c in 0..GRID_COLS {
                engine.grid.reveal(r, c);
            }
        }
        engine.step();
        assert!(engine.is_level_complete());
        assert_eq!(ui.celebrations(), 0);
    }

    #[test]
    fn test_resume_after_completion_advances() {
        let (mut engine, store, ui) = engine();
        engine.resume();
        reveal_all_but_one(&mut engine);
        engine.state_mut().ball.pos = Vec2::new(20.0, 20.0);
        engine.state_mut().ball.vel = Vec2::ZERO;
        engine.step();
        assert!(engine.is_level_complete());

        engine.key_down("Space", " ");
        assert!(!engine.is_paused());
        assert_eq!(engine.current_level(), 2);
        assert_eq!(engine.highest_level_attempted(), 2);
        assert!(!engine.is_level_complete());
        assert_eq!(engine.grid().revealed_count(), 0);
        assert_eq!(store.get(PROGRESS_KEY).as_deref(), Some("2"));
        assert_eq!(engine.background(), "assets/levels/level-2.png");
        assert_eq!(ui.active_level(), Some(2));
        assert_eq!(ui.is_unlocked(2), Some(true));
    }

    #[test]
    fn test_select_level_respects_lock() {
        let mut store = MemoryStore::new();
        store.set(PROGRESS_KEY, "3");
        let ui = RecordingUi::new();
        let mut engine = engine_with(&store, &ui);
        engine.resume();

        assert!(!engine.select_level(4));
        assert!(!engine.select_level(0));
        assert_eq!(engine.current_level(), 3);

        assert!(engine.select_level(1));
        assert_eq!(engine.current_level(), 1);
        assert!(engine.is_paused());
        // Replaying an earlier level keeps the high-water mark
        assert_eq!(engine.highest_level_attempted(), 3);
        assert_eq!(store.get(PROGRESS_KEY).as_deref(), Some("3"));
        assert_eq!(ui.active_level(), Some(1));
    }

    #[test]
    fn test_reset_progress() {
        let mut store = MemoryStore::new();
        store.set(PROGRESS_KEY, "5");
        let ui = RecordingUi::new();
        let mut engine = engine_with(&store, &ui);
        engine.reset_progress();
        assert_eq!(engine.current_level(), 1);
        assert_eq!(engine.highest_level_attempted(), 1);
        assert_eq!(store.get(PROGRESS_KEY).as_deref(), Some("1"));
        assert_eq!(ui.is_unlocked(2), Some(false));
        assert!(engine.is_paused());
    }

    #[test]
    fn test_resize_keeps_aspect_and_seats_paddles() {
        let (mut engine, _, _) = engine();
        let (w, h) = engine.resize(1000.0, 700.0);
        assert_eq!((w, h), (904.0, 508.0));
        let state = engine.state();
        assert_eq!(state.canvas_width, w);
        assert_eq!(state.canvas_height, h);
        assert_eq!(state.left.pos.x, 0.0);
        assert_eq!(state.right.pos.x, w - PADDLE_WIDTH);
        assert_eq!(state.left.pos.y, h / 2.0 - PADDLE_HEIGHT / 2.0);
    }

    #[test]
    fn test_ui_callbacks_drive_engine() {
        let store = MemoryStore::new();
        let mut ui = RecordingUi::new();
        let engine = Rc::new(RefCell::new(engine_with(&store, &ui)));
        connect_ui_callbacks(&engine, &mut ui);

        engine.borrow_mut().load_level(2);
        assert!(ui.click_level(1));
        assert_eq!(engine.borrow().current_level(), 1);

        assert!(ui.click_reset());
        assert_eq!(engine.borrow().highest_level_attempted(), 1);
        assert_eq!(store.get(PROGRESS_KEY).as_deref(), Some("1"));
    }
}
