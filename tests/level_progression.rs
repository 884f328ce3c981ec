// Host integration tests for the `fog-pong` crate.
// These drive the engine through the public API only, with in-memory storage
// and a recording UI standing in for the browser.

use fog_pong::GameEngine;
use fog_pong::consts::{GRID_COLS, GRID_ROWS, PADDLE_HEIGHT};
use fog_pong::persistence::PROGRESS_KEY;
use fog_pong::platform::{KeyValueStore, MemoryStore, RecordingUi};
use fog_pong::renderer::RecordingPainter;
use glam::Vec2;

fn new_engine(store: &MemoryStore, ui: &RecordingUi) -> GameEngine {
    GameEngine::new(2024, Box::new(store.clone()), Box::new(ui.clone()))
}

/// Hold the ball still at the center of a cell and run a frame
fn visit_cell(engine: &mut GameEngine, painter: &mut RecordingPainter, row: usize, col: usize) -> bool {
    let state = engine.state_mut();
    let cell_w = state.canvas_width / GRID_COLS as f32;
    let cell_h = state.canvas_height / GRID_ROWS as f32;
    state.ball.pos = Vec2::new((col as f32 + 0.5) * cell_w, (row as f32 + 0.5) * cell_h);
    state.ball.vel = Vec2::ZERO;
    let (keep_going, _) = engine.frame(painter);
    keep_going
}

#[test]
fn clearing_level_one_unlocks_level_two() {
    let store = MemoryStore::new();
    let ui = RecordingUi::new();
    let mut engine = new_engine(&store, &ui);
    let mut painter = RecordingPainter::new();

    assert!(engine.is_paused());
    assert_eq!(engine.current_level(), 1);
    engine.key_down("Space", " ");
    assert!(!engine.is_paused());

    let total = GRID_ROWS * GRID_COLS;
    let mut visited = 0;
    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            let keep_going = visit_cell(&mut engine, &mut painter, row, col);
            visited += 1;
            assert!(engine.grid().is_revealed(row, col));
            if visited < total {
                assert!(keep_going, "paused early at ({}, {})", row, col);
                assert!(!engine.is_level_complete());
            } else {
                assert!(!keep_going);
            }
        }
    }

    assert!(engine.is_paused());
    assert!(engine.is_level_complete());
    assert_eq!(ui.celebrations(), 1);
    // Fully revealed frame paints no fog
    assert_eq!(painter.commands().iter().filter(|c| c.is_fog()).count(), 0);

    engine.key_down("Space", " ");
    assert!(!engine.is_paused());
    assert_eq!(engine.current_level(), 2);
    assert_eq!(engine.highest_level_attempted(), 2);
    assert_eq!(engine.grid().revealed_count(), 0);
    assert_eq!(store.get(PROGRESS_KEY).as_deref(), Some("2"));

    // Progress survives a reload
    let reloaded = new_engine(&store, &RecordingUi::new());
    assert_eq!(reloaded.current_level(), 2);
    assert_eq!(reloaded.highest_level_attempted(), 2);
}

#[test]
fn reset_restores_level_one_across_reload() {
    let mut store = MemoryStore::new();
    store.set(PROGRESS_KEY, "6");
    let ui = RecordingUi::new();
    let mut engine = new_engine(&store, &ui);
    assert_eq!(engine.current_level(), 6);

    engine.reset_progress();
    let reloaded = new_engine(&store, &RecordingUi::new());
    assert_eq!(reloaded.highest_level_attempted(), 1);
    assert_eq!(reloaded.current_level(), 1);
}

#[test]
fn highest_level_never_decreases() {
    let store = MemoryStore::new();
    let mut engine = new_engine(&store, &RecordingUi::new());
    let mut last = engine.highest_level_attempted();
    for level in [3, 1, 2, 5, 4, 1] {
        engine.load_level(level);
        let now = engine.highest_level_attempted();
        assert!(now >= last);
        assert_eq!(store.get(PROGRESS_KEY), Some(now.to_string()));
        last = now;
    }
    assert_eq!(last, 5);
}

#[test]
fn autopilot_reveal_is_monotone_and_paddles_stay_on_screen() {
    let store = MemoryStore::new();
    let mut engine = new_engine(&store, &RecordingUi::new());
    let mut painter = RecordingPainter::new();
    engine.resize(1280.0, 800.0);

    let mut revealed = 0;
    for _ in 0..3000 {
        if engine.is_paused() {
            if engine.is_level_complete() {
                break;
            }
            engine.toggle_pause();
        }
        let state = engine.state_mut();
        let target = state.ball.pos.y - PADDLE_HEIGHT / 2.0;
        for paddle in [&mut state.left, &mut state.right] {
            paddle.dy = (target - paddle.pos.y).clamp(-5.0, 5.0);
        }
        engine.frame(&mut painter);

        let count = engine.grid().revealed_count();
        assert!(count >= revealed);
        revealed = count;

        let state = engine.state();
        for paddle in [&state.left, &state.right] {
            assert!(paddle.pos.y >= 0.0);
            assert!(paddle.pos.y <= state.canvas_height - PADDLE_HEIGHT);
        }
    }
    assert!(revealed > 1);
}
