//! Fog Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use fog_pong::audio::AudioManager;
    use fog_pong::engine::{GameEngine, connect_ui_callbacks};
    use fog_pong::layout::Chrome;
    use fog_pong::platform::web::{DomUi, LocalStore};
    use fog_pong::renderer::CanvasPainter;
    use fog_pong::sim::KeyCommand;

    /// Shared handles for the browser callbacks
    #[derive(Clone)]
    struct App {
        engine: Rc<RefCell<GameEngine>>,
        painter: Rc<RefCell<CanvasPainter>>,
        audio: Rc<RefCell<AudioManager>>,
        /// An animation frame is already requested
        frame_pending: Rc<Cell<bool>>,
    }

    impl App {
        /// Paint current state without advancing it
        fn render(&self) {
            let engine = self.engine.borrow();
            engine.render(&mut *self.painter.borrow_mut());
        }

        /// Run one loop iteration; reschedule unless paused
        fn run_frame(&self) {
            let (keep_going, events, volume) = {
                let mut engine = self.engine.borrow_mut();
                let (keep_going, events) = engine.frame(&mut *self.painter.borrow_mut());
                (keep_going, events, engine.settings().effective_volume())
            };

            {
                let mut audio = self.audio.borrow_mut();
                audio.set_volume(volume);
                audio.play_frame(&events);
            }

            if keep_going {
                self.schedule_frame();
            }
        }

        /// Request the next animation frame, at most one outstanding
        fn schedule_frame(&self) {
            if self.frame_pending.replace(true) {
                return;
            }
            let Some(window) = web_sys::window() else {
                self.frame_pending.set(false);
                return;
            };
            let app = self.clone();
            let closure = Closure::once(move |_time: f64| {
                app.frame_pending.set(false);
                app.run_frame();
            });
            let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
            closure.forget();
        }

        /// Fit the canvas element to the window
        fn resize(&self) {
            let Some(window) = web_sys::window() else { return };
            let document = window.document();
            let measure = |id: &str| -> f32 {
                document
                    .as_ref()
                    .and_then(|d| d.get_element_by_id(id))
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                    .map(|el| el.offset_height() as f32)
                    .unwrap_or(0.0)
            };
            let chrome = Chrome {
                header_height: measure("header"),
                info_height: measure("info"),
                ..Chrome::default()
            };

            let vw = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
            let vh = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;

            let (w, h) = {
                let mut engine = self.engine.borrow_mut();
                engine.set_chrome(chrome);
                engine.resize(vw, vh)
            };
            {
                let painter = self.painter.borrow();
                painter.canvas().set_width(w as u32);
                painter.canvas().set_height(h as u32);
            }
            self.render();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Fog Pong starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let painter = CanvasPainter::new(canvas).expect("no 2d context");

        let ui = DomUi::new(document.clone());
        let seed = js_sys::Date::now() as u64;
        let engine = GameEngine::new(seed, Box::new(LocalStore::new()), Box::new(ui.clone()));
        log::info!("Game initialized with seed: {}", seed);

        let app = App {
            engine: Rc::new(RefCell::new(engine)),
            painter: Rc::new(RefCell::new(painter)),
            audio: Rc::new(RefCell::new(AudioManager::new())),
            frame_pending: Rc::new(Cell::new(false)),
        };

        // One-off redraw when a level background finishes loading
        {
            let app_for_hook = app.clone();
            app.painter
                .borrow_mut()
                .set_redraw_hook(Rc::new(move || app_for_hook.render()));
        }

        let mut ui = ui;
        connect_ui_callbacks(&app.engine, &mut ui);
        // Breadcrumb clicks and reset change what is on screen while paused
        {
            let app = app.clone();
            document_click_redraw(&document, app);
        }

        setup_keyboard(app.clone());
        setup_resize(app.clone());
        setup_auto_pause(app.clone());

        app.resize();
        log::info!("Fog Pong ready - press Space to start");
    }

    fn document_click_redraw(document: &web_sys::Document, app: App) {
        // Runs after the element handlers in bubble order
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            if app.engine.borrow().is_paused() {
                app.render();
            }
        });
        let _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(app: App) {
        let window = web_sys::window().unwrap();

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let command = app
                    .engine
                    .borrow_mut()
                    .key_down(&event.code(), &event.key());
                match command {
                    Some(KeyCommand::TogglePause) => {
                        event.prevent_default();
                        if app.engine.borrow().is_paused() {
                            log::debug!("Paused from keyboard");
                        } else {
                            app.schedule_frame();
                        }
                    }
                    Some(KeyCommand::SetPaddleVelocity { .. }) => event.prevent_default(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if app.engine.borrow_mut().key_up(&event.key()).is_some() {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(app: App) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(app: App) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut engine = app.engine.borrow_mut();
                    if !engine.is_paused() {
                        engine.pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut engine = app.engine.borrow_mut();
                if !engine.is_paused() {
                    engine.pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Fog Pong (native) starting...");
    log::info!("The game runs in the browser - build for wasm32 and serve with `trunk serve`");

    println!("\nRunning headless attract loop...");
    headless_run(20_000);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the engine with paddles tracking the ball, re-serving on every pause
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(frames: u32) {
    use fog_pong::GameEngine;
    use fog_pong::consts::{GRID_COLS, GRID_ROWS, PADDLE_HEIGHT};
    use fog_pong::platform::{MemoryStore, RecordingUi};
    use fog_pong::renderer::RecordingPainter;

    let mut engine = GameEngine::new(
        1,
        Box::new(MemoryStore::new()),
        Box::new(RecordingUi::new()),
    );
    let mut painter = RecordingPainter::new();
    engine.resize(1280.0, 800.0);

    for _ in 0..frames {
        if engine.is_paused() {
            engine.toggle_pause();
        }
        let state = engine.state_mut();
        let target = state.ball.pos.y - PADDLE_HEIGHT / 2.0;
        for paddle in [&mut state.left, &mut state.right] {
            paddle.dy = (target - paddle.pos.y).clamp(-5.0, 5.0);
        }
        let (_, events) = engine.frame(&mut painter);
        if events.level_complete {
            println!("Level {} cleared", engine.current_level());
        }
    }

    println!(
        "✓ {} frames, level {}, {}/{} cells revealed",
        painter.frames(),
        engine.current_level(),
        engine.grid().revealed_count(),
        GRID_ROWS * GRID_COLS
    );
}
