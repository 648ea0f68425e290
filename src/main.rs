//! Asteroids Arcade entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use asteroids_arcade::Settings;
    use asteroids_arcade::renderer::{Align, Color, Font, Surface, draw_frame};
    use asteroids_arcade::sim::{GameEvent, GameState, Key, KeyEvent, TickInput, tick};

    /// 2D canvas implementation of the drawing surface
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        width: f64,
        height: f64,
    }

    impl Surface for CanvasSurface {
        fn clear(&mut self) {
            self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        }

        fn stroke_path(&mut self, points: &[Vec2], closed: bool, color: Color, line_width: f32) {
            let Some((first, rest)) = points.split_first() else {
                return;
            };
            let ctx = &self.ctx;
            ctx.save();
            ctx.set_stroke_style_str(color.as_css());
            ctx.set_line_width(line_width as f64);
            ctx.begin_path();
            ctx.move_to(first.x as f64, first.y as f64);
            for p in rest {
                ctx.line_to(p.x as f64, p.y as f64);
            }
            if closed {
                ctx.close_path();
            }
            ctx.stroke();
            ctx.restore();
        }

        fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            let ctx = &self.ctx;
            ctx.save();
            ctx.set_stroke_style_str(color.as_css());
            ctx.begin_path();
            if ctx
                .arc(
                    center.x as f64,
                    center.y as f64,
                    radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                )
                .is_ok()
            {
                ctx.stroke();
            }
            ctx.restore();
        }

        fn fill_text(&mut self, text: &str, pos: Vec2, font: Font, align: Align, color: Color) {
            let ctx = &self.ctx;
            ctx.save();
            ctx.set_fill_style_str(color.as_css());
            ctx.set_font(font.as_css());
            ctx.set_text_align(match align {
                Align::Left => "left",
                Align::Center => "center",
            });
            if let Err(e) = ctx.fill_text(text, pos.x as f64, pos.y as f64) {
                log::warn!("fill_text failed: {:?}", e);
            }
            ctx.restore();
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        surface: CanvasSurface,
        /// Input gathered between frames
        input: TickInput,
    }

    impl Game {
        /// Run one simulation step and draw it
        fn frame(&mut self, time: f64) {
            let input = std::mem::take(&mut self.input);
            tick(&mut self.state, &input, time);
            draw_frame(&self.state, &self.settings, &mut self.surface);

            for event in self.state.drain_events() {
                match event {
                    GameEvent::InstructionsHidden => set_instructions_visible(false),
                    GameEvent::InstructionsShown => set_instructions_visible(true),
                    GameEvent::GameOver { score } => log::info!("Game over, score {}", score),
                    GameEvent::LevelStarted { level } => log::info!("Level {}", level),
                    other => log::debug!("{:?}", other),
                }
            }
        }
    }

    fn set_instructions_visible(visible: bool) {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("instructions"))
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());

        match element {
            Some(el) => {
                let display = if visible { "" } else { "none" };
                if el.style().set_property("display", display).is_err() {
                    log::warn!("Could not toggle instructions overlay");
                }
            }
            None => log::warn!("No #instructions element"),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Asteroids starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas canvas");
            return;
        };

        let ctx = match canvas.get_context("2d") {
            Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
                Ok(ctx) => ctx,
                Err(_) => {
                    log::error!("2d context has the wrong type");
                    return;
                }
            },
            _ => {
                log::error!("Failed to get 2d context");
                return;
            }
        };

        let mut settings = Settings::load();
        settings.width = canvas.width() as f32;
        settings.height = canvas.height() as f32;
        let settings = settings.sanitized();
        settings.save();

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(settings.bounds(), seed),
            surface: CanvasSurface {
                ctx,
                width: settings.width as f64,
                height: settings.height as f64,
            },
            settings,
            input: TickInput::default(),
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_start_button(game.clone());

        request_animation_frame(game);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                    game.borrow_mut().input.keys.push(KeyEvent::down(key));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    game.borrow_mut().input.keys.push(KeyEvent::up(key));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("startBtn"))
        else {
            log::warn!("No #startBtn element");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            game.borrow_mut().input.start = true;
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        // rAF timestamps are monotonic, so they drive the scheduler directly
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    use asteroids_arcade::Settings;

    env_logger::init();
    log::info!("Asteroids (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from_path(Path::new(&path)),
        None => Settings::default(),
    };

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let state = run_headless(&settings, seed);

    match dump_state(&state) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize state: {}", e),
    }
}

/// Final state as pretty JSON; deserializes back into a resumable `GameState`
#[cfg(not(target_arch = "wasm32"))]
fn dump_state(state: &asteroids_arcade::sim::GameState) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(state)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is wasm_main
}

/// Play a demo session on a simulated 60 Hz clock
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(settings: &asteroids_arcade::Settings, seed: u64) -> asteroids_arcade::sim::GameState {
    use asteroids_arcade::consts::FRAME_MS;
    use asteroids_arcade::sim::{GameEvent, GamePhase, GameState, TickInput, demo_keys, tick};

    let mut state = GameState::new(settings.bounds(), seed);
    log::info!("Game initialized with seed: {}", seed);

    let mut now = 0.0;
    let mut input = TickInput {
        start: true,
        ..Default::default()
    };

    for _ in 0..settings.headless_frames {
        now += FRAME_MS;
        tick(&mut state, &input, now);

        for event in state.drain_events() {
            match event {
                GameEvent::LevelStarted { level } => log::info!("Level {}", level),
                GameEvent::ExtraLife { lives } => log::info!("Extra life ({} lives)", lives),
                other => log::debug!("{:?}", other),
            }
        }

        if state.phase == GamePhase::GameOver {
            break;
        }

        input = TickInput {
            start: false,
            keys: demo_keys(&state),
        };
    }

    log::info!(
        "Demo finished after {} frames: level {}, score {}",
        state.frame,
        state.level,
        state.ship.score
    );
    state
}
