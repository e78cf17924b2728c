//! Rhythm Jumper entry point
//!
//! The browser build hosts the game on `<canvas id="canvas">` with a DOM HUD.
//! The native build plays the campaign headless on a virtual clock.

use std::cell::RefCell;
use std::rc::Rc;

use rhythm_jumper::session::{GameState, Outcome};
use rhythm_jumper::sim::GameEvent;
use rhythm_jumper::{Callbacks, EngineHandle, Level};

/// Campaign bookkeeping shared by the engine hooks and the host's handlers
#[derive(Clone)]
struct Session {
    state: Rc<RefCell<GameState>>,
    levels: Rc<Vec<Level>>,
    engine: Rc<RefCell<Option<EngineHandle>>>,
    on_update: Rc<dyn Fn(&GameState)>,
}

impl Session {
    fn new(levels: Vec<Level>, on_update: impl Fn(&GameState) + 'static) -> Self {
        Self {
            state: Rc::new(RefCell::new(GameState::new())),
            levels: Rc::new(levels),
            engine: Rc::new(RefCell::new(None)),
            on_update: Rc::new(on_update),
        }
    }

    fn first_level(&self) -> Level {
        self.levels.first().cloned().unwrap_or_default()
    }

    fn attach(&self, engine: EngineHandle) {
        *self.engine.borrow_mut() = Some(engine);
        self.state.borrow_mut().is_running = true;
        self.refresh();
    }

    fn callbacks(&self) -> Callbacks {
        Callbacks::new()
            .on_coin_collect(self.hook(GameEvent::CoinCollected))
            .on_life_lost(self.hook(GameEvent::LifeLost))
            .on_level_complete(self.hook(GameEvent::LevelComplete))
            .on_player_jump(|| log::trace!("jump"))
            .on_player_land(|| log::trace!("land"))
            .on_boss_hit(|| log::debug!("Boss hit"))
            .on_boss_defeated(|| log::info!("Boss defeated!"))
    }

    fn hook(&self, event: GameEvent) -> impl Fn() + 'static {
        let session = self.clone();
        move || session.handle(event)
    }

    fn handle(&self, event: GameEvent) {
        let outcome = self.state.borrow_mut().apply(event, self.levels.len());
        match outcome {
            Outcome::Continue | Outcome::ScoreChanged(_) => {}
            Outcome::NextLevel(index) => {
                if let Some(level) = self.levels.get(index) {
                    self.with_engine(|engine| {
                        engine.reset_level(level);
                        engine.start();
                    });
                }
            }
            Outcome::GameOver | Outcome::Victory => self.with_engine(EngineHandle::stop),
        }
        self.refresh();
    }

    /// Level 1, full lives, zero score
    fn restart(&self) {
        self.state.borrow_mut().restart();
        let level = self.first_level();
        self.with_engine(|engine| {
            engine.reset_level(&level);
            engine.start();
        });
        log::info!("Game restarted");
        self.refresh();
    }

    fn with_engine(&self, f: impl FnOnce(&EngineHandle)) {
        if let Some(engine) = self.engine.borrow().as_ref() {
            f(engine);
        }
    }

    fn refresh(&self) {
        (self.on_update)(&self.state.borrow());
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use rhythm_jumper::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use rhythm_jumper::level::campaign;
    use rhythm_jumper::platform::Host;
    use rhythm_jumper::platform::web::CanvasSurface;
    use rhythm_jumper::session::GameState;
    use rhythm_jumper::GameEngine;
    use web_sys::HtmlCanvasElement;

    use super::Session;

    fn set_text(document: &web_sys::Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Update HUD elements in DOM
    fn update_hud(state: &GameState) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        set_text(&document, "#hud-score .hud-value", &state.score.to_string());
        set_text(&document, "#hud-lives .hud-value", &state.lives.to_string());
        set_text(&document, "#hud-level .hud-value", &state.level.to_string());
        set_visible(&document, "game-over", state.game_over);
        set_visible(&document, "victory", state.victory);
        if state.is_over() {
            set_text(&document, "#final-score", &state.score.to_string());
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Rhythm Jumper starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Level coordinates are in playfield units
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);
        let surface = CanvasSurface::new(canvas);

        let host = Host::browser().ok_or("no browser host")?;
        let session = Session::new(campaign(), update_hud);
        let engine = GameEngine::new(&surface, &session.first_level(), session.callbacks(), host)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        session.attach(engine.handle());
        engine.start();
        setup_restart_key(&window, session);

        // The engine runs for the lifetime of the page
        std::mem::forget(engine);

        log::info!("Rhythm Jumper running!");
        Ok(())
    }

    /// R restarts the campaign
    fn setup_restart_key(window: &web_sys::Window, session: Session) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if matches!(event.key().as_str(), "r" | "R") {
                session.restart();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), wasm_bindgen::JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Rhythm Jumper (headless) starting...");

    if let Err(err) = headless::run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::rc::Rc;

    use glam::Vec2;
    use rhythm_jumper::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use rhythm_jumper::input::Key;
    use rhythm_jumper::level::campaign;
    use rhythm_jumper::platform::{Host, ManualKeys, ManualScheduler};
    use rhythm_jumper::renderer::RecordingSurface;
    use rhythm_jumper::{EngineError, GameEngine};

    use super::Session;

    /// Two virtual minutes at 60 fps
    const MAX_FRAMES: u32 = 60 * 120;
    /// Tap jump every half second
    const JUMP_EVERY: u32 = 30;

    /// Autopilot: hold right and hop regularly until the session ends or
    /// time runs out
    pub fn run() -> Result<(), EngineError> {
        let scheduler = Rc::new(ManualScheduler::new());
        let keys = Rc::new(ManualKeys::new());
        let surface = RecordingSurface::new(Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT));

        let session = Session::new(campaign(), |state| {
            log::debug!(
                "score {} lives {} level {}",
                state.score,
                state.lives,
                state.level
            );
        });
        let host = Host::new(scheduler.clone(), keys.clone());
        let engine = GameEngine::new(&surface, &session.first_level(), session.callbacks(), host)?;
        session.attach(engine.handle());
        engine.start();

        keys.press(Key::Right);
        let mut frames = 0;
        while frames < MAX_FRAMES && !session.state.borrow().is_over() {
            if frames % JUMP_EVERY == 0 {
                keys.tap(Key::Jump);
            }
            scheduler.step();
            frames += 1;
        }
        engine.cleanup();

        let state = session.state.borrow();
        println!(
            "Finished after {:.1}s: level {}, score {}, lives {}{}",
            f64::from(frames) / 60.0,
            state.level,
            state.score,
            state.lives,
            if state.victory {
                " (victory)"
            } else if state.game_over {
                " (game over)"
            } else {
                ""
            }
        );
        Ok(())
    }
}
