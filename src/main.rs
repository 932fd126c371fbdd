//! Shovel Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Event, EventTarget, HtmlCanvasElement, KeyboardEvent};

    use shovel_run::platform::{
        self, InputEvent, Key, KeyValueStore, LocalStorage, MemoryStore, PointerTarget,
    };
    use shovel_run::renderer::CanvasRenderer;
    use shovel_run::{Game, GameError, GameMode, Language};

    /// Viewport width below which the touch layout is used
    const TOUCH_LAYOUT_MAX_WIDTH: f64 = 768.0;

    type Store = Box<dyn KeyValueStore>;

    struct Listener {
        target: EventTarget,
        kind: &'static str,
        closure: Closure<dyn FnMut(Event)>,
    }

    struct Session {
        game: Game<Store>,
        renderer: CanvasRenderer,
        /// Pending requestAnimationFrame id
        frame_id: Option<i32>,
        /// Set on teardown; an in-flight frame callback exits without rescheduling
        cancelled: bool,
        listeners: Vec<Listener>,
    }

    impl Session {
        fn teardown(&mut self) {
            self.cancelled = true;
            if let (Some(id), Some(window)) = (self.frame_id.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(id);
            }
            for listener in self.listeners.drain(..) {
                let _ = listener.target.remove_event_listener_with_callback(
                    listener.kind,
                    listener.closure.as_ref().unchecked_ref(),
                );
            }
            self.game.stop();
        }
    }

    thread_local! {
        static SESSION: RefCell<Option<Rc<RefCell<Session>>>> = const { RefCell::new(None) };
    }

    fn with_session(f: impl FnOnce(&mut Session)) {
        SESSION.with(|slot| {
            if let Some(session) = slot.borrow().as_ref() {
                f(&mut session.borrow_mut());
            }
        });
    }

    fn is_touch_layout(window: &web_sys::Window) -> bool {
        window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .is_some_and(|w| w < TOUCH_LAYOUT_MAX_WIDTH)
    }

    fn open_store() -> Store {
        match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{e}; high score will not survive a reload");
                Box::new(MemoryStore::new())
            }
        }
    }

    pub fn start() -> Result<(), GameError> {
        log::info!("Shovel Run starting...");

        let window = web_sys::window().ok_or(GameError::MissingElement("window"))?;
        let document = window
            .document()
            .ok_or(GameError::MissingElement("document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or(GameError::MissingElement("canvas"))?
            .dyn_into()
            .map_err(|_| GameError::MissingElement("canvas"))?;

        // A previous session (hot reload, remount) must not keep running
        stop_game();

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(open_store(), seed, &chrono::Local::now());
        game.set_touch_layout(is_touch_layout(&window));
        log::info!("Game initialized with seed: {}", seed);

        let mut renderer = CanvasRenderer::new(&canvas)?;
        renderer.load_assets()?;

        let session = Rc::new(RefCell::new(Session {
            game,
            renderer,
            frame_id: None,
            cancelled: false,
            listeners: Vec::new(),
        }));

        setup_input_handlers(&session, &window, &document, &canvas)?;
        request_animation_frame(&session)?;
        SESSION.with(|slot| *slot.borrow_mut() = Some(session));

        log::info!("Shovel Run running!");
        Ok(())
    }

    fn listen(
        session: &Rc<RefCell<Session>>,
        target: &EventTarget,
        kind: &'static str,
        mut handler: impl FnMut(&mut Session, &Event) + 'static,
    ) -> Result<(), GameError> {
        // Weak: the session owns its listeners
        let weak = Rc::downgrade(session);
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(session) = weak.upgrade() {
                handler(&mut session.borrow_mut(), &event);
            }
        });
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        session.borrow_mut().listeners.push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
        Ok(())
    }

    fn on_key(session: &mut Session, event: &Event, down: bool) {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let Some(key) = Key::from_code(&event.code()) else {
            return;
        };
        let input = if down {
            InputEvent::KeyDown(key)
        } else {
            InputEvent::KeyUp(key)
        };
        let handled = session.game.handle_input(input, platform::now_ms());
        if handled || key.blocks_scroll() {
            event.prevent_default();
        }
    }

    fn on_pointer(session: &mut Session, event: &Event, input: InputEvent) {
        if event.type_().starts_with("touch") {
            event.prevent_default();
        }
        session.game.handle_input(input, platform::now_ms());
    }

    fn setup_input_handlers(
        session: &Rc<RefCell<Session>>,
        window: &web_sys::Window,
        document: &web_sys::Document,
        canvas: &HtmlCanvasElement,
    ) -> Result<(), GameError> {
        // Keyboard
        listen(session, window, "keydown", |s, e| on_key(s, e, true))?;
        listen(session, window, "keyup", |s, e| on_key(s, e, false))?;

        // Playfield: click or tap to start / jump
        for kind in ["mousedown", "touchstart"] {
            listen(session, canvas, kind, |s, e| {
                on_pointer(s, e, InputEvent::PointerDown(PointerTarget::Playfield))
            })?;
        }

        // Optional on-screen fire button
        if let Some(button) = document.get_element_by_id("fire-button") {
            for kind in ["mousedown", "touchstart"] {
                listen(session, &button, kind, |s, e| {
                    on_pointer(s, e, InputEvent::PointerDown(PointerTarget::FireButton))
                })?;
            }
            for kind in ["mouseup", "touchend"] {
                listen(session, &button, kind, |s, e| {
                    on_pointer(s, e, InputEvent::PointerUp(PointerTarget::FireButton))
                })?;
            }
        }

        // Narrow viewports switch to the touch layout
        listen(session, window, "resize", |s, _| {
            if let Some(window) = web_sys::window() {
                s.game.set_touch_layout(is_touch_layout(&window));
            }
        })?;

        Ok(())
    }

    fn request_animation_frame(session: &Rc<RefCell<Session>>) -> Result<(), GameError> {
        let window = web_sys::window().ok_or(GameError::MissingElement("window"))?;
        let next = session.clone();
        let callback = Closure::once_into_js(move |timestamp: f64| {
            game_loop(next, timestamp);
        });
        let id = window.request_animation_frame(callback.unchecked_ref())?;
        session.borrow_mut().frame_id = Some(id);
        Ok(())
    }

    fn game_loop(session: Rc<RefCell<Session>>, timestamp: f64) {
        {
            let mut guard = session.borrow_mut();
            let s = &mut *guard;
            if s.cancelled {
                return;
            }
            s.frame_id = None;

            let now = platform::now_ms();
            if s.game.frame(timestamp, now) {
                let cmds = s.game.scene(&s.renderer.assets(), now);
                s.renderer.draw(&cmds);
            }
        }

        if let Err(e) = request_animation_frame(&session) {
            log::error!("Failed to schedule next frame: {e}");
        }
    }

    /// Switch between "classic" and "insane" (aliases "basic"/"advanced")
    #[wasm_bindgen]
    pub fn set_game_mode(mode: &str) {
        let Some(mode) = GameMode::from_str(mode) else {
            log::warn!("Unknown game mode: {mode}");
            return;
        };
        with_session(|s| s.game.set_mode(mode, platform::now_ms()));
    }

    #[wasm_bindgen]
    pub fn set_language(language: &str) {
        let Some(language) = Language::from_str(language) else {
            log::warn!("Unknown language: {language}");
            return;
        };
        with_session(|s| s.game.set_language(language));
    }

    /// Cancel the loop and detach every listener
    #[wasm_bindgen]
    pub fn stop_game() {
        let session = SESSION.with(|slot| slot.borrow_mut().take());
        if let Some(session) = session {
            session.borrow_mut().teardown();
            log::info!("Shovel Run stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }

    if let Err(e) = wasm_game::start() {
        log::error!("Failed to start: {e}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Shovel Run (native) starting...");
    log::info!("Native mode runs a headless autopilot - build for wasm32 to play in the browser");

    let mut args = std::env::args().skip(1);
    let mode = args
        .next()
        .and_then(|m| shovel_run::GameMode::from_str(&m))
        .unwrap_or_default();
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let score = autopilot_run(mode, seed);
    println!("{} run (seed {seed}) ended with score {score:05}", mode.as_str());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one run with the demo autopilot and return the final score
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_run(mode: shovel_run::GameMode, seed: u64) -> u64 {
    use shovel_run::consts::PLAYER_START_X;
    use shovel_run::platform::{InputEvent, Key, MemoryStore};
    use shovel_run::sim::autopilot::should_jump;

    /// Ten minutes of play at 60 Hz
    const MAX_STEPS: u32 = 36_000;
    /// Just over one step interval, so every refresh runs a step
    const REFRESH_MS: f64 = 17.0;

    let mut game = shovel_run::Game::new(MemoryStore::new(), seed, &chrono::Local::now());
    game.set_mode(mode, 0.0);

    let mut holding_right = false;
    for i in 0..MAX_STEPS {
        let now = i as f64 * REFRESH_MS;

        if should_jump(game.state()) {
            game.handle_input(InputEvent::KeyDown(Key::ArrowUp), now);
            game.handle_input(InputEvent::KeyUp(Key::ArrowUp), now);
        }

        // Lean against the drag in insane mode
        let behind = game.state().player.pos.x < PLAYER_START_X;
        if behind != holding_right {
            let event = if behind {
                InputEvent::KeyDown(Key::ArrowRight)
            } else {
                InputEvent::KeyUp(Key::ArrowRight)
            };
            game.handle_input(event, now);
            holding_right = behind;
        }

        game.frame(now, now);
        if game.state().is_over() {
            break;
        }
    }

    game.state().score
}
