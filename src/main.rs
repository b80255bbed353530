//! Glow Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::convert::FromWasmAbi;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, EventTarget, HtmlCanvasElement, HtmlElement, HtmlInputElement,
        KeyboardEvent, MouseEvent, TouchEvent,
    };

    use glow_pong::Settings;
    use glow_pong::audio::AudioManager;
    use glow_pong::platform::{self, InputState, haptics};
    use glow_pong::renderer::{CanvasRenderer, Frame};
    use glow_pong::sim::{Field, GameState, tick};

    /// Game instance holding all state
    pub struct Game {
        pub state: GameState,
        settings: Settings,
        input: InputState,
        renderer: CanvasRenderer,
        audio: AudioManager,
        /// Jitter for the shake offset, kept apart from the simulation RNG
        fx_rng: Pcg32,
        scores_shown: Option<(u32, u32)>,
    }

    thread_local! {
        pub static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    impl Game {
        fn new(seed: u64, field: Field, settings: Settings, renderer: CanvasRenderer) -> Self {
            let mut state = GameState::with_field(seed, field);
            state.particles.set_capacity(settings.max_particles());
            let mut audio = AudioManager::new(seed ^ 0x5eed);
            audio.set_volume(settings.effective_volume());
            Self {
                state,
                settings,
                input: InputState::default(),
                renderer,
                audio,
                fx_rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
                scores_shown: None,
            }
        }

        fn frame(&mut self, now_ms: f64) {
            let input = self.input.take_tick_input(now_ms);
            tick(&mut self.state, &input);

            for event in self.state.take_events() {
                self.audio.play(&event);
                if self.settings.haptics {
                    haptics::vibrate(&event);
                }
            }

            let frame = Frame::capture(&self.state, &self.settings, &mut self.fx_rng);
            self.update_scores(frame.scores);
            self.renderer.render(&frame);
        }

        fn update_scores(&mut self, scores: (u32, u32)) {
            if self.scores_shown == Some(scores) {
                return;
            }
            self.scores_shown = Some(scores);
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("leftScore") {
                el.set_text_content(Some(&scores.0.to_string()));
            }
            if let Some(el) = document.get_element_by_id("rightScore") {
                el.set_text_content(Some(&scores.1.to_string()));
            }
        }

        fn set_sound(&mut self, enabled: bool) {
            self.settings.sound_enabled = enabled;
            self.audio.set_volume(self.settings.effective_volume());
            if enabled {
                self.audio.resume();
            } else {
                self.audio.suspend();
            }
            log::info!("Sound {}", if enabled { "on" } else { "off" });
        }

        fn set_volume(&mut self, volume: f32) {
            self.settings.volume = volume.clamp(0.0, 1.0);
            self.audio.set_volume(self.settings.effective_volume());
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Glow Pong starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::from_page(
            canvas.get_attribute("data-settings").as_deref(),
            canvas.get_attribute("data-quality").as_deref(),
        );

        let Some(renderer) = CanvasRenderer::new(&canvas) else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let field = Field {
            width: canvas.width() as f32,
            height: canvas.height() as f32,
        };
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, field, settings, renderer)));
        GAME.with(|slot| *slot.borrow_mut() = Some(game.clone()));

        log::info!("Game initialized with seed: {}", seed);

        setup_pointer_handlers(&canvas, game.clone());
        setup_touch_buttons(game.clone());
        setup_keyboard(game.clone());
        setup_toolbar(game.clone());
        setup_touch_visibility();

        request_animation_frame(game);

        log::info!("Glow Pong running!");
    }

    fn listen<E>(target: &EventTarget, kind: &str, handler: impl FnMut(E) + 'static)
    where
        E: FromWasmAbi + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Listener that may call `preventDefault` on touch events
    fn listen_active<E>(target: &EventTarget, kind: &str, handler: impl FnMut(E) + 'static)
    where
        E: FromWasmAbi + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        );
        closure.forget();
    }

    /// Client y to field y, accounting for CSS scaling of the canvas
    fn field_y(canvas: &HtmlCanvasElement, client_y: i32) -> f32 {
        let rect = canvas.get_bounding_client_rect();
        let scale = if rect.height() > 0.0 {
            canvas.height() as f64 / rect.height()
        } else {
            1.0
        };
        ((client_y as f64 - rect.top()) * scale) as f32
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let c = canvas.clone();
            listen(canvas, "mousemove", move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let height = g.state.field.height;
                g.input.set_pointer(field_y(&c, event.client_y()), height);
            });
        }
        {
            let game = game.clone();
            listen(canvas, "mouseleave", move |_event: MouseEvent| {
                game.borrow_mut().input.clear_pointer();
            });
        }
        {
            let game = game.clone();
            let c = canvas.clone();
            listen_active(canvas, "touchstart", move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if let Some(touch) = event.touches().get(0) {
                    let height = g.state.field.height;
                    g.input.set_pointer(field_y(&c, touch.client_y()), height);
                }
                g.audio.resume();
            });
        }
        {
            let game = game.clone();
            let c = canvas.clone();
            listen_active(canvas, "touchmove", move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let height = g.state.field.height;
                    g.input.set_pointer(field_y(&c, touch.client_y()), height);
                }
            });
        }
        {
            let game = game.clone();
            listen_active(canvas, "touchend", move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.clear_pointer();
            });
        }
        {
            let c = canvas.clone();
            listen(canvas, "click", move |_event: MouseEvent| {
                let _ = c.focus();
            });
        }
    }

    fn setup_touch_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for (id, up) in [("touchUp", true), ("touchDown", false)] {
            let Some(button) = document.get_element_by_id(id) else {
                log::warn!("Missing touch button #{}", id);
                continue;
            };
            let set_hold = {
                let game = game.clone();
                move |held: bool| {
                    let mut g = game.borrow_mut();
                    if up {
                        g.input.touch.up = held;
                    } else {
                        g.input.touch.down = held;
                    }
                    if held {
                        g.audio.resume();
                    }
                }
            };
            {
                let set_hold = set_hold.clone();
                listen_active(&button, "touchstart", move |event: TouchEvent| {
                    event.prevent_default();
                    set_hold(true);
                });
            }
            {
                let set_hold = set_hold.clone();
                listen(&button, "mousedown", move |_event: MouseEvent| set_hold(true));
            }
            {
                let set_hold = set_hold.clone();
                listen_active(&button, "touchend", move |event: TouchEvent| {
                    event.prevent_default();
                    set_hold(false);
                });
            }
            for kind in ["mouseup", "mouseleave"] {
                let set_hold = set_hold.clone();
                listen(&button, kind, move |_event: MouseEvent| set_hold(false));
            }
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        {
            let game = game.clone();
            listen(&window, "keydown", move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" => {
                        if !event.repeat() {
                            g.input.request_pause_toggle();
                        }
                    }
                    "ArrowUp" => g.input.keys.up = true,
                    "ArrowDown" => g.input.keys.down = true,
                    _ => return,
                }
                event.prevent_default();
            });
        }
        listen(&window, "keyup", move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.code().as_str() {
                "ArrowUp" => g.input.keys.up = false,
                "ArrowDown" => g.input.keys.down = false,
                _ => return,
            }
            event.prevent_default();
        });
    }

    fn setup_toolbar(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(toggle) = document.get_element_by_id("soundToggle") {
            let game = game.clone();
            let button = toggle.clone();
            listen(&toggle, "click", move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                let enabled = !g.settings.sound_enabled;
                g.set_sound(enabled);
                let _ = button.set_attribute("aria-pressed", if enabled { "true" } else { "false" });
            });
        }

        if let Some(volume) = document
            .get_element_by_id("volume")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            let game = game.clone();
            let input = volume.clone();
            listen(&volume, "input", move |_event: web_sys::Event| {
                match input.value().parse::<f32>() {
                    Ok(v) => game.borrow_mut().set_volume(v),
                    Err(_) => log::warn!("Ignoring volume value {:?}", input.value()),
                }
            });
        }

        if let Some(reset) = document.get_element_by_id("resetBtn") {
            listen(&reset, "click", move |_event: MouseEvent| {
                game.borrow_mut().input.request_reset();
            });
        }
    }

    fn setup_touch_visibility() {
        fn update() {
            let Some(window) = web_sys::window() else { return };
            let has_touch = js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart"))
                .unwrap_or(false)
                || window.navigator().max_touch_points() > 0;
            let width = window
                .inner_width()
                .ok()
                .and_then(|w| w.as_f64())
                .unwrap_or(0.0);
            let display = if platform::show_touch_controls(has_touch, width) {
                "flex"
            } else {
                "none"
            };
            if let Some(controls) = window
                .document()
                .and_then(|d| d.get_element_by_id("touchControls"))
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = controls.style().set_property("display", display);
            }
        }

        update();
        if let Some(window) = web_sys::window() {
            listen(&window, "resize", move |_event: web_sys::Event| update());
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// JSON snapshot of the running game, for the browser console
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn debug_state() -> String {
    wasm_game::GAME.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|game| game.borrow().state.debug_json())
            .unwrap_or_default()
    })
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn debug_shake(magnitude: f32, duration_ms: f32) {
    wasm_game::GAME.with(|slot| {
        if let Some(game) = slot.borrow().as_ref() {
            game.borrow_mut()
                .state
                .effects
                .trigger_shake(magnitude, duration_ms);
        }
    });
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn debug_flash(alpha: f32) {
    wasm_game::GAME.with(|slot| {
        if let Some(game) = slot.borrow().as_ref() {
            game.borrow_mut().state.effects.trigger_flash(alpha);
        }
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Glow Pong (native) starting...");
    log::info!("Native mode has no renderer - run with `trunk serve` for the web version");

    run_demo_match(60 * 60);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless match: the player paddle loosely follows the ball
#[cfg(not(target_arch = "wasm32"))]
fn run_demo_match(ticks: u32) {
    use glow_pong::sim::{GameEvent, GameState, TickInput, tick};

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut state = GameState::new(seed);
    let (mut hits, mut walls) = (0u32, 0u32);

    for _ in 0..ticks {
        let input = TickInput {
            pointer_y: Some(state.ball.pos.y),
            elapsed_ms: 16.0,
            ..Default::default()
        };
        tick(&mut state, &input);
        for event in state.take_events() {
            match event {
                GameEvent::PaddleHit { .. } => hits += 1,
                GameEvent::WallHit => walls += 1,
                _ => {}
            }
        }
    }

    log::info!(
        "Demo finished after {} ticks: {} - {} ({} paddle hits, {} wall hits)",
        state.time_ticks,
        state.match_state.left_score,
        state.match_state.right_score,
        hits,
        walls
    );
    println!(
        "Final score {} - {}",
        state.match_state.left_score, state.match_state.right_score
    );
}
