//! Poly Feast entry point
//!
//! Native: headless attract-mode runner. Browser: canvas + WebGPU game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use poly_feast::Settings;
    use poly_feast::audio::AudioManager;
    use poly_feast::consts::*;
    use poly_feast::platform::{InputLatch, Key, KeySnapshot};
    use poly_feast::renderer::{Framebuffer, GpuSurface, RenderSurface, draw_scene};
    use poly_feast::settings::CollisionStrategy;
    use poly_feast::sim::{GamePhase, GameState, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<GpuSurface>,
        /// CPU copy of each frame for pixel-probe collision
        probe: Option<Framebuffer>,
        audio: AudioManager,
        keys: KeySnapshot,
        latch: InputLatch,
        frame_dt: f32,
        accumulator: f32,
        last_time: f64,
        last_phase: GamePhase,
    }

    impl Game {
        fn new(settings: &Settings, seed: u64) -> Self {
            let probe = (settings.collision == CollisionStrategy::PixelProbe)
                .then(|| Framebuffer::new(settings.window_width, settings.window_height));
            Self {
                state: GameState::new(seed, settings),
                render_state: None,
                probe,
                audio: AudioManager::new(settings),
                keys: KeySnapshot::default(),
                latch: InputLatch::default(),
                frame_dt: settings.frame_dt(),
                accumulator: 0.0,
                last_time: 0.0,
                last_phase: GamePhase::Title,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.25);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= self.frame_dt && substeps < MAX_SUBSTEPS {
                let input = self.latch.sample(&mut self.keys);
                tick(&mut self.state, &input, self.frame_dt);
                if let Some(probe) = self.probe.as_mut() {
                    draw_scene(&self.state, probe);
                    self.state.resolve_with_probe(&*probe);
                }
                self.accumulator -= self.frame_dt;
                substeps += 1;
            }
            // Drop the backlog rather than spiral
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }

            let events = self.state.drain_events();
            self.audio.handle_events(&events);

            if self.state.phase != self.last_phase {
                log::debug!("Phase {:?} -> {:?}", self.last_phase, self.state.phase);
                self.last_phase = self.state.phase;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                draw_scene(&self.state, render_state);
                match render_state.present() {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            let prompts = [
                ("title-prompt", GamePhase::Title),
                ("game-over", GamePhase::GameOver),
                ("goodbye", GamePhase::Terminated),
            ];
            for (id, phase) in prompts {
                if let Some(el) = document.get_element_by_id(id) {
                    let class = if self.state.phase == phase { "" } else { "hidden" };
                    let _ = el.set_attribute("class", class);
                }
            }
            if self.state.phase == GamePhase::GameOver {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.state.score.to_string()));
                }
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Poly Feast starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let settings = Settings::default();
        let dpr = window.device_pixel_ratio();
        let width = (settings.window_width as f64 * dpr) as u32;
        let height = (settings.window_height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(&settings, seed)));
        log::info!(
            "Game initialized with seed {} ({} collision)",
            seed,
            settings.collision.as_str()
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = GpuSurface::new(surface, &adapter, width, height, settings.arena())
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone())?;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Poly Feast running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_dom_key(&event.key()) else {
                    return;
                };
                // Keep arrows and space from scrolling the page
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.keys.set(key, true);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    game.borrow_mut().keys.set(key, false);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur: key-up events are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                let closed = g.keys.closed;
                g.keys = KeySnapshot {
                    closed,
                    ..Default::default()
                };
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
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
        let terminated = {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                g.frame_dt
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
            g.state.phase == GamePhase::Terminated
        };

        if terminated {
            log::info!("Poly Feast stopped");
            return;
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use poly_feast::consts::DEMO_ROUNDS;
    use poly_feast::demo::DemoRunner;
    use poly_feast::platform::SleepClock;

    env_logger::init();

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load settings: {}", e);
            std::process::exit(1);
        }
    };
    let seed = settings.seed.unwrap_or_else(time_seed);

    log::info!(
        "Poly Feast (native) starting attract mode: seed {}, {} collision, {} rounds",
        seed,
        settings.collision.as_str(),
        DEMO_ROUNDS
    );

    let mut runner = DemoRunner::new(&settings, seed, DEMO_ROUNDS);
    let mut clock = SleepClock::new();
    let scores = runner.run(&mut clock);

    let best = scores.iter().copied().max().unwrap_or(0);
    log::info!("Attract mode finished: scores {:?}, best {}", scores, best);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Settings path from the first argument or `POLY_FEAST_CONFIG`
#[cfg(not(target_arch = "wasm32"))]
fn load_settings() -> poly_feast::Result<poly_feast::Settings> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("POLY_FEAST_CONFIG").ok());
    match path {
        Some(path) => poly_feast::Settings::load_from_path(path),
        None => Ok(poly_feast::Settings::default()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
