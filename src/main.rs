//! Mozzie Swat entry point
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
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use mozzie_swat::audio::{AudioManager, SoundEffect};
    use mozzie_swat::consts::*;
    use mozzie_swat::renderer::{RenderState, Viewport, scene};
    use mozzie_swat::sim::{GameEvent, GamePhase, GameState, TickInput, WorldBounds, tick};
    use mozzie_swat::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        audio: AudioManager,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Canvas size in CSS pixels, for pointer mapping
        css_viewport: Viewport,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// Best score this session
        best_score: u64,
    }

    impl Game {
        fn new(seed: u64, tuning: &Tuning, settings: Settings) -> Self {
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);
            Self {
                state: GameState::new(seed, tuning),
                settings,
                audio,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                css_viewport: Viewport::new(1.0, 1.0, tuning.bounds()),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                best_score: 0,
            }
        }

        fn world(&self) -> WorldBounds {
            self.state.bounds
        }

        fn set_css_size(&mut self, w: f32, h: f32) {
            self.css_viewport = Viewport::new(w, h, self.world());
        }

        /// Queue a click/tap at canvas-relative CSS pixels
        fn press(&mut self, x: f32, y: f32) {
            let world = self.css_viewport.screen_to_world(Vec2::new(x, y));
            if self.world().contains(world) {
                self.input.pointer = Some(world);
            }
            self.audio.resume();
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.pointer = None;
                self.input.pause = false;

                self.handle_events();
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn handle_events(&mut self) {
            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                match event {
                    GameEvent::MosquitoSwatted { score, .. } => {
                        self.best_score = self.best_score.max(score);
                    }
                    GameEvent::VictimStung { .. } => {
                        self.audio.play(SoundEffect::GameOver);
                    }
                    _ => {}
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = scene::build(&self.state, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
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

            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.best_score.to_string()));
            }

            if let Some(el) = document
                .query_selector("#hud-mosquitoes .hud-value")
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&format!(
                    "{}/{}",
                    self.state.mosquitoes.len(),
                    self.state.mosquitoes.capacity()
                )));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten()
                    {
                        val.set_text_content(Some(&self.fps.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            // Show/hide pause overlay
            if let Some(el) = document.get_element_by_id("pause-menu") {
                let class = if self.state.phase == GamePhase::Paused {
                    "panel"
                } else {
                    "panel hidden"
                };
                let _ = el.set_attribute("class", class);
            }

            // Show/hide game over
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Reset game state for restart
        fn restart(&mut self, seed: u64) {
            self.state.restart(seed);
            self.accumulator = 0.0;
            let autoplay = self.input.autoplay;
            self.input = TickInput {
                autoplay,
                ..Default::default()
            };
            log::info!("Game restarted with seed: {}", seed);
        }
    }

    /// Canvas-relative position of the first touch point
    fn touch_pos(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<(f32, f32)> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some((
            touch.client_x() as f32 - rect.left() as f32,
            touch.client_y() as f32 - rect.top() as f32,
        ))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Mozzie Swat starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = Tuning::builtin();
        let settings = Settings::load();

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, &tuning, settings)));
        game.borrow_mut()
            .set_css_size(client_w as f32, client_h as f32);

        log::info!("Game initialized with seed: {}", seed);

        // Without a GPU the simulation and HUD still run
        match RenderState::for_canvas(canvas.clone(), width, height, tuning.bounds()).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Renderer unavailable: {}", e),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());
        setup_auto_pause(game.clone());
        setup_resize(&canvas, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Mozzie Swat running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click - swat or poke
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .press(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some((x, y)) = touch_pos(&canvas_clone, &event) {
                    game.borrow_mut().press(x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Escape" | "p" | "P" => g.input.pause = true,
                    "r" | "R" => g.restart(js_sys::Date::now() as u64),
                    "i" | "I" => {
                        g.input.autoplay = !g.input.autoplay;
                        log::info!("Autoplay: {}", g.input.autoplay);
                    }
                    "f" | "F" => {
                        g.settings.show_fps = !g.settings.show_fps;
                        g.settings.save();
                    }
                    "m" | "M" => {
                        g.settings.muted = !g.settings.muted;
                        let settings = g.settings.clone();
                        g.audio.apply_settings(&settings);
                        g.settings.save();
                        log::info!("Muted: {}", settings.muted);
                    }
                    "q" | "Q" => {
                        g.settings.quality = g.settings.quality.next();
                        g.settings.save();
                        log::info!("Quality: {}", g.settings.quality.as_str());
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart(js_sys::Date::now() as u64);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        g.input.pause = true;
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
            let game_blur = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game_blur.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
                if g.state.phase == GamePhase::Playing {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window focus: unmute, stay paused until the player resumes
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let client_w = canvas.client_width();
            let client_h = canvas.client_height();
            let width = (client_w as f64 * dpr) as u32;
            let height = (client_h as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);

            let mut g = game.borrow_mut();
            g.set_css_size(client_w as f32, client_h as f32);
            if let Some(render_state) = g.render_state.as_mut() {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

/// Native build: no window, so play a headless demo round with autoplay
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use mozzie_swat::Tuning;
    use mozzie_swat::consts::SIM_DT;
    use mozzie_swat::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Mozzie Swat (native) starting...");
    log::info!("Native mode runs a headless autoplay round - use `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1);
    let seconds = std::env::args()
        .nth(2)
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(60.0);

    let tuning = Tuning::builtin();
    let mut state = GameState::new(seed, &tuning);
    let input = TickInput {
        autoplay: true,
        ..Default::default()
    };

    let total_ticks = (seconds / SIM_DT) as u64;
    let mut swats = 0u32;
    let mut spawns = 0u32;
    while state.time_ticks < total_ticks && state.phase == GamePhase::Playing {
        tick(&mut state, &input, SIM_DT);
        for event in state.drain_events() {
            match event {
                GameEvent::MosquitoSpawned { .. } => spawns += 1,
                GameEvent::MosquitoSwatted { .. } => swats += 1,
                _ => {}
            }
        }
    }

    let survived = state.time_ticks as f32 * SIM_DT;
    println!(
        "seed {}: {} after {:.1}s - {} spawned, {} swatted, score {}",
        seed,
        if state.victim.alive { "survived" } else { "stung" },
        survived,
        spawns,
        swats,
        state.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
