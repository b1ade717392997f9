//! Astro Jump entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, HtmlInputElement, MouseEvent, TouchEvent};

    use astro_jump::consts::SIM_DT;
    use astro_jump::renderer::{RenderState, SceneGraph, field_to_viewport, viewport_to_field};
    use astro_jump::sim::Game;
    use astro_jump::ui::{UiShell, dispatch, explosion_particles};
    use astro_jump::{GameConfig, Settings};

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    fn set_display(document: &Document, selector: &str, value: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            if let Some(html) = el.dyn_ref::<HtmlElement>() {
                let _ = html.style().set_property("display", value);
            }
        }
    }

    /// DOM side of the game: score text, modals and explosions
    struct DomShell {
        document: Document,
        canvas: HtmlCanvasElement,
        field: Vec2,
        rng: Pcg32,
        particles: u32,
    }

    impl DomShell {
        /// Canvas CSS size, the space pointer events arrive in
        fn viewport(&self) -> (u32, u32) {
            (
                self.canvas.client_width().max(0) as u32,
                self.canvas.client_height().max(0) as u32,
            )
        }

        fn spawn_particles(&mut self, pos: Vec2) -> Result<(), JsValue> {
            let body = self.document.body().ok_or("no body")?;
            let rect = self.canvas.get_bounding_client_rect();
            let window = web_sys::window().ok_or("no window")?;
            let page = field_to_viewport(pos, self.field, self.viewport())
                + Vec2::new(
                    (rect.left() + window.scroll_x().unwrap_or(0.0)) as f32,
                    (rect.top() + window.scroll_y().unwrap_or(0.0)) as f32,
                );

            let explosion = self.document.create_element("div")?;
            explosion.set_class_name("explosion");
            explosion.set_attribute("style", &format!("left: {}px; top: {}px", page.x, page.y))?;
            body.append_child(&explosion)?;

            for (i, particle) in explosion_particles(&mut self.rng, self.particles)
                .into_iter()
                .enumerate()
            {
                let elm = self.document.create_element("div")?;
                elm.set_class_name("particle");
                elm.set_attribute(
                    "style",
                    &format!(
                        "background-color: {}; top: {}px; left: {}px",
                        particle.color, particle.offset.y, particle.offset.x
                    ),
                )?;

                // Container goes away once the first particle finishes animating
                if i == 0 {
                    let container = explosion.clone();
                    let closure = Closure::once(move |_event: web_sys::AnimationEvent| {
                        container.remove();
                    });
                    elm.add_event_listener_with_callback("animationend", closure.as_ref().unchecked_ref())?;
                    closure.forget();
                }
                explosion.append_child(&elm)?;
            }
            Ok(())
        }
    }

    impl UiShell for DomShell {
        fn on_score_changed(&mut self, score: u64, color: &'static str) {
            if let Some(el) = self.document.get_element_by_id("score-text") {
                el.set_text_content(Some(&format!("Score: {}", score)));
                if let Some(html) = el.dyn_ref::<HtmlElement>() {
                    let _ = html.style().set_property("color", color);
                }
            }
        }

        fn on_explosion(&mut self, pos: Vec2) {
            if self.particles == 0 {
                return;
            }
            if let Err(e) = self.spawn_particles(pos) {
                log::warn!("Explosion effect failed: {:?}", e);
            }
        }

        fn on_game_over(&mut self, final_score: u64, high_score: u64) {
            if let Some(el) = self.document.get_element_by_id("high-score") {
                el.set_text_content(Some(&high_score.to_string()));
            }
            if let Some(el) = self.document.get_element_by_id("score") {
                el.set_text_content(Some(&final_score.to_string()));
            }
            set_display(&self.document, ".modal-over", "block");
        }
    }

    /// Game instance holding all state
    struct App {
        game: Game,
        scene: SceneGraph,
        render_state: Option<RenderState>,
        shell: DomShell,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;

            self.game.advance(dt, &mut self.scene);
            dispatch(self.game.drain_events(), &mut self.shell);
            self.render();
            self.track_fps(time);
        }

        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.scene) {
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

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 && time > oldest_time {
                self.fps = (60000.0 / (time - oldest_time)).round() as u32;
            }

            if self.game.settings().show_fps {
                if let Some(el) = self.shell.document.get_element_by_id("fps") {
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                }
            }
        }

        /// Pointer position in CSS pixels relative to the canvas
        fn pointer_at(&mut self, client_x: f32, client_y: f32) {
            let rect = self.shell.canvas.get_bounding_client_rect();
            let local = Vec2::new(client_x - rect.left() as f32, client_y - rect.top() as f32);
            let field = viewport_to_field(local, self.shell.field, self.shell.viewport());
            self.game.pointer_moved(field.x);
        }

        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            if self.game.restart(seed, &mut self.scene).is_ok() {
                set_display(&self.shell.document, ".modal-over", "none");
            }
        }
    }

    /// JSON from a `data-*` attribute on the canvas, if present
    fn canvas_json(canvas: &HtmlCanvasElement, name: &str) -> Option<String> {
        canvas.get_attribute(name).filter(|s| !s.trim().is_empty())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Astro Jump starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let config = match canvas_json(&canvas, "data-config") {
            Some(json) => GameConfig::from_json(&json).map_err(js_err)?,
            None => GameConfig::default(),
        };
        let settings = match canvas_json(&canvas, "data-settings").map(|json| Settings::from_json(&json)) {
            Some(Ok(settings)) => settings,
            Some(Err(e)) => {
                log::warn!("Ignoring bad settings: {}", e);
                Settings::default()
            }
            None => Settings::default(),
        };

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let mut scene = SceneGraph::new();
        let particles = settings.particles_per_explosion();
        let field = Vec2::new(config.width, config.height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, &config)
            .await
            .map_err(js_err)?;

        let game = Game::new(config, settings, seed, &mut scene).map_err(js_err)?;

        let app = Rc::new(RefCell::new(App {
            game,
            scene,
            render_state: Some(render_state),
            shell: DomShell {
                document: document.clone(),
                canvas: canvas.clone(),
                field,
                rng: Pcg32::seed_from_u64(seed ^ 0x9e37_79b9),
                particles,
            },
            last_time: 0.0,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));

        setup_input_handlers(&canvas, app.clone())?;
        setup_controls(&document, app.clone())?;

        request_animation_frame(app);

        log::info!("Astro Jump running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        // Pointer follow
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut()
                    .pointer_at(event.client_x() as f32, event.client_y() as f32);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch follow
        for name in ["touchstart", "touchmove"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut()
                        .pointer_at(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Click / tap: first jump
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.primary_action();
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_controls(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("btn-start") {
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                set_display(&document, ".modal-start", "none");
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btn-again") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().restart();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(el) = document.query_selector(".easy-mode")? {
            let checkbox: HtmlInputElement = el.dyn_into()?;
            app.borrow_mut().game.set_easy_mode(checkbox.checked());

            let input = checkbox.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.set_easy_mode(input.checked());
            });
            checkbox.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), astro_jump::GameError> {
    env_logger::init();
    log::info!("Astro Jump (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    autoplay(seed)
}

/// Play one session with a simple autopilot that chases the next asteroid up
#[cfg(not(target_arch = "wasm32"))]
fn autoplay(seed: u64) -> Result<(), astro_jump::GameError> {
    use astro_jump::consts::SIM_DT;
    use astro_jump::renderer::SceneGraph;
    use astro_jump::sim::{Game, GamePhase};
    use astro_jump::ui::{LogShell, dispatch};
    use astro_jump::{GameConfig, Settings};

    // Two minutes of game time at most
    const MAX_FRAMES: u32 = 60 * 120;

    let mut scene = SceneGraph::new();
    let mut shell = LogShell::default();
    let mut game = Game::new(GameConfig::default(), Settings::default(), seed, &mut scene)?;
    game.primary_action();

    for _ in 0..MAX_FRAMES {
        let state = game.state();
        let target = state
            .asteroids
            .iter()
            .filter(|a| a.pos.y < state.astronaut.pos.y)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|a| a.pos.x + game.config().pointer_offset);
        if let Some(x) = target {
            game.pointer_moved(x);
        }

        game.advance(SIM_DT, &mut scene);
        dispatch(game.drain_events(), &mut shell);
        if game.phase() == GamePhase::GameOver {
            break;
        }
    }

    let state = game.state();
    log::info!(
        "Autoplay finished: score {}, {} collisions, {} ticks, {} explosions",
        state.score,
        state.collisions,
        state.time_ticks,
        shell.explosions
    );
    Ok(())
}
