//! Cannon Man entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use cannon_man::Tuning;
    use cannon_man::consts::*;
    use cannon_man::renderer::{RenderState, build_scene};
    use cannon_man::sim::{GameEvent, GamePhase, Session};
    use cannon_man::ui::{self, HudView};

    /// Game instance holding all state
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        last_time: f64,
        /// Last HUD pushed to the DOM, to skip redundant writes
        last_hud: Option<HudView>,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning) -> Self {
            Self {
                session: Session::new(seed, tuning),
                render_state: None,
                last_time: 0.0,
                last_hud: None,
            }
        }

        /// Click, tap, or key. Starts a run from the menu when `may_start`,
        /// launches while the man is in the cannon.
        fn press(&mut self, may_start: bool) -> bool {
            match self.session.phase() {
                GamePhase::Menu | GamePhase::Finished if may_start => {
                    self.session.request_start()
                }
                GamePhase::Flying => self.session.request_launch(),
                _ => false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            self.session.advance(dt);

            for event in self.session.drain_events() {
                match event {
                    GameEvent::RunFinished {
                        score,
                        new_best: true,
                        ..
                    } => log::info!("New high score: {} m", score),
                    GameEvent::MenuRevealed => log::debug!("Menu revealed"),
                    _ => {}
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(self.session.world());
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
        fn update_hud(&mut self) {
            let hud = HudView::from_session(&self.session);
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-distance") {
                el.set_text_content(Some(&hud.distance));
            }

            if let Some(el) = document.get_element_by_id("hud-best") {
                match &hud.high_score {
                    Some(text) => {
                        el.set_text_content(Some(text));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }

            if let Some(el) = document.get_element_by_id("launch-prompt") {
                let class = if hud.show_launch_prompt { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id("menu") {
                let class = if hud.show_menu { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id("menu-score") {
                el.set_text_content(Some(hud.high_score.as_deref().unwrap_or("")));
            }

            self.last_hud = Some(hud);
        }
    }

    /// `?seed=N` in the page URL pins the level sequence
    fn seed_from_url() -> Option<u64> {
        let search = web_sys::window()?.location().search().ok()?;
        search
            .trim_start_matches('?')
            .split('&')
            .find_map(|pair| pair.strip_prefix("seed="))
            .and_then(|s| s.parse().ok())
    }

    /// Optional `<script id="tuning" type="application/json">` override
    fn tuning_from_page(document: &web_sys::Document) -> Tuning {
        match document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        {
            Some(json) if !json.trim().is_empty() => Tuning::from_json_or_default(&json),
            _ => Tuning::default(),
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cannon Man starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Backing store at device resolution, view is letterboxed into it
        let dpr = window.device_pixel_ratio();
        let width = (VIEW_WIDTH as f64 * dpr) as u32;
        let height = (VIEW_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = seed_from_url().unwrap_or_else(|| js_sys::Date::now() as u64);
        let tuning = tuning_from_page(&document);
        let game = Rc::new(RefCell::new(Game::new(seed, tuning)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        if let Some(el) = document.get_element_by_id("menu-title") {
            el.set_text_content(Some(ui::TITLE));
        }
        if let Some(el) = document.get_element_by_id("launch-prompt") {
            el.set_text_content(Some(ui::LAUNCH_PROMPT));
        }

        setup_input_handlers(&canvas, game.clone());
        setup_start_button(game.clone());

        // Draw the idle world behind the menu, then start the loop
        {
            let mut g = game.borrow_mut();
            g.render();
            g.update_hud();
        }
        request_animation_frame(game);

        log::info!("Cannon Man running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse down - start from the menu or launch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if game.borrow_mut().press(true) {
                    event.prevent_default();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - same as a click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().press(true);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard - Space starts a run, any key launches
        {
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let is_space = event.code() == "Space" || event.key() == " ";
                if game.borrow_mut().press(is_space) && is_space {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.session.request_start() {
                    log::info!("Run started from menu (seed {})", g.session.seed());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
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

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cannon Man (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Usage: cannon-man [tuning.json] [seed] [runs]
    let args: Vec<String> = std::env::args().collect();
    let tuning = args
        .get(1)
        .filter(|path| path.as_str() != "-")
        .map(|path| load_tuning(path))
        .unwrap_or_default();
    let seed = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let runs = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(5);

    run_headless(seed, tuning, runs);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> cannon_man::Tuning {
    match std::fs::read_to_string(path) {
        Ok(json) => cannon_man::Tuning::from_json_or_default(&json),
        Err(e) => {
            log::warn!("Could not read tuning file {}: {}", path, e);
            cannon_man::Tuning::default()
        }
    }
}

/// Play `runs` launches back to back and print how far each one went
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(seed: u64, tuning: cannon_man::Tuning, runs: u32) {
    use cannon_man::consts::SIM_DT;
    use cannon_man::sim::{GameEvent, Session};

    // Ten simulated minutes is far longer than any run
    const MAX_TICKS_PER_RUN: u32 = 60 * 60 * 10;

    let mut session = Session::new(seed, tuning);
    println!("Seed {}", seed);

    for run in 1..=runs {
        session.request_start();
        session.request_launch();

        let mut ticks = 0;
        while !session.menu_visible() && ticks < MAX_TICKS_PER_RUN {
            session.advance(SIM_DT);
            ticks += 1;
        }
        if !session.menu_visible() {
            // Perched on an obstacle, hopping in place
            log::warn!(
                "Run {} still going after {} ticks at {} m, stopping",
                run,
                MAX_TICKS_PER_RUN,
                session.world().score
            );
            break;
        }

        let mut boosts = 0;
        let mut hits = 0;
        for event in session.drain_events() {
            match event {
                GameEvent::BoostPadUsed { .. } => boosts += 1,
                GameEvent::ObstacleHit { .. } => hits += 1,
                GameEvent::RunFinished {
                    score, new_best, ..
                } => println!(
                    "Run {:>2}: {:>5} m  ({} boosts, {} obstacle hits){}",
                    run,
                    score,
                    boosts,
                    hits,
                    if new_best { "  new best" } else { "" }
                ),
                _ => {}
            }
        }
    }

    println!("High score: {} m", session.high_score().best());
}
