//! Gap Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlSelectElement, PointerEvent, TouchEvent};

    use gap_dash::platform::LocalStorageStore;
    use gap_dash::renderer::CanvasRenderer;
    use gap_dash::sim::Difficulty;
    use gap_dash::{GameConfig, Playfield, Session};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorageStore>,
        renderer: Option<CanvasRenderer>,
        canvas: HtmlCanvasElement,
        playfield: Playfield,
        last_time: Option<f64>,
        /// Game-over overlay currently shown
        overlay_shown: bool,
    }

    impl Game {
        /// Convert client (CSS pixel) coordinates to playfield coordinates
        fn client_to_playfield(&self, client_x: f64, client_y: f64) -> (f32, f32) {
            let rect = self.canvas.get_bounding_client_rect();
            let scale = self.renderer.as_ref().map(|r| r.scale()).unwrap_or(1.0);
            let px_per_css = if rect.width() > 0.0 {
                self.canvas.width() as f64 / rect.width()
            } else {
                1.0
            };
            let x = (client_x - rect.left()) * px_per_css / scale;
            let y = (client_y - rect.top()) * px_per_css / scale;
            (x as f32, y as f32)
        }

        fn pointer_moved(&mut self, client_x: f64, client_y: f64) {
            let (x, y) = self.client_to_playfield(client_x, client_y);
            self.session.set_target(x, y);
        }

        /// Advance the simulation, then draw the resolved frame
        fn update(&mut self, time: f64) {
            let dt = match self.last_time {
                Some(last) => (time - last) / 1000.0,
                None => 0.0,
            };
            self.last_time = Some(time);

            let report = self.session.frame(dt);

            if let Some(ref renderer) = self.renderer {
                if let Err(e) = renderer.render(self.session.state()) {
                    log::warn!("Render error: {:?}", e);
                }
            }

            self.update_hud(report);
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, report: gap_dash::FrameReport) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&report.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("high-score") {
                el.set_text_content(Some(&report.high_score.to_string()));
            }

            if report.game_over == self.overlay_shown {
                return;
            }
            self.overlay_shown = report.game_over;

            if let Some(el) = document.get_element_by_id("game-over") {
                let class = if report.game_over { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
            if report.game_over {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&report.score.to_string()));
                }
                if let Some(el) = document.get_element_by_id("new-best") {
                    let class = if report.new_high_score { "" } else { "hidden" };
                    let _ = el.set_attribute("class", class);
                }
            }
        }

        fn restart(&mut self) {
            self.session.restart();
            self.last_time = None;
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gap Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let query = window.location().search().unwrap_or_default();
        let config = GameConfig::from_query(&query);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // A missing 2d context leaves the game running without drawing
        let renderer = match CanvasRenderer::new(&canvas, config.playfield) {
            Ok(r) => Some(r),
            Err(e) => {
                log::warn!("Rendering disabled: {:?}", e);
                None
            }
        };

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(&config, seed, LocalStorageStore::default());

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            canvas: canvas.clone(),
            playfield: config.playfield,
            last_time: None,
            overlay_shown: false,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());
        setup_difficulty_select(game.clone(), config.difficulty);
        setup_auto_pause(game.clone());
        setup_resize(game.clone());

        request_animation_frame(game);

        log::info!("Gap Dash running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse and pen
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                game.borrow_mut()
                    .pointer_moved(event.client_x() as f64, event.client_y() as f64);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut()
                        .pointer_moved(touch.client_x() as f64, touch.client_y() as f64);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("restart"))
        else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().restart();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_difficulty_select(game: Rc<RefCell<Game>>, initial: Difficulty) {
        let Some(select) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("difficulty"))
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        else {
            return;
        };
        select.set_value(initial.as_str());

        let select_clone = select.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            match Difficulty::from_str(&select_clone.value()) {
                Some(d) => game.borrow_mut().session.set_difficulty(d),
                None => log::warn!("Unknown difficulty '{}'", select_clone.value()),
            }
        });
        let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Visibility change (tab switch, minimize)
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
            let mut g = game.borrow_mut();
            g.session.set_paused(hidden);
            g.last_time = None;
            log::info!("{}", if hidden { "Auto-paused (tab hidden)" } else { "Resumed" });
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
            let mut g = game.borrow_mut();
            let width = (g.canvas.client_width() as f64 * dpr) as u32;
            let height = (g.canvas.client_height() as f64 * dpr) as u32;
            g.canvas.set_width(width);
            g.canvas.set_height(height);
            let playfield = g.playfield;
            if let Some(ref mut renderer) = g.renderer {
                renderer.resize(width, height, playfield);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let callback_clone = callback.clone();

        *callback_clone.borrow_mut() = Some(Closure::new(move |time: f64| {
            game.borrow_mut().update(time);

            if let Some(window) = web_sys::window() {
                if let Some(ref cb) = *callback.borrow() {
                    let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
                }
            }
        }));

        if let Some(window) = web_sys::window() {
            if let Some(ref cb) = *callback_clone.borrow() {
                let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
            }
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
    use gap_dash::persistence::MemoryStore;
    use gap_dash::{GameConfig, Session};

    env_logger::init();

    // `gap-dash difficulty=high seed=7 autopilot=1 ticks=3600`
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = GameConfig::from_query(&args.join("&"));

    let fallback_seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    log::info!("Gap Dash (native) headless run: {} ticks", config.demo_ticks);
    let mut session = Session::new(&config, fallback_seed, MemoryStore::new());

    // Without the autopilot the player simply holds the track centre
    let mut ticks = 0;
    while ticks < config.demo_ticks && !session.is_game_over() {
        session.step();
        ticks += 1;
    }

    let summary = serde_json::json!({
        "difficulty": config.difficulty,
        "ticks": ticks,
        "spawned": session.state().spawned_total,
        "report": session.report(),
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not encode summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
