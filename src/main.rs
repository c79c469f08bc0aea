//! Racing Rush entry point
//!
//! Owns the frame loop: the browser build drives the game from
//! requestAnimationFrame, the native build runs a headless race.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use racing_rush::persistence::LocalStorageStore;
    use racing_rush::platform::{SystemClock, lane_direction_for_key};
    use racing_rush::renderer::CanvasRenderer;
    use racing_rush::sim::{SessionPhase, Viewport};
    use racing_rush::{Game, Settings};

    /// Longest frame we simulate in one step (tab switches, debugger stops)
    const MAX_FRAME_DT: f32 = 0.1;

    /// Browser app holding the game and its renderer
    struct App {
        game: Game<SystemClock, LocalStorageStore>,
        renderer: CanvasRenderer,
        canvas: HtmlCanvasElement,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        last_phase: SessionPhase,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            self.game.update(dt.min(MAX_FRAME_DT));
            self.game.render(&mut self.renderer);

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 && time > oldest {
                self.fps = (60000.0 / (time - oldest)).round() as u32;
            }

            self.update_hud();
        }

        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
            let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
            self.game.resize(width as f32, height as f32);
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let snapshot = self.game.snapshot();

            set_text(&document, "timer", &snapshot.timer_text());
            set_text(&document, "score", &snapshot.score.to_string());
            set_text(&document, "speed-label", snapshot.speed_label());
            set_text(&document, "highscore", &format!("{}s", snapshot.best_secs));
            let show_fps = self.renderer.settings.show_fps;
            set_hidden(&document, "fps", !show_fps);
            if show_fps {
                set_text(&document, "fps", &self.fps.to_string());
            }
            if let Some(el) = document.get_element_by_id("timer-display") {
                let _ = el
                    .class_list()
                    .toggle_with_force("warning", snapshot.timer_warning());
            }

            // Screen switches only on phase changes
            if snapshot.phase == self.last_phase {
                return;
            }
            self.last_phase = snapshot.phase;
            let running = snapshot.phase == SessionPhase::Running;
            set_hidden(&document, "hud", !running);
            set_hidden(&document, "start-screen", snapshot.phase != SessionPhase::NotStarted);
            set_hidden(&document, "game-over-screen", snapshot.phase != SessionPhase::Ended);

            if let Some(result) = snapshot.result {
                set_text(&document, "final-time", &result.race_time_text());
                set_text(&document, "final-score", &result.score.to_string());
                set_hidden(&document, "new-record", !result.new_record);
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Racing Rush starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let game = Game::new(SystemClock::new(), LocalStorageStore, Viewport::default());
        let app = Rc::new(RefCell::new(App {
            game,
            renderer: CanvasRenderer::new(ctx, Settings::load()),
            canvas,
            last_time: 0.0,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
            last_phase: SessionPhase::Ended,
        }));
        app.borrow_mut().resize();

        setup_input_handlers(app.clone());
        setup_buttons(app.clone());
        setup_auto_pause(app.clone());
        setup_resize(app.clone());

        request_animation_frame(app);

        log::info!("Racing Rush running!");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            let mut app = app.borrow_mut();
            if let Some(direction) = lane_direction_for_key(&key) {
                app.game.request_lane_change(direction);
            } else if app.renderer.settings.toggle_for_key(&key) {
                app.renderer.settings.save();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for id in ["start-btn", "restart-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                app.borrow_mut().game.start(seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut app = app.borrow_mut();
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                app.game.on_suspend();
            } else {
                app.game.on_resume();
                // Don't feed the hidden interval in as one giant frame
                app.last_time = 0.0;
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            app.borrow_mut().frame(time);
            request_animation_frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use racing_rush::consts::COLLISION_FAR;
    use racing_rush::persistence::FileStore;
    use racing_rush::platform::ManualClock;
    use racing_rush::renderer::HudLogger;
    use racing_rush::sim::{LaneDirection, ObjectKind, SessionPhase, Viewport};
    use racing_rush::{Game, Snapshot};

    /// Fixed frame rate for the headless run
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// How far ahead the autopilot looks
    const LOOKAHEAD: f32 = COLLISION_FAR * 4.0;

    /// Is there an obstacle coming up in `lane`?
    fn blocked(snapshot: &Snapshot<'_>, lane: usize) -> bool {
        snapshot
            .objects
            .iter()
            .any(|o| o.lane == lane && o.kind == ObjectKind::Obstacle && o.depth < LOOKAHEAD)
    }

    /// Anything worth picking up in `lane`?
    fn rewarding(snapshot: &Snapshot<'_>, lane: usize) -> bool {
        snapshot
            .objects
            .iter()
            .any(|o| o.lane == lane && o.kind != ObjectKind::Obstacle && o.depth < LOOKAHEAD)
    }

    /// Simple driver: dodge obstacles, drift toward pickups
    fn autopilot(snapshot: &Snapshot<'_>) -> Option<LaneDirection> {
        let player = snapshot.player;
        if player.lane != player.target_lane {
            return None;
        }
        let lane = player.lane;
        let mut options = Vec::new();
        if lane > 0 {
            options.push((lane - 1, LaneDirection::Left));
        }
        if lane + 1 < racing_rush::consts::LANE_COUNT {
            options.push((lane + 1, LaneDirection::Right));
        }

        if blocked(snapshot, lane) {
            return options
                .iter()
                .find(|(l, _)| !blocked(snapshot, *l))
                .map(|&(_, d)| d);
        }
        if !rewarding(snapshot, lane) {
            return options
                .iter()
                .find(|(l, _)| rewarding(snapshot, *l) && !blocked(snapshot, *l))
                .map(|&(_, d)| d);
        }
        None
    }

    pub fn run() {
        env_logger::init();
        log::info!("Racing Rush (headless) starting...");

        let seed = std::env::args()
            .nth(1)
            .and_then(|arg| arg.parse::<u64>().ok())
            .unwrap_or_else(|| {
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_millis() as u64)
                    .unwrap_or(0)
            });

        // Wall clock advances in lockstep with simulated frames
        let clock = ManualClock::new(0.0);
        let store = FileStore::in_temp_dir();
        let mut game = Game::new(clock.clone(), store, Viewport::default());
        let mut hud = HudLogger::default();

        game.start(seed);
        while game.phase() == SessionPhase::Running {
            let steer = autopilot(&game.snapshot());
            if let Some(direction) = steer {
                game.request_lane_change(direction);
            }
            clock.advance(FRAME_DT as f64 * 1000.0);
            game.update(FRAME_DT);
            game.render(&mut hud);
        }

        log::info!("{} frames simulated", hud.frames);
        if let Some(result) = game.result() {
            match serde_json::to_string_pretty(result) {
                Ok(json) => println!("{}", json),
                Err(err) => log::error!("Could not serialize result: {}", err),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
