//! Torch Maze entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use glam::Vec2;
    use torch_maze::Settings;
    use torch_maze::consts::*;
    use torch_maze::raster::MazeRaster;
    use torch_maze::sim::{MazeConfig, MazeEvent, MazeState, TickInput, tick};

    /// App instance holding all state
    struct App {
        state: MazeState,
        raster: MazeRaster,
        input: TickInput,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        fn new(seed: u64, dpr: f32) -> Self {
            let settings = Settings::load();
            let mut config = MazeConfig::default();
            config.collision = settings.collision;
            config.win_policy = settings.win_policy;

            Self {
                state: MazeState::with_config(seed, config),
                raster: MazeRaster::new(CANVAS_SIZE, dpr),
                input: TickInput::default(),
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run fixed-cadence simulation ticks, collecting transitions
        fn update(&mut self, time: f64) -> Vec<MazeEvent> {
            let dt = (((time - self.last_time) / 1000.0) as f32).min(0.1);
            self.last_time = time;
            self.accumulator += dt;

            let mut events = Vec::new();
            let mut steps = 0;
            while self.accumulator >= TICK_DT && steps < MAX_TICKS_PER_FRAME {
                let out = tick(&mut self.state, &self.input, Some(&mut self.raster));
                events.extend(out.event);
                self.accumulator -= TICK_DT;
                steps += 1;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 && time > oldest {
                self.fps = (60000.0 / (time - oldest)).round() as u32;
            }

            events
        }

        /// Blit the current frame onto the 2D canvas
        fn render(&self, ctx: &CanvasRenderingContext2d) {
            let px = self.raster.device_size();
            let frame = self.raster.to_rgba(self.state.solved, WIN_RADIUS);
            let image = web_sys::ImageData::new_with_u8_clamped_array_and_sh(
                Clamped(&frame[..]),
                px,
                px,
            )
            .expect("image data");
            let _ = ctx.put_image_data(&image, 0.0, 0.0);
        }

        /// Apply solved/re-armed transitions and per-frame DOM updates
        fn update_dom(&self, events: &[MazeEvent]) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            for event in events {
                let lit = *event == MazeEvent::Solved;
                log::info!(
                    "{} at tick {}",
                    if lit { "Solved" } else { "Re-armed" },
                    self.state.time_ticks
                );

                if let Some(status) = document.get_element_by_id("status") {
                    status.set_text_content(Some(if lit {
                        "TORCH ENABLED"
                    } else {
                        "TORCH DISABLED"
                    }));
                }
                if !self.settings.reduced_motion {
                    if let Some(body) = document.body() {
                        let _ = if lit {
                            body.class_list().add_1("lights-on")
                        } else {
                            body.class_list().remove_1("lights-on")
                        };
                    }
                }
            }

            // Cursor dot follows the probe (CSS pixels, canvas-relative)
            if let Some(dot) = document.get_element_by_id("cursor-dot") {
                if let Ok(dot) = dot.dyn_into::<web_sys::HtmlElement>() {
                    let half = CANVAS_SIZE as f32 / 2.0;
                    let pos = self.state.probe.pos;
                    let _ = dot
                        .style()
                        .set_property("left", &format!("{}px", pos.x + half));
                    let _ = dot
                        .style()
                        .set_property("top", &format!("{}px", pos.y + half));
                }
            }

            if self.settings.show_fps {
                if let Some(el) = document.get_element_by_id("hud-fps") {
                    el.set_text_content(Some(&self.fps.to_string()));
                }
            }
        }
    }

    /// Convert a client-space pointer position to maze coordinates
    fn client_to_maze(canvas: &HtmlCanvasElement, x: f32, y: f32) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        let half = CANVAS_SIZE as f32 / 2.0;
        Vec2::new(
            x - rect.left() as f32 - half,
            y - rect.top() as f32 - half,
        )
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Torch Maze starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("maze-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size the backing store for the device pixel ratio
        let dpr = window.device_pixel_ratio() as f32;
        let px = (CANVAS_SIZE as f32 * dpr).ceil() as u32;
        canvas.set_width(px);
        canvas.set_height(px);
        let _ = canvas
            .style()
            .set_property("width", &format!("{CANVAS_SIZE}px"));
        let _ = canvas
            .style()
            .set_property("height", &format!("{CANVAS_SIZE}px"));

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("get context")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed, dpr)));
        log::info!("Maze initialized with seed: {}", seed);

        setup_input_handlers(&canvas, app.clone());
        run_frame_loop(app, ctx);

        log::info!("Torch Maze running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Track the pointer on the whole window so the probe can re-enter
        // the maze from outside the canvas
        {
            let app = app.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let target =
                    client_to_maze(&canvas, event.client_x() as f32, event.client_y() as f32);
                app.borrow_mut().input.target = Some(target);
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().item(0) {
                    let target =
                        client_to_maze(&canvas, touch.client_x() as f32, touch.client_y() as f32);
                    app.borrow_mut().input.target = Some(target);
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn run_frame_loop(app: Rc<RefCell<App>>, ctx: CanvasRenderingContext2d) {
        let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();

        *g.borrow_mut() = Some(Closure::new(move |time: f64| {
            {
                let mut app = app.borrow_mut();
                if app.last_time == 0.0 {
                    app.last_time = time;
                }
                let events = app.update(time);
                app.render(&ctx);
                app.update_dom(&events);
            }

            web_sys::window()
                .unwrap()
                .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref())
                .expect("request_animation_frame");
        }));

        web_sys::window()
            .unwrap()
            .request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            .expect("request_animation_frame");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Torch Maze (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nRunning maze demo...");
    demo_maze();

    println!("Running letters demo...");
    demo_letters();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the probe straight at the center until a gap lines up on every
/// ring, or give up
#[cfg(not(target_arch = "wasm32"))]
fn demo_maze() {
    use glam::Vec2;
    use torch_maze::sim::{MazeEvent, MazeState, TickInput, tick};

    let mut state = MazeState::new(42);
    let input = TickInput {
        target: Some(Vec2::ZERO),
    };

    for _ in 0..20_000 {
        let out = tick(&mut state, &input, None);
        if out.event == Some(MazeEvent::Solved) {
            println!("✓ Maze solved in {} ticks", state.time_ticks);
            return;
        }
    }
    println!(
        "✗ Maze unsolved after {} ticks (probe at r={:.1})",
        state.time_ticks,
        state.distance_to_center()
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_letters() {
    use glam::Vec2;
    use torch_maze::letters::{LettersInput, LettersState};

    let mut state = LettersState::new(42, Vec2::new(1920.0, 1080.0));
    state.spawn_word("torch", Vec2::new(300.0, 300.0));
    state.spawn_word("maze", Vec2::new(400.0, 700.0));

    loop {
        let aim = match state.letters.iter().find(|l| !l.blasted) {
            Some(letter) => letter.pos,
            None => break,
        };
        state.tick(&LettersInput { aim, fire: true });
    }
    let burst = state.particles.len();

    // Let the bursts burn out
    let quiet = LettersInput::default();
    while !state.particles.is_empty() {
        state.tick(&quiet);
    }
    println!(
        "✓ All {} letters blasted ({} particles at peak, gone by tick {})",
        state.letters.len(),
        burst,
        state.time_ticks
    );
}
