//! Brickfall entry point
//!
//! Native: headless demo run driven by the autopilot, for smoke tests and
//! profiling. Web: canvas game loop driven by requestAnimationFrame.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use brickfall::audio::AudioManager;
    use brickfall::autopilot;
    use brickfall::clock::FrameClock;
    use brickfall::input::{Command, InputState, pointer_to_world};
    use brickfall::platform::{CanvasSurface, LocalStorageStore, WebToneSink};
    use brickfall::sim::TickInput;
    use brickfall::{Game, KeyValueStore, MemoryStore, Settings};

    /// Everything the browser loop needs
    struct App {
        game: Game,
        input: InputState,
        clock: FrameClock,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
        settings: Settings,
    }

    impl App {
        /// Client x to world x using the canvas' on-screen rect
        fn world_x(&self, client_x: i32) -> f32 {
            let rect = self.canvas.get_bounding_client_rect();
            pointer_to_world(client_x as f32, rect.left() as f32, rect.width() as f32)
        }

        fn handle_commands(&mut self) {
            for command in self.input.drain_commands() {
                if let Some(t) = self.game.handle(command) {
                    log::debug!("{:?}", t);
                }
                if command == Command::ToggleSound {
                    self.settings.sound_on = !self.game.is_muted();
                    self.settings.save();
                }
            }
            if let Some(x) = self.input.take_pointer() {
                self.game.place_paddle(x);
            }
        }

        fn update(&mut self, time: f64) {
            self.handle_commands();
            let steps = self.clock.advance_to(time);
            for _ in 0..steps {
                let steer = if self.settings.autopilot {
                    autopilot::steer(self.game.state())
                } else {
                    self.input.steer()
                };
                for t in self.game.frame(&TickInput { steer }) {
                    log::debug!("{:?}", t);
                }
            }
            self.game.render(&mut self.surface);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Brickfall starting...");

        let window = web_sys::window().expect("No window");
        let document = window.document().expect("No document");
        let canvas = document
            .get_element_by_id("canvas")
            .expect("No canvas element")
            .dyn_into::<HtmlCanvasElement>()
            .expect("Not a canvas");

        let settings = Settings::load();
        let seed = settings
            .seed
            .unwrap_or_else(|| (js_sys::Math::random() * u32::MAX as f64) as u64);
        log::info!("Seed: {}", seed);

        let store: Box<dyn KeyValueStore> = match LocalStorageStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("Best score will not persist: {}", e);
                Box::new(MemoryStore::new())
            }
        };

        let mut game = Game::new(seed, store, AudioManager::new(Box::new(WebToneSink::new())));
        game.apply_settings(&settings);

        let surface = CanvasSurface::new(&canvas).expect("No 2d context");
        let app = Rc::new(RefCell::new(App {
            game,
            input: InputState::new(),
            clock: FrameClock::new(),
            surface,
            canvas: canvas.clone(),
            settings,
        }));

        setup_input_handlers(&canvas, app.clone());
        request_animation_frame(app);

        log::info!("Brickfall running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("No window");

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                let key = event.key();
                if key == "i" || key == "I" {
                    a.settings.autopilot = !a.settings.autopilot;
                    log::info!("Autopilot: {}", a.settings.autopilot);
                    a.settings.save();
                    return;
                }
                if a.input.key_down(&key) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let x = a.world_x(event.client_x());
                a.input.pointer(x);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let x = a.world_x(event.client_x());
                a.game.tap(x);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut a = app.borrow_mut();
                    let x = a.world_x(touch.client_x());
                    a.input.pointer(x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut a = app.borrow_mut();
                    let x = a.world_x(touch.client_x());
                    a.game.tap(x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Release held keys when focus is lost
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                a.input.release_all();
                a.clock.reset();
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("No window");
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().update(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;

    use brickfall::audio::AudioManager;
    use brickfall::autopilot;
    use brickfall::platform::{FileStore, LogToneSink};
    use brickfall::render::DrawList;
    use brickfall::sim::TickInput;
    use brickfall::{Game, KeyValueStore, MemoryStore, Phase, Settings, Transition};

    /// Headless Brickfall run with the autopilot at the paddle
    #[derive(Parser, Debug)]
    #[command(name = "brickfall", version, about)]
    pub struct Args {
        /// Number of 60 Hz frames to simulate
        #[arg(long, default_value_t = 3600)]
        pub frames: u64,

        /// RNG seed (overrides the settings file; random when unset)
        #[arg(long)]
        pub seed: Option<u64>,

        /// JSON file the best score is kept in (in-memory when unset)
        #[arg(long)]
        pub store: Option<PathBuf>,

        /// Settings JSON file
        #[arg(long)]
        pub settings: Option<PathBuf>,

        /// Only log warnings and errors
        #[arg(long, short)]
        pub quiet: bool,
    }

    #[derive(Debug, Default)]
    struct Summary {
        games: u32,
        levels_cleared: u32,
        rounds_lost: u32,
        top_score: u64,
    }

    pub fn run(args: Args) {
        let settings = match &args.settings {
            Some(path) => Settings::load_from(path),
            None => Settings::default(),
        };
        let seed = args.seed.or(settings.seed).unwrap_or_else(rand::random);
        log::info!("Seed: {}", seed);

        let store: Box<dyn KeyValueStore> = match &args.store {
            Some(path) => match FileStore::open(path) {
                Ok(store) => Box::new(store),
                Err(e) => {
                    log::warn!("Best score will not persist ({}): {}", path.display(), e);
                    Box::new(MemoryStore::new())
                }
            },
            None => Box::new(MemoryStore::new()),
        };

        let mut game = Game::new(seed, store, AudioManager::new(Box::new(LogToneSink)));
        game.apply_settings(&settings);

        let mut summary = Summary {
            games: 1,
            ..Summary::default()
        };
        for _ in 0..args.frames {
            match game.phase() {
                Phase::Idle | Phase::Paused => {
                    game.confirm();
                }
                Phase::GameOver => {
                    game.restart();
                    summary.games += 1;
                }
                Phase::Running => {}
            }

            let input = TickInput {
                steer: autopilot::steer(game.state()),
            };
            for transition in game.frame(&input) {
                match transition {
                    Transition::LevelCleared { .. } => summary.levels_cleared += 1,
                    Transition::RoundLost { .. } => summary.rounds_lost += 1,
                    Transition::GameOver { score, .. } => {
                        summary.rounds_lost += 1;
                        summary.top_score = summary.top_score.max(score);
                    }
                    _ => {}
                }
            }
        }

        let mut frame = DrawList::new();
        game.render(&mut frame);

        let state = game.state();
        summary.top_score = summary.top_score.max(state.score);
        println!("Brickfall headless run (seed {})", seed);
        println!("  frames simulated: {}", args.frames);
        println!("  games played:     {}", summary.games);
        println!("  levels cleared:   {}", summary.levels_cleared);
        println!("  rounds lost:      {}", summary.rounds_lost);
        println!("  top score:        {}", summary.top_score);
        println!("  best score:       {}", game.best());
        println!(
            "  final state:      level {}, score {}, lives {}, {} bricks left",
            state.level,
            state.score,
            state.lives,
            state.bricks.remaining()
        );
        println!("  last frame:       {} draw calls", frame.commands.len());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    let args = headless::Args::parse();
    let level = if args.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    log::info!("Brickfall (native) starting...");

    headless::run(args);
}
