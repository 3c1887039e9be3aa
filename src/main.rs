//! Star Catcher entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::prelude::*;

    use star_catcher::persistence::LocalStore;
    use star_catcher::{RelayError, Session};
    use star_catcher::platform::{Clock, PointerDrag, SystemClock, key_steer};
    use star_catcher::relay::{self, MessageRequest, RelayRequest};
    use star_catcher::sim::{Bounds, Steer, TickInput};

    /// Browser-facing handle. The page owns the animation frame loop and the
    /// drawing; it feeds input in and calls `frame` once per frame.
    #[wasm_bindgen]
    pub struct WebGame {
        session: Session<LocalStore>,
        clock: SystemClock,
        input: TickInput,
        drag: PointerDrag,
        /// Request waiting for the page to send to the relay
        pending_request: Option<MessageRequest>,
    }

    #[wasm_bindgen]
    impl WebGame {
        #[wasm_bindgen(constructor)]
        pub fn new(container_width: f32) -> WebGame {
            let seed = js_sys::Date::now() as u64;
            let bounds = Bounds::from_container(container_width);
            log::info!(
                "Game initialized with seed {seed} ({}x{})",
                bounds.width,
                bounds.height
            );
            WebGame {
                session: Session::new(LocalStore::new(), seed, bounds),
                clock: SystemClock::new(),
                input: TickInput::default(),
                drag: PointerDrag::new(),
                pending_request: None,
            }
        }

        /// "Start Game" / "Play Again?"
        pub fn start(&mut self) {
            self.input.start = true;
        }

        pub fn toggle_idle_mode(&mut self) {
            self.input.idle_mode = !self.input.idle_mode;
            log::info!("Idle mode: {}", self.input.idle_mode);
        }

        pub fn key_down(&mut self, key: &str) {
            if let Some(steer) = key_steer(key, true) {
                self.push_steer(steer);
            }
        }

        pub fn key_up(&mut self, key: &str) {
            if let Some(steer) = key_steer(key, false) {
                self.push_steer(steer);
            }
        }

        pub fn pointer_down(&mut self, x: f32) {
            self.drag.begin(x);
        }

        pub fn pointer_move(&mut self, x: f32) {
            if let Some(steer) = self.drag.move_to(x) {
                self.push_steer(steer);
            }
        }

        pub fn pointer_up(&mut self) {
            if let Some(steer) = self.drag.end() {
                self.push_steer(steer);
            }
        }

        pub fn resize(&mut self, container_width: f32) {
            self.session.resize(Bounds::from_container(container_width));
        }

        pub fn set_setting(&mut self, name: &str, value: &str) {
            if let Err(e) = self.session.apply_setting(name, value) {
                log::warn!("{e}");
            }
        }

        /// Advance one frame; returns this frame's events as JSON
        pub fn frame(&mut self) -> String {
            let now = self.clock.now();
            let idle_mode = self.input.idle_mode;
            let input = std::mem::replace(
                &mut self.input,
                TickInput {
                    idle_mode,
                    ..Default::default()
                },
            );
            let events = self.session.update(now, &input);
            serde_json::to_string(&events).unwrap_or_else(|e| {
                log::warn!("Failed to encode events: {e}");
                "[]".to_string()
            })
        }

        /// Live items as JSON, for drawing
        pub fn items(&self) -> String {
            serde_json::to_string(&self.session.game().items).unwrap_or_else(|_| "[]".to_string())
        }

        pub fn catcher_x(&self) -> f32 {
            self.session.game().catcher.pos.x
        }

        pub fn catcher_y(&self) -> f32 {
            self.session.game().catcher.pos.y
        }

        pub fn catcher_width(&self) -> f32 {
            self.session.game().catcher.width
        }

        pub fn width(&self) -> f32 {
            self.session.game().bounds.width
        }

        pub fn height(&self) -> f32 {
            self.session.game().bounds.height
        }

        pub fn score(&self) -> u32 {
            self.session.game().score.min(u32::MAX as u64) as u32
        }

        pub fn lives(&self) -> u8 {
            self.session.game().lives
        }

        pub fn high_score(&self) -> u32 {
            self.session.high_score().min(u32::MAX as u64) as u32
        }

        pub fn phase(&self) -> String {
            self.session.phase().as_str().to_string()
        }

        pub fn message(&self) -> String {
            self.session.message().to_string()
        }

        /// Body to POST to the relay for an encouragement message
        pub fn encouragement_request(&mut self) -> String {
            self.relay_body(MessageRequest::Encouragement)
        }

        /// Body to POST to the relay for a star fact
        pub fn star_fact_request(&mut self) -> String {
            self.relay_body(MessageRequest::StarFact)
        }

        /// Hand the relay's reply back; the message surface is updated
        pub fn relay_reply(&mut self, status: u16, body: &str) {
            let Some(request) = self.pending_request.take() else {
                log::warn!("Relay reply with no request in flight");
                return;
            };
            let reply = relay::parse_relay_response(status, body);
            let generator = move |_: &str| -> Result<String, RelayError> { reply.clone() };
            self.session.request_message(&generator, request);
        }

        /// The request never got a reply (network down, ...)
        pub fn relay_failed(&mut self, reason: &str) {
            let Some(request) = self.pending_request.take() else {
                return;
            };
            let error = RelayError::Transport(reason.to_string());
            let generator = move |_: &str| -> Result<String, RelayError> { Err(error.clone()) };
            self.session.request_message(&generator, request);
        }
    }

    impl WebGame {
        /// Merge steering for the next frame; consecutive drags add up
        fn push_steer(&mut self, steer: Steer) {
            self.input.steer = match (self.input.steer, steer) {
                (Some(Steer::Drag { dx: a }), Steer::Drag { dx: b }) => {
                    Some(Steer::Drag { dx: a + b })
                }
                (_, steer) => Some(steer),
            };
        }

        fn relay_body(&mut self, request: MessageRequest) -> String {
            self.pending_request = Some(request);
            self.session.show_loading();
            let score = self.session.game().score;
            RelayRequest::new(request.prompt(score))
                .to_json()
                .unwrap_or_else(|e| {
                    log::warn!("{e}");
                    String::new()
                })
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }
        log::info!("Star Catcher starting...");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Star Catcher (native) starting...");
    log::info!("Native mode runs a headless autopilot game - serve the wasm build for the web version");

    let seed = match std::env::var("STAR_CATCHER_SEED") {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(seed) => seed,
            Err(e) => {
                log::warn!("Ignoring STAR_CATCHER_SEED={raw:?}: {e}");
                rand::random()
            }
        },
        Err(_) => rand::random(),
    };

    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use star_catcher::Session;
    use star_catcher::consts::FRAME_MS;
    use star_catcher::persistence::FileStore;
    use star_catcher::platform::{Clock, ManualClock};
    use star_catcher::sim::{Bounds, GameEvent, GamePhase, TickInput};

    /// Ten simulated minutes
    const MAX_TICKS: u64 = 37_500;

    pub fn run(seed: u64) {
        let store = FileStore::new(FileStore::default_path());
        log::info!("Storage: {}", store.path().display());

        let mut session = Session::new(store, seed, Bounds::default());
        let clock = ManualClock::new(0);
        log::info!("{}", session.message());

        let mut input = TickInput {
            start: true,
            idle_mode: true,
            ..Default::default()
        };
        let (mut caught, mut lost, mut powerups) = (0u32, 0u32, 0u32);

        for _ in 0..MAX_TICKS {
            let now = clock.advance(FRAME_MS);
            for event in session.update(now, &input) {
                match event {
                    GameEvent::StarCaught { .. } => caught += 1,
                    GameEvent::LifeLost { cause, .. } => {
                        lost += 1;
                        log::info!("Life lost ({cause:?}) at score {}", session.game().score);
                    }
                    GameEvent::PowerUpCaught { kind, .. } => {
                        powerups += 1;
                        log::info!("{}", kind.label());
                    }
                    _ => {}
                }
            }
            input.start = false;
            if session.phase() == GamePhase::GameOver {
                break;
            }
        }

        let game = session.game();
        if game.phase == GamePhase::Running {
            log::info!("Stopped after {MAX_TICKS} ticks with the run still going");
        } else {
            log::info!("{}", session.message());
        }
        println!(
            "seed {seed}: score {} | stars {caught} | power-ups {powerups} | lives lost {lost} | ticks {} | best {}",
            game.score,
            game.time_ticks,
            session.high_score()
        );
    }
}
