//! Long-lived game session
//!
//! Owns the things that outlive a single run: the storage backend, the
//! settings, the best score and the message surface. The current run is a
//! [`GameState`] that gets rebuilt on every start.

use crate::Millis;
use crate::error::SettingsError;
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::relay::{self, MessageRequest, TextGenerator, messages};
use crate::settings::Settings;
use crate::sim::{Bounds, GameEvent, GamePhase, GameState, TickInput, tick};

pub struct Session<S: KeyValueStore> {
    store: S,
    settings: Settings,
    high_score: HighScore,
    game: GameState,
    message: String,
}

impl<S: KeyValueStore> Session<S> {
    /// Load settings and the best score, then sit idle until the first start
    pub fn new(store: S, seed: u64, bounds: Bounds) -> Self {
        let settings = Settings::load(&store);
        let high_score = HighScore::load(&store);
        let game = GameState::new(seed, settings.game_config(), bounds, high_score.best());
        Self {
            store,
            settings,
            high_score,
            game,
            message: messages::WELCOME.to_string(),
        }
    }

    /// Start a new run (also used for "play again")
    pub fn start(&mut self, now: Millis) {
        self.game.config = self.settings.game_config();
        self.game.high_score = self.high_score.best();
        self.game.restart(now);
        self.message.clear();
    }

    /// Advance one frame and return the feedback it produced
    pub fn update(&mut self, now: Millis, input: &TickInput) -> Vec<GameEvent> {
        if input.start {
            self.game.config = self.settings.game_config();
            self.game.high_score = self.high_score.best();
        }
        tick(&mut self.game, input, now);
        let events = self.game.take_events();
        for event in &events {
            match event {
                GameEvent::GameStarted => self.message.clear(),
                GameEvent::GameOver {
                    final_score,
                    new_high_score,
                } => {
                    self.message = messages::game_over(*final_score);
                    if *new_high_score && self.high_score.record(*final_score) {
                        if let Err(e) = self.high_score.save(&mut self.store) {
                            log::warn!("Failed to save high score: {e}");
                        }
                    }
                }
                _ => {}
            }
        }
        events
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn phase(&self) -> GamePhase {
        self.game.phase
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current message-surface text
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn resize(&mut self, bounds: Bounds) {
        self.game.resize(bounds);
    }

    /// Change one knob. Speeds apply to the live run immediately, the spawn
    /// variant from the next run on.
    pub fn apply_setting(&mut self, name: &str, raw: &str) -> Result<(), SettingsError> {
        self.settings.apply_knob(name, raw)?;
        self.game.set_catcher_speed(self.settings.catcher_speed);
        self.game.set_star_speed(self.settings.star_speed);
        self.game.config.drag_sensitivity = self.settings.drag_sensitivity;
        self.game.config.spawn_table = self.settings.spawn_variant.spawn_table();
        if let Err(e) = self.settings.save(&mut self.store) {
            log::warn!("Failed to save settings: {e}");
        }
        Ok(())
    }

    /// A relay request is in flight
    pub fn show_loading(&mut self) {
        self.message = messages::LOADING.to_string();
    }

    /// Ask the relay for a message and put the result on the message surface.
    /// The run is untouched whatever the outcome.
    pub fn request_message(&mut self, generator: &impl TextGenerator, request: MessageRequest) {
        self.message = relay::request_message(generator, request, self.game.score);
    }
}
