//! Game state and core simulation types
//!
//! Everything one run of the game needs lives in [`GameState`]. A new run
//! replaces the whole value, so nothing (least of all a pending power-up
//! expiry) can leak from one run into the next.

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catcher::Catcher;
use super::powerup::{PowerUpKind, PowerUps};
use super::spawn::{SpawnTable, Spawner};
use crate::Millis;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start; nothing ticks
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, simulation frozen until the next start
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Running => "running",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Play field dimensions. The origin is the top-left corner, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: BOUNDS_WIDTH,
            height: BOUNDS_HEIGHT,
        }
    }
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Fit a 4:3 field into a container, capped at the default width
    pub fn from_container(container_width: f32) -> Self {
        let width = (container_width * CONTAINER_FILL).clamp(0.0, BOUNDS_WIDTH);
        Self::new(width, width * 0.75)
    }

    /// Top edge of the catcher
    pub fn catcher_y(&self) -> f32 {
        self.height - CATCHER_FLOOR_OFFSET
    }
}

/// What a falling item does when it is caught
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Star,
    Bomb,
    WidenPowerUp,
    SlowdownPowerUp,
}

impl ItemKind {
    /// The effect granted by catching this item, if it is a power-up
    pub fn power_up(&self) -> Option<PowerUpKind> {
        match self {
            ItemKind::WidenPowerUp => Some(PowerUpKind::Widen),
            ItemKind::SlowdownPowerUp => Some(PowerUpKind::Slowdown),
            ItemKind::Star | ItemKind::Bomb => None,
        }
    }

    /// Items the player wants in the catcher
    pub fn is_wanted(&self) -> bool {
        !matches!(self, ItemKind::Bomb)
    }
}

/// A falling item. `pos` is the top-left corner of its square bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingItem {
    pub kind: ItemKind,
    pub pos: Vec2,
    pub size: f32,
}

impl FallingItem {
    pub fn new(kind: ItemKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            size: ITEM_SIZE,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Why a life was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeLossCause {
    BombCaught,
    StarMissed,
}

/// Feedback produced by the simulation for the host to show or sound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    GameStarted,
    StarCaught { pos: Vec2, points: u64 },
    LifeLost { pos: Vec2, cause: LifeLossCause },
    PowerUpCaught { pos: Vec2, kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    GameOver { final_score: u64, new_high_score: bool },
}

impl GameEvent {
    /// Positive feedback (score, power-up) vs negative (life lost)
    pub fn is_positive(&self) -> bool {
        matches!(
            self,
            GameEvent::StarCaught { .. } | GameEvent::PowerUpCaught { .. }
        )
    }
}

/// Tunable parameters for a run, usually built from [`crate::Settings`]
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Catcher speed in pixels per tick
    pub catcher_speed: f32,
    /// Base fall speed in pixels per tick
    pub star_speed: f32,
    pub drag_sensitivity: f32,
    pub spawn_table: SpawnTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            catcher_speed: 7.0,
            star_speed: 3.0,
            drag_sensitivity: DRAG_SENSITIVITY,
            spawn_table: SpawnTable::with_slowdown(),
        }
    }
}

fn clamp_star_speed(current: f32, speed: f32) -> f32 {
    if speed.is_finite() {
        speed.clamp(*STAR_SPEED_RANGE.start(), *STAR_SPEED_RANGE.end())
    } else {
        current
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Best score known when the run started, raised at game over
    pub high_score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub bounds: Bounds,
    pub config: GameConfig,
    pub catcher: Catcher,
    /// Live items in spawn order (oldest first)
    pub items: Vec<FallingItem>,
    pub powerups: PowerUps,
    pub spawner: Spawner,
    /// Feedback since the host last drained it
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle run
    pub fn new(seed: u64, config: GameConfig, bounds: Bounds, high_score: u64) -> Self {
        let catcher = Catcher::new(&bounds, config.catcher_speed);
        let spawner = Spawner::new(config.spawn_table);
        let mut config = config;
        config.catcher_speed = catcher.speed;
        config.star_speed = clamp_star_speed(GameConfig::default().star_speed, config.star_speed);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            lives: STARTING_LIVES,
            high_score,
            time_ticks: 0,
            bounds,
            config,
            catcher,
            items: Vec::new(),
            powerups: PowerUps::default(),
            spawner,
            events: Vec::new(),
        }
    }

    /// Replace this run with a fresh one in the Running phase.
    ///
    /// First start and restart are the same transition. The catcher, item
    /// registry, power-ups and their timer queue are rebuilt, not reset.
    pub fn restart(&mut self, now: Millis) {
        let seed = self.rng.next_u64();
        let mut fresh = GameState::new(seed, self.config.clone(), self.bounds, self.high_score);
        fresh.phase = GamePhase::Running;
        fresh.spawner.last_spawn = now;
        fresh.events.push(GameEvent::GameStarted);
        log::info!("Run started (seed {seed}, best {})", fresh.high_score);
        *self = fresh;
    }

    /// Resize the play field; the catcher is re-centered as on a fresh layout
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.catcher.place(&bounds);
    }

    pub fn set_catcher_speed(&mut self, speed: f32) {
        self.catcher.set_speed(speed);
        self.config.catcher_speed = self.catcher.speed;
    }

    /// Clamped into the knob range; non-finite input is ignored
    pub fn set_star_speed(&mut self, speed: f32) {
        self.config.star_speed = clamp_star_speed(self.config.star_speed, speed);
    }

    /// Fall speed for this tick, slowdown included
    pub fn fall_speed(&self) -> f32 {
        self.config.star_speed * self.powerups.fall_speed_multiplier()
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Hand buffered feedback to the host
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Lose one life (never below zero); the last one ends the run.
    ///
    /// Returns true when this call ended the run.
    pub(crate) fn lose_life(&mut self, pos: Vec2, cause: LifeLossCause) -> bool {
        if self.lives == 0 {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost { pos, cause });
        log::debug!("Life lost ({cause:?}), {} left", self.lives);
        if self.lives == 0 {
            self.end();
            return true;
        }
        false
    }

    /// Running -> GameOver, exactly once per run
    pub(crate) fn end(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::GameOver;
        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
            new_high_score,
        });
        log::info!(
            "Game over: score {} (best {}{})",
            self.score,
            self.high_score,
            if new_high_score { ", new record" } else { "" }
        );
    }
}
