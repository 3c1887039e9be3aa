//! Star Catcher - a falling-star catcher arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (catcher, spawning, collisions, power-ups)
//! - `session`: Long-lived game session (settings, high score, current run)
//! - `platform`: Clock sources and input mapping
//! - `persistence`: Durable key-value stores
//! - `relay`: Text-generation relay contract and message surface strings

pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod relay;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{RelayError, SettingsError, StorageError};
pub use highscores::HighScore;
pub use session::Session;
pub use settings::{Settings, SpawnVariant};

/// Monotonic time in milliseconds
pub type Millis = u64;

/// Game configuration constants
pub mod consts {
    use std::ops::RangeInclusive;

    use crate::Millis;

    /// Default play field (4:3)
    pub const BOUNDS_WIDTH: f32 = 800.0;
    pub const BOUNDS_HEIGHT: f32 = 600.0;
    /// Share of the container width the play field may use
    pub const CONTAINER_FILL: f32 = 0.9;

    /// Catcher defaults
    pub const CATCHER_WIDTH: f32 = 100.0;
    pub const CATCHER_HEIGHT: f32 = 20.0;
    /// Distance from the bottom bound to the catcher's top edge
    pub const CATCHER_FLOOR_OFFSET: f32 = 60.0;

    /// Falling item defaults
    pub const ITEM_SIZE: f32 = 30.0;
    /// Items appear just above the top bound
    pub const SPAWN_Y: f32 = -20.0;
    /// Horizontal margin that keeps a fresh item on-screen
    pub const SPAWN_MARGIN: f32 = 20.0;
    pub const SPAWN_INTERVAL_MS: Millis = 1000;

    /// Scoring
    pub const STAR_POINTS: u64 = 10;
    pub const STARTING_LIVES: u8 = 3;

    /// Power-ups
    pub const WIDEN_FACTOR: f32 = 1.5;
    pub const WIDEN_DURATION_MS: Millis = 5000;
    pub const SLOWDOWN_FACTOR: f32 = 0.3;
    pub const SLOWDOWN_DURATION_MS: Millis = 7000;

    /// Pointer drag delta -> catcher velocity scale
    pub const DRAG_SENSITIVITY: f32 = 0.5;

    /// Accepted ranges for the player knobs (pixels per tick, scale)
    pub const CATCHER_SPEED_RANGE: RangeInclusive<f32> = 1.0..=20.0;
    pub const STAR_SPEED_RANGE: RangeInclusive<f32> = 1.0..=15.0;
    pub const DRAG_SENSITIVITY_RANGE: RangeInclusive<f32> = 0.1..=2.0;

    /// Frame length used by headless runners (~60 Hz)
    pub const FRAME_MS: Millis = 16;
}
