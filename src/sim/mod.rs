//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in from the caller, never from a clock
//! - Seeded RNG only
//! - Stable iteration order (newest item first when resolving)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod catcher;
pub mod collision;
pub mod powerup;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use catcher::{Catcher, Direction};
pub use collision::{Resolution, classify, rects_overlap, resolve_items};
pub use powerup::{PowerUpEffect, PowerUpKind, PowerUps};
pub use spawn::{SpawnTable, Spawner};
pub use state::{
    Bounds, FallingItem, GameConfig, GameEvent, GamePhase, GameState, ItemKind, LifeLossCause,
};
pub use tick::{Steer, TickInput, tick};
pub use timer::{TimerHandle, TimerQueue};
