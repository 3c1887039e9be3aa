//! Item spawning
//!
//! At most one item per spawn interval. The kind comes from a single uniform
//! draw checked against cumulative thresholds; first match wins.

use glam::Vec2;
use rand::Rng;

use super::state::{FallingItem, GamePhase, ItemKind};
use crate::Millis;
use crate::consts::*;

/// Cumulative thresholds for one draw `r` in [0, 1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTable {
    /// r < bomb -> Bomb
    pub bomb: f64,
    /// r < widen -> widen power-up
    pub widen: f64,
    /// r < slowdown -> slowdown power-up (absent in the classic table)
    pub slowdown: Option<f64>,
}

impl SpawnTable {
    /// 15% bombs, 5% widen, 5% slowdown, 75% stars
    pub const fn with_slowdown() -> Self {
        Self {
            bomb: 0.15,
            widen: 0.20,
            slowdown: Some(0.25),
        }
    }

    /// 15% bombs, 5% widen, 80% stars (no slowdown power-up)
    pub const fn classic() -> Self {
        Self {
            bomb: 0.15,
            widen: 0.20,
            slowdown: None,
        }
    }

    pub fn classify(&self, r: f64) -> ItemKind {
        if r < self.bomb {
            ItemKind::Bomb
        } else if r < self.widen {
            ItemKind::WidenPowerUp
        } else if self.slowdown.is_some_and(|t| r < t) {
            ItemKind::SlowdownPowerUp
        } else {
            ItemKind::Star
        }
    }
}

impl Default for SpawnTable {
    fn default() -> Self {
        Self::with_slowdown()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    pub interval: Millis,
    pub last_spawn: Millis,
    pub table: SpawnTable,
}

impl Spawner {
    pub fn new(table: SpawnTable) -> Self {
        Self {
            interval: SPAWN_INTERVAL_MS,
            last_spawn: 0,
            table,
        }
    }

    /// Create an item if more than one interval has passed since the last one
    /// and the run is live. Updates `last_spawn` when it fires.
    pub fn maybe_spawn<R: Rng>(
        &mut self,
        phase: GamePhase,
        now: Millis,
        bounds_width: f32,
        rng: &mut R,
    ) -> Option<FallingItem> {
        if phase != GamePhase::Running || now.saturating_sub(self.last_spawn) <= self.interval {
            return None;
        }

        let kind = self.table.classify(rng.random::<f64>());
        let x = spawn_x(bounds_width, rng);
        self.last_spawn = now;
        log::trace!("Spawned {kind:?} at x={x:.1}");
        Some(FallingItem::new(kind, Vec2::new(x, SPAWN_Y)))
    }
}

/// Uniform in [margin, width - margin]; collapses to the center on a narrow field
fn spawn_x<R: Rng>(bounds_width: f32, rng: &mut R) -> f32 {
    let lo = SPAWN_MARGIN;
    let hi = bounds_width - SPAWN_MARGIN;
    if hi <= lo {
        return (bounds_width / 2.0).max(0.0);
    }
    rng.random_range(lo..=hi)
}
