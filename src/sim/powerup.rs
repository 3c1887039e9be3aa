//! Timed power-up effects
//!
//! Two independent effects: widen (catcher width x1.5 for 5 s) and slowdown
//! (fall speed x0.3 for 7 s). Re-triggering an active effect replaces its
//! pending expiry with a fresh one; durations never stack. Each expiry only
//! reverts the attribute its own effect changed.

use serde::{Deserialize, Serialize};

use super::catcher::Catcher;
use super::timer::{TimerHandle, TimerQueue};
use crate::Millis;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Widen,
    Slowdown,
}

impl PowerUpKind {
    pub fn duration(&self) -> Millis {
        match self {
            PowerUpKind::Widen => WIDEN_DURATION_MS,
            PowerUpKind::Slowdown => SLOWDOWN_DURATION_MS,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Widen => "MEGA CATCHER!",
            PowerUpKind::Slowdown => "SLOW TIME!",
        }
    }
}

/// One timed effect
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerUpEffect {
    pending: Option<TimerHandle>,
}

impl PowerUpEffect {
    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    /// When the effect will wear off, if active
    pub fn expires_at(&self) -> Option<Millis> {
        self.pending.map(|h| h.due())
    }
}

/// Active effects plus their pending expiries
#[derive(Debug, Clone, Default)]
pub struct PowerUps {
    pub widen: PowerUpEffect,
    pub slowdown: PowerUpEffect,
    timers: TimerQueue<PowerUpKind>,
}

impl PowerUps {
    /// Widen the catcher now; it reverts `WIDEN_DURATION_MS` after the latest activation
    pub fn activate_widen(&mut self, catcher: &mut Catcher, bounds_width: f32, now: Millis) {
        catcher.set_width_multiplier(WIDEN_FACTOR, bounds_width);
        self.arm(PowerUpKind::Widen, now);
    }

    /// Slow all falling items now; normal speed returns `SLOWDOWN_DURATION_MS`
    /// after the latest activation
    pub fn activate_slowdown(&mut self, now: Millis) {
        self.arm(PowerUpKind::Slowdown, now);
    }

    /// Multiplier applied to the base fall speed
    pub fn fall_speed_multiplier(&self) -> f32 {
        if self.slowdown.is_active() {
            SLOWDOWN_FACTOR
        } else {
            1.0
        }
    }

    /// Fire every expiry due at or before `now`, returning the effects that ended
    pub fn expire_due(
        &mut self,
        catcher: &mut Catcher,
        bounds_width: f32,
        now: Millis,
    ) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        while let Some((due, kind)) = self.timers.pop_due(now) {
            match kind {
                PowerUpKind::Widen => {
                    self.widen.pending = None;
                    catcher.set_width_multiplier(1.0, bounds_width);
                }
                PowerUpKind::Slowdown => {
                    self.slowdown.pending = None;
                }
            }
            log::debug!("{kind:?} expired (due {due}, now {now})");
            expired.push(kind);
        }
        expired
    }

    /// Expiries still waiting to fire
    pub fn pending_expiries(&self) -> usize {
        self.timers.len()
    }

    /// Earliest pending expiry
    pub fn next_expiry(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    fn arm(&mut self, kind: PowerUpKind, now: Millis) {
        let due = now.saturating_add(kind.duration());
        let effect = match kind {
            PowerUpKind::Widen => &mut self.widen,
            PowerUpKind::Slowdown => &mut self.slowdown,
        };
        if let Some(previous) = effect.pending.take() {
            self.timers.cancel(previous);
            log::trace!("{kind:?} refreshed, was due {}", previous.due());
        }
        effect.pending = Some(self.timers.schedule(due, kind));
        log::debug!("{kind:?} active until {due}");
    }
}
