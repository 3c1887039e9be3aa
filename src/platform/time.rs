//! Clock sources

use std::cell::Cell;

use crate::Millis;

/// Monotonic time source in milliseconds
pub trait Clock {
    fn now(&self) -> Millis;
}

/// Wall clock of the host: `Instant` on native, `Date.now()` in the browser
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
    #[cfg(target_arch = "wasm32")]
    start: f64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            start: std::time::Instant::now(),
            #[cfg(target_arch = "wasm32")]
            start: js_sys::Date::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    fn now(&self) -> Millis {
        self.start.elapsed().as_millis() as Millis
    }

    #[cfg(target_arch = "wasm32")]
    fn now(&self) -> Millis {
        (js_sys::Date::now() - self.start).max(0.0) as Millis
    }
}

/// Hand-driven clock for headless runs and tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, ms: Millis) -> Millis {
        let now = self.now.get().saturating_add(ms);
        self.now.set(now);
        now
    }

    /// Jump to an absolute time. Never moves backwards.
    pub fn set(&self, now: Millis) {
        self.now.set(self.now.get().max(now));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}
