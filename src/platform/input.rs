//! Input mapping
//!
//! Turns raw key names and pointer positions into [`Steer`] commands for the
//! next tick. Keys steer at full speed; drags steer by the pointer delta.

use crate::sim::{Direction, Steer};

/// Direction for a steering key, by `KeyboardEvent.key` name
pub fn key_direction(key: &str) -> Option<Direction> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}

/// Steering for a key press or release. Releasing a steering key stops the
/// catcher; other keys are ignored.
pub fn key_steer(key: &str, pressed: bool) -> Option<Steer> {
    let direction = key_direction(key)?;
    Some(Steer::Key(if pressed { direction } else { Direction::None }))
}

/// Tracks one pointer drag gesture
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerDrag {
    last_x: Option<f32>,
}

impl PointerDrag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.last_x.is_some()
    }

    pub fn begin(&mut self, x: f32) {
        if x.is_finite() {
            self.last_x = Some(x);
        }
    }

    /// Pointer moved; yields the delta since the previous position
    pub fn move_to(&mut self, x: f32) -> Option<Steer> {
        let last = self.last_x?;
        if !x.is_finite() {
            return None;
        }
        self.last_x = Some(x);
        Some(Steer::Drag { dx: x - last })
    }

    /// Gesture over; the catcher stops
    pub fn end(&mut self) -> Option<Steer> {
        self.last_x
            .take()
            .map(|_| Steer::Key(Direction::None))
    }
}
