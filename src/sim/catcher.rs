//! The player's catcher

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Bounds;
use crate::consts::*;

/// Horizontal steering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    None,
    Right,
}

impl Direction {
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::None => 0.0,
            Direction::Right => 1.0,
        }
    }
}

/// Horizontally moving collector. `pos` is the top-left corner; y never changes
/// once placed.
#[derive(Debug, Clone, PartialEq)]
pub struct Catcher {
    pub pos: Vec2,
    pub base_width: f32,
    /// Current width: base, or widened by a power-up
    pub width: f32,
    pub height: f32,
    /// Configured speed (pixels per tick)
    pub speed: f32,
    /// Current horizontal velocity, always within [-speed, speed]
    pub vel_x: f32,
    /// A width modifier is in effect
    pub widened: bool,
}

impl Catcher {
    pub fn new(bounds: &Bounds, speed: f32) -> Self {
        let mut catcher = Self {
            pos: Vec2::ZERO,
            base_width: CATCHER_WIDTH,
            width: CATCHER_WIDTH,
            height: CATCHER_HEIGHT,
            speed: *CATCHER_SPEED_RANGE.start(),
            vel_x: 0.0,
            widened: false,
        };
        catcher.set_speed(speed);
        catcher.place(bounds);
        catcher
    }

    /// Center horizontally and sit on the catcher line
    pub fn place(&mut self, bounds: &Bounds) {
        self.pos = Vec2::new(bounds.width / 2.0 - self.width / 2.0, bounds.catcher_y());
        self.clamp_to(bounds.width);
    }

    /// Keyboard-style steering: full speed or stop
    pub fn steer(&mut self, direction: Direction) {
        self.vel_x = direction.sign() * self.speed;
    }

    /// Pointer-style steering: velocity proportional to the drag, capped at speed
    pub fn drag(&mut self, velocity: f32) {
        if velocity.is_nan() {
            return;
        }
        self.vel_x = velocity.clamp(-self.speed, self.speed);
    }

    /// Clamp into the knob range; non-finite input is ignored
    pub fn set_speed(&mut self, speed: f32) {
        if !speed.is_finite() {
            return;
        }
        self.speed = speed.clamp(*CATCHER_SPEED_RANGE.start(), *CATCHER_SPEED_RANGE.end());
        self.vel_x = self.vel_x.clamp(-self.speed, self.speed);
    }

    /// Move by the current velocity and stay inside the field
    pub fn apply_velocity(&mut self, bounds_width: f32) {
        self.pos.x += self.vel_x;
        self.clamp_to(bounds_width);
    }

    /// Keep x within [0, bounds_width - width]; a catcher wider than the field
    /// sits at 0
    pub fn clamp_to(&mut self, bounds_width: f32) {
        let max_x = (bounds_width - self.width).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }

    /// Set width to `base * multiplier` and re-clamp for the new footprint
    pub(crate) fn set_width_multiplier(&mut self, multiplier: f32, bounds_width: f32) {
        self.width = self.base_width * multiplier;
        self.widened = multiplier != 1.0;
        self.clamp_to(bounds_width);
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    /// Bounding box as (top-left, size)
    pub fn rect(&self) -> (Vec2, Vec2) {
        (self.pos, Vec2::new(self.width, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_catcher_starts_centered() {
        let catcher = Catcher::new(&Bounds::default(), 7.0);
        assert!((catcher.pos.x - 350.0).abs() < 0.001);
        assert!((catcher.pos.y - 540.0).abs() < 0.001);
        assert_eq!(catcher.width, CATCHER_WIDTH);
    }

    #[test]
    fn test_apply_velocity_clamps_left_and_right() {
        let bounds = Bounds::default();
        let mut catcher = Catcher::new(&bounds, 20.0);

        catcher.steer(Direction::Left);
        for _ in 0..50 {
            catcher.apply_velocity(bounds.width);
        }
        assert_eq!(catcher.pos.x, 0.0);

        catcher.steer(Direction::Right);
        for _ in 0..100 {
            catcher.apply_velocity(bounds.width);
        }
        assert_eq!(catcher.pos.x, bounds.width - catcher.width);

        catcher.steer(Direction::None);
        catcher.apply_velocity(bounds.width);
        assert_eq!(catcher.pos.x, bounds.width - catcher.width);
    }

    #[test]
    fn test_drag_is_capped_at_speed() {
        let mut catcher = Catcher::new(&Bounds::default(), 5.0);
        catcher.drag(42.0);
        assert_eq!(catcher.vel_x, 5.0);
        catcher.drag(-2.5);
        assert_eq!(catcher.vel_x, -2.5);
        catcher.drag(f32::NAN);
        assert_eq!(catcher.vel_x, -2.5);
    }

    #[test]
    fn test_set_speed_reclamps_velocity() {
        let mut catcher = Catcher::new(&Bounds::default(), 10.0);
        catcher.steer(Direction::Right);
        catcher.set_speed(4.0);
        assert_eq!(catcher.vel_x, 4.0);
        catcher.set_speed(f32::INFINITY);
        assert_eq!(catcher.speed, 4.0);
    }

    #[test]
    fn test_speed_clamped_to_knob_range() {
        let mut catcher = Catcher::new(&Bounds::default(), 400.0);
        assert_eq!(catcher.speed, *CATCHER_SPEED_RANGE.end());
        catcher.set_speed(-5.0);
        assert_eq!(catcher.speed, *CATCHER_SPEED_RANGE.start());
        let catcher = Catcher::new(&Bounds::default(), f32::NAN);
        assert_eq!(catcher.speed, *CATCHER_SPEED_RANGE.start());
    }

    #[test]
    fn test_widening_at_right_edge_pulls_catcher_in() {
        let bounds = Bounds::default();
        let mut catcher = Catcher::new(&bounds, 7.0);
        catcher.pos.x = bounds.width - catcher.width;

        catcher.set_width_multiplier(WIDEN_FACTOR, bounds.width);
        assert!(catcher.widened);
        assert_eq!(catcher.width, 150.0);
        assert_eq!(catcher.pos.x, bounds.width - 150.0);

        catcher.set_width_multiplier(1.0, bounds.width);
        assert!(!catcher.widened);
        assert_eq!(catcher.width, CATCHER_WIDTH);
    }

    #[test]
    fn test_catcher_wider_than_field_sits_at_origin() {
        let bounds = Bounds::new(60.0, 200.0);
        let mut catcher = Catcher::new(&bounds, 7.0);
        catcher.steer(Direction::Right);
        catcher.apply_velocity(bounds.width);
        assert_eq!(catcher.pos.x, 0.0);
    }

    proptest! {
        #[test]
        fn prop_catcher_stays_in_bounds(
            width in 120.0f32..1600.0,
            speed in 0.0f32..60.0,
            moves in proptest::collection::vec((-3i8..=3, any::<bool>()), 1..200),
        ) {
            let bounds = Bounds::new(width, 600.0);
            let mut catcher = Catcher::new(&bounds, speed);
            for (step, widen) in moves {
                catcher.drag(step as f32 * speed);
                if widen {
                    let m = if catcher.widened { 1.0 } else { WIDEN_FACTOR };
                    catcher.set_width_multiplier(m, bounds.width);
                }
                catcher.apply_velocity(bounds.width);
                prop_assert!(catcher.pos.x >= 0.0);
                prop_assert!(catcher.pos.x <= bounds.width - catcher.width + 1e-3);
            }
        }
    }
}
