//! Idle/demo mode - the game plays itself
//!
//! Dodging wins over chasing: a bomb about to land on the catcher's
//! footprint pushes it away. Otherwise the catcher chases the lowest star or
//! power-up it can still reach.

use super::catcher::Direction;
use super::state::GameState;

/// How far above the catcher a bomb is considered a threat
const BOMB_HORIZON: f32 = 140.0;
/// Extra clearance kept around the catcher when dodging
const DODGE_MARGIN: f32 = 12.0;

/// Pick a steering direction for this tick
pub fn steer(state: &GameState) -> Direction {
    let catcher = &state.catcher;
    let left = catcher.pos.x - DODGE_MARGIN;
    let right = catcher.pos.x + catcher.width + DODGE_MARGIN;
    let top = catcher.pos.y;

    let threat = state
        .items
        .iter()
        .filter(|item| !item.kind.is_wanted())
        .filter(|item| item.pos.y + item.size > top - BOMB_HORIZON && item.pos.y < top)
        .filter(|item| item.pos.x + item.size > left && item.pos.x < right)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(bomb) = threat {
        // Run toward the side with more room
        let room_left = bomb.center().x;
        let room_right = state.bounds.width - bomb.center().x;
        return if room_left > room_right {
            Direction::Left
        } else {
            Direction::Right
        };
    }

    let target = state
        .items
        .iter()
        .filter(|item| item.kind.is_wanted())
        .filter(|item| item.pos.y < top + catcher.height)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let Some(target) = target else {
        return Direction::None;
    };

    let delta = target.center().x - catcher.center_x();
    // Dead zone avoids jittering around the target
    if delta.abs() <= catcher.speed.max(1.0) {
        Direction::None
    } else if delta < 0.0 {
        Direction::Left
    } else {
        Direction::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bounds, FallingItem, GameConfig, ItemKind};
    use glam::Vec2;

    fn running_state() -> GameState {
        let mut state = GameState::new(5, GameConfig::default(), Bounds::default(), 0);
        state.restart(0);
        state
    }

    #[test]
    fn test_idle_without_items() {
        let state = running_state();
        assert_eq!(steer(&state), Direction::None);
    }

    #[test]
    fn test_chases_lowest_star() {
        let mut state = running_state();
        state.items.push(FallingItem::new(ItemKind::Star, Vec2::new(700.0, 300.0)));
        state.items.push(FallingItem::new(ItemKind::Star, Vec2::new(20.0, 100.0)));
        assert_eq!(steer(&state), Direction::Right);
    }

    #[test]
    fn test_ignores_items_already_below() {
        let mut state = running_state();
        let below = state.catcher.pos.y + 40.0;
        state.items.push(FallingItem::new(ItemKind::Star, Vec2::new(700.0, below)));
        state.items.push(FallingItem::new(ItemKind::Star, Vec2::new(20.0, 100.0)));
        assert_eq!(steer(&state), Direction::Left);
    }

    #[test]
    fn test_dodges_bomb_overhead() {
        let mut state = running_state();
        // Catcher is centered at 400; bomb lands on its right half
        let y = state.catcher.pos.y - 60.0;
        state.items.push(FallingItem::new(ItemKind::Bomb, Vec2::new(420.0, y)));
        state.items.push(FallingItem::new(ItemKind::Star, Vec2::new(700.0, y)));
        assert_eq!(steer(&state), Direction::Left);
    }

    #[test]
    fn test_settles_under_target() {
        let mut state = running_state();
        let x = state.catcher.center_x() - 15.0;
        state.items.push(FallingItem::new(ItemKind::Star, Vec2::new(x, 200.0)));
        assert_eq!(steer(&state), Direction::None);
    }
}
