//! Collision detection and item resolution
//!
//! Each tick every falling item moves down by the current fall speed and ends
//! up in exactly one bucket, checked in this order:
//! 1. caught: its box overlaps the catcher's box
//! 2. missed: it fell past the bottom bound
//! 3. in flight: kept for the next tick
//!
//! Items are processed newest first (reverse spawn order) in a single pass.
//! When a life loss ends the run, the pass stops right there: items not yet
//! visited keep their previous position and are never resolved, because a
//! finished run does not tick again.

use glam::Vec2;

use super::catcher::Catcher;
use super::powerup::PowerUpKind;
use super::state::{FallingItem, GameEvent, GameState, ItemKind, LifeLossCause};
use crate::Millis;
use crate::consts::STAR_POINTS;

/// Outcome of one item for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Caught,
    Missed,
    InFlight,
}

/// Strict axis-aligned overlap; boxes that only touch do not collide
#[inline]
pub fn rects_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.y + a_size.y > b_pos.y
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.x < b_pos.x + b_size.x
        && a_pos.y < b_pos.y + b_size.y
}

/// Classify an item that has already been advanced this tick
pub fn classify(item: &FallingItem, catcher: &Catcher, bounds_height: f32) -> Resolution {
    let (catcher_pos, catcher_size) = catcher.rect();
    if rects_overlap(item.pos, Vec2::splat(item.size), catcher_pos, catcher_size) {
        Resolution::Caught
    } else if item.pos.y > bounds_height {
        Resolution::Missed
    } else {
        Resolution::InFlight
    }
}

/// Advance and resolve every item. Returns true if the pass was cut short by
/// game over.
pub fn resolve_items(state: &mut GameState, now: Millis) -> bool {
    let fall_speed = state.fall_speed();

    let mut i = state.items.len();
    while i > 0 {
        i -= 1;
        state.items[i].pos.y += fall_speed;

        let ended = match classify(&state.items[i], &state.catcher, state.bounds.height) {
            Resolution::InFlight => false,
            Resolution::Caught => {
                let item = state.items.remove(i);
                on_caught(state, item, now)
            }
            Resolution::Missed => {
                let item = state.items.remove(i);
                on_missed(state, item)
            }
        };

        if ended {
            log::debug!("Resolution halted with {} items left unvisited", i);
            return true;
        }
    }
    false
}

fn on_caught(state: &mut GameState, item: FallingItem, now: Millis) -> bool {
    match item.kind {
        ItemKind::Star => {
            state.score += STAR_POINTS;
            state.events.push(GameEvent::StarCaught {
                pos: item.pos,
                points: STAR_POINTS,
            });
            false
        }
        ItemKind::Bomb => state.lose_life(item.pos, LifeLossCause::BombCaught),
        ItemKind::WidenPowerUp => {
            let bounds_width = state.bounds.width;
            state
                .powerups
                .activate_widen(&mut state.catcher, bounds_width, now);
            state.events.push(GameEvent::PowerUpCaught {
                pos: item.pos,
                kind: PowerUpKind::Widen,
            });
            false
        }
        ItemKind::SlowdownPowerUp => {
            state.powerups.activate_slowdown(now);
            state.events.push(GameEvent::PowerUpCaught {
                pos: item.pos,
                kind: PowerUpKind::Slowdown,
            });
            false
        }
    }
}

fn on_missed(state: &mut GameState, item: FallingItem) -> bool {
    match item.kind {
        ItemKind::Star => state.lose_life(item.pos, LifeLossCause::StarMissed),
        // Missed bombs and power-ups just leave the field
        ItemKind::Bomb | ItemKind::WidenPowerUp | ItemKind::SlowdownPowerUp => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Bounds, GameConfig, GamePhase};

    fn running_state() -> GameState {
        let mut state = GameState::new(11, GameConfig::default(), Bounds::default(), 0);
        state.restart(0);
        state.take_events();
        state
    }

    /// An item that will overlap the catcher after one step
    fn item_on_catcher(state: &GameState, kind: ItemKind) -> FallingItem {
        let x = state.catcher.pos.x + 10.0;
        let y = state.catcher.pos.y - state.fall_speed();
        FallingItem::new(kind, Vec2::new(x, y))
    }

    /// An item that will be below the bottom bound after one step
    fn item_past_bottom(state: &GameState, kind: ItemKind) -> FallingItem {
        FallingItem::new(kind, Vec2::new(5.0, state.bounds.height))
    }

    #[test]
    fn test_rects_overlap_is_strict() {
        let size = Vec2::splat(10.0);
        assert!(rects_overlap(Vec2::ZERO, size, Vec2::new(5.0, 5.0), size));
        // Touching edges
        assert!(!rects_overlap(Vec2::ZERO, size, Vec2::new(10.0, 0.0), size));
        assert!(!rects_overlap(Vec2::ZERO, size, Vec2::new(0.0, 10.0), size));
    }

    #[test]
    fn test_classify_catch_wins_over_miss() {
        let mut state = running_state();
        state.bounds.height = state.catcher.pos.y;
        let item = FallingItem::new(
            ItemKind::Star,
            Vec2::new(state.catcher.pos.x, state.catcher.pos.y + 1.0),
        );
        assert_eq!(
            classify(&item, &state.catcher, state.bounds.height),
            Resolution::Caught
        );
    }

    #[test]
    fn test_catching_star_scores_ten() {
        let mut state = running_state();
        let item = item_on_catcher(&state, ItemKind::Star);
        state.items.push(item);

        assert!(!resolve_items(&mut state, 100));
        assert_eq!(state.score, STAR_POINTS);
        assert_eq!(state.lives, STARTING_LIVES);
        assert!(state.items.is_empty());
        assert!(matches!(
            state.events.as_slice(),
            [GameEvent::StarCaught { points: 10, .. }]
        ));
    }

    #[test]
    fn test_catching_bomb_costs_life() {
        let mut state = running_state();
        let item = item_on_catcher(&state, ItemKind::Bomb);
        state.items.push(item);

        resolve_items(&mut state, 100);
        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.score, 0);
        assert!(state.items.is_empty());
        assert!(!state.events[0].is_positive());
    }

    #[test]
    fn test_catching_power_ups_activates_them() {
        let mut state = running_state();
        let widen = item_on_catcher(&state, ItemKind::WidenPowerUp);
        let slow = item_on_catcher(&state, ItemKind::SlowdownPowerUp);
        state.items.push(widen);
        state.items.push(slow);

        resolve_items(&mut state, 250);
        assert!(state.items.is_empty());
        assert_eq!(state.catcher.width, CATCHER_WIDTH * WIDEN_FACTOR);
        assert_eq!(state.powerups.widen.expires_at(), Some(250 + WIDEN_DURATION_MS));
        assert_eq!(
            state.powerups.slowdown.expires_at(),
            Some(250 + SLOWDOWN_DURATION_MS)
        );
        assert!(state.events.iter().all(GameEvent::is_positive));
        assert_eq!(state.lives, STARTING_LIVES);
    }

    #[test]
    fn test_missing_star_costs_life_but_others_do_not() {
        let mut state = running_state();
        for kind in [
            ItemKind::Bomb,
            ItemKind::WidenPowerUp,
            ItemKind::SlowdownPowerUp,
        ] {
            let item = item_past_bottom(&state, kind);
            state.items.push(item);
        }
        resolve_items(&mut state, 100);
        assert!(state.items.is_empty());
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.score, 0);
        assert!(state.events.is_empty());

        let star = item_past_bottom(&state, ItemKind::Star);
        state.items.push(star);
        resolve_items(&mut state, 116);
        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert!(matches!(
            state.events.as_slice(),
            [GameEvent::LifeLost {
                cause: LifeLossCause::StarMissed,
                ..
            }]
        ));
    }

    #[test]
    fn test_in_flight_items_advance() {
        let mut state = running_state();
        state.items.push(FallingItem::new(ItemKind::Star, Vec2::new(5.0, SPAWN_Y)));
        resolve_items(&mut state, 16);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].pos.y, SPAWN_Y + state.config.star_speed);
    }

    #[test]
    fn test_slowdown_scales_fall_speed() {
        let mut state = running_state();
        state.powerups.activate_slowdown(0);
        state.items.push(FallingItem::new(ItemKind::Star, Vec2::new(5.0, 0.0)));
        resolve_items(&mut state, 16);
        let expected = state.config.star_speed * SLOWDOWN_FACTOR;
        assert!((state.items[0].pos.y - expected).abs() < 1e-5);
    }

    #[test]
    fn test_bad_star_speed_keeps_items_resolving() {
        let mut state = running_state();
        state.set_star_speed(f32::NAN);
        state.set_star_speed(-3.0);
        state.items.push(FallingItem::new(ItemKind::Bomb, Vec2::new(5.0, SPAWN_Y)));
        for tick in 0..2000 {
            resolve_items(&mut state, tick);
            if state.items.is_empty() {
                break;
            }
            assert!(state.items[0].pos.y.is_finite());
        }
        assert!(state.items.is_empty(), "item left the field");
    }

    #[test]
    fn test_game_over_halts_pass_newest_first() {
        let mut state = running_state();
        state.lives = 1;
        // Oldest first in the registry; the newest bomb is resolved first
        let older = item_on_catcher(&state, ItemKind::Star);
        let newer = item_on_catcher(&state, ItemKind::Bomb);
        let older_y = older.pos.y;
        state.items.push(older);
        state.items.push(newer);

        assert!(resolve_items(&mut state, 100));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);
        assert_eq!(state.score, 0);
        // The star was never visited: still registered, not advanced
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].kind, ItemKind::Star);
        assert_eq!(state.items[0].pos.y, older_y);
    }
}
