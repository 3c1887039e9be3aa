//! Per-frame simulation tick
//!
//! Core game loop that advances one run by one frame.

use super::autopilot;
use super::catcher::Direction;
use super::collision::resolve_items;
use super::state::{GameEvent, GameState};
use crate::Millis;

/// A steering change requested by the player this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Steer {
    /// Key pressed or released: full speed one way, or stop
    Key(Direction),
    /// Pointer dragged by `dx` pixels since the last drag event
    Drag { dx: f32 },
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start a new run (first start and restart alike)
    pub start: bool,
    /// New steering, if any; otherwise the catcher keeps its velocity
    pub steer: Option<Steer>,
    /// Idle/demo mode - the autopilot steers
    pub idle_mode: bool,
}

/// Advance the run by one tick at time `now`.
///
/// Due power-up expiries fire first and in every phase, so an effect that
/// outlives its run still ends. Everything else only happens while Running:
/// catcher movement, then spawning, then item resolution.
pub fn tick(state: &mut GameState, input: &TickInput, now: Millis) {
    if input.start {
        state.restart(now);
    }

    let bounds_width = state.bounds.width;
    for kind in state
        .powerups
        .expire_due(&mut state.catcher, bounds_width, now)
    {
        state.events.push(GameEvent::PowerUpExpired { kind });
    }

    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;

    if input.idle_mode {
        let direction = autopilot::steer(state);
        state.catcher.steer(direction);
    } else if let Some(steer) = input.steer {
        match steer {
            Steer::Key(direction) => state.catcher.steer(direction),
            Steer::Drag { dx } => {
                let velocity = dx * state.config.drag_sensitivity;
                state.catcher.drag(velocity);
            }
        }
    }
    state.catcher.apply_velocity(bounds_width);

    let phase = state.phase;
    if let Some(item) = state
        .spawner
        .maybe_spawn(phase, now, bounds_width, &mut state.rng)
    {
        state.items.push(item);
    }

    resolve_items(state, now);
}
