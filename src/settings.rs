//! Game settings and preferences
//!
//! Persisted separately from the high score in the same key-value store.
//! Every knob is clamped into its range; bad input never reaches the
//! simulation.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::consts::DRAG_SENSITIVITY;
pub use crate::consts::{CATCHER_SPEED_RANGE, DRAG_SENSITIVITY_RANGE, STAR_SPEED_RANGE};
use crate::error::{SettingsError, StorageError};
use crate::persistence::KeyValueStore;
use crate::sim::{GameConfig, SpawnTable};

/// Which items can spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpawnVariant {
    /// Stars, bombs and the widen power-up
    Classic,
    /// Adds the slowdown power-up
    #[default]
    WithSlowdown,
}

impl SpawnVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnVariant::Classic => "Classic",
            SpawnVariant::WithSlowdown => "WithSlowdown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(SpawnVariant::Classic),
            "withslowdown" | "slowdown" | "slow" => Some(SpawnVariant::WithSlowdown),
            _ => None,
        }
    }

    pub fn spawn_table(&self) -> SpawnTable {
        match self {
            SpawnVariant::Classic => SpawnTable::classic(),
            SpawnVariant::WithSlowdown => SpawnTable::with_slowdown(),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Catcher speed, pixels per tick
    pub catcher_speed: f32,
    /// Base fall speed, pixels per tick
    pub star_speed: f32,
    /// Pointer drag -> velocity scale
    pub drag_sensitivity: f32,
    pub spawn_variant: SpawnVariant,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catcher_speed: 7.0,
            star_speed: 3.0,
            drag_sensitivity: DRAG_SENSITIVITY,
            spawn_variant: SpawnVariant::WithSlowdown,
        }
    }
}

/// Clamp into range; non-finite input keeps the current value
fn clamp_knob(current: f32, value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        current
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "star_catcher_settings";

    pub fn set_catcher_speed(&mut self, value: f32) {
        self.catcher_speed = clamp_knob(self.catcher_speed, value, &CATCHER_SPEED_RANGE);
    }

    pub fn set_star_speed(&mut self, value: f32) {
        self.star_speed = clamp_knob(self.star_speed, value, &STAR_SPEED_RANGE);
    }

    pub fn set_drag_sensitivity(&mut self, value: f32) {
        self.drag_sensitivity = clamp_knob(self.drag_sensitivity, value, &DRAG_SENSITIVITY_RANGE);
    }

    /// Apply a raw knob value as it arrives from a slider or config line.
    ///
    /// Recognized names: `catcherSpeed`, `starSpeed`, `dragSensitivity`
    /// (snake_case also accepted) and `spawnVariant`. On error nothing changes.
    pub fn apply_knob(&mut self, name: &str, raw: &str) -> Result<(), SettingsError> {
        let parse = || {
            raw.trim()
                .parse::<f32>()
                .map_err(|_| SettingsError::InvalidValue {
                    name: name.to_string(),
                    value: raw.to_string(),
                })
        };
        match name {
            "catcherSpeed" | "catcher_speed" => self.set_catcher_speed(parse()?),
            "starSpeed" | "star_speed" => self.set_star_speed(parse()?),
            "dragSensitivity" | "drag_sensitivity" => self.set_drag_sensitivity(parse()?),
            "spawnVariant" | "spawn_variant" => {
                self.spawn_variant = SpawnVariant::from_str(raw.trim()).ok_or_else(|| {
                    SettingsError::InvalidValue {
                        name: name.to_string(),
                        value: raw.to_string(),
                    }
                })?;
            }
            _ => return Err(SettingsError::UnknownKnob(name.to_string())),
        }
        Ok(())
    }

    /// Re-clamp every knob (after deserializing untrusted data)
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.catcher_speed = clamp_knob(
            defaults.catcher_speed,
            self.catcher_speed,
            &CATCHER_SPEED_RANGE,
        );
        self.star_speed = clamp_knob(defaults.star_speed, self.star_speed, &STAR_SPEED_RANGE);
        self.drag_sensitivity = clamp_knob(
            defaults.drag_sensitivity,
            self.drag_sensitivity,
            &DRAG_SENSITIVITY_RANGE,
        );
        self
    }

    /// Simulation parameters for a new run
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            catcher_speed: self.catcher_speed,
            star_speed: self.star_speed,
            drag_sensitivity: self.drag_sensitivity,
            spawn_table: self.spawn_variant.spawn_table(),
        }
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    let settings = settings.sanitized();
                    log::info!(
                        "Loaded settings ({} spawns)",
                        settings.spawn_variant.as_str()
                    );
                    return settings;
                }
                Err(e) => log::warn!("Ignoring stored settings: {e}"),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {e}"),
        }
        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        store.set(Self::STORAGE_KEY, &serde_json::to_string(self)?)?;
        log::info!("Settings saved");
        Ok(())
    }
}
