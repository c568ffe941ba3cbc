//! Game settings and preferences
//!
//! Loaded from a JSON file on native builds. Layout tables are compiled in;
//! only aim tolerances, timings and audio preferences are configurable here.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::GameResult;
use crate::sim::level::Level;

/// Hit-zone tuning for the aim resolver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimTuning {
    /// Share of the play-area width covered by column bands (centered)
    pub column_fraction: f32,
    /// Vertical extent of the row bands, as fractions of the play-area height
    pub row_top: f32,
    pub row_bottom: f32,
    /// Horizontal gate for row aiming, as fractions of the play-area width
    pub row_left: f32,
    pub row_right: f32,
    /// Closest accepted pointer distance from the center on the hexagon level
    pub hexagon_min_distance: f32,
    /// Farthest accepted distance on the hexagon level, as a fraction of the
    /// play area's shorter side
    pub hexagon_max_fraction: f32,
    pub circle_min_distance: f32,
    pub circle_max_fraction: f32,
}

impl Default for AimTuning {
    fn default() -> Self {
        Self {
            column_fraction: 0.8,
            row_top: 0.15,
            row_bottom: 0.55,
            row_left: 0.1,
            row_right: 0.9,
            hexagon_min_distance: 20.0,
            hexagon_max_fraction: 0.3,
            circle_min_distance: 30.0,
            circle_max_fraction: 0.35,
        }
    }
}

impl AimTuning {
    /// Radial hit range `(min, max)` for a level on a play area of `size`
    pub fn radial_range(&self, level: Level, size: Vec2) -> (f32, f32) {
        let (min, fraction) = if level.number() == 5 {
            (self.circle_min_distance, self.circle_max_fraction)
        } else {
            (self.hexagon_min_distance, self.hexagon_max_fraction)
        };
        (min, size.min_element() * fraction)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level a fresh session starts on (1-5, falls back to 1)
    pub starting_level: u8,

    // === Audio ===
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Timings ===
    /// How long a rejection hint stays on screen
    pub hint_duration_secs: f32,
    /// Pause between finishing a level and the next timer starting
    pub transition_delay_secs: f32,
    /// Spacing between staggered basket egg releases
    pub basket_release_stagger_secs: f32,

    pub aim: AimTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_level: 1,
            sound_enabled: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            hint_duration_secs: 1.5,
            transition_delay_secs: 1.5,
            basket_release_stagger_secs: 0.2,
            aim: AimTuning::default(),
        }
    }
}

impl Settings {
    /// Effective sound volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.sound_enabled {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn starting_level(&self) -> Level {
        Level::or_first(self.starting_level)
    }

    pub fn from_json(json: &str) -> GameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from disk, using defaults when missing or unreadable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring settings file {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> GameResult<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}
