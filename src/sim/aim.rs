//! Aim resolution
//!
//! Maps a raw pointer coordinate to a target line. Column and row levels
//! split the play area into equal bands; the hexagon and circle levels split
//! the plane around the center into six sectors and gate on distance.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::layout::{AimMode, LevelLayout};
use super::level::Level;
use crate::consts::RADIAL_SECTORS;
use crate::settings::AimTuning;
use crate::{cartesian_to_polar, normalize_angle, polar_to_cartesian};

/// Screen geometry supplied by the presentation layer (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub origin: Vec2,
    pub size: Vec2,
    /// Hub of the radial levels
    pub center: Vec2,
}

impl PlayArea {
    /// Play area with the hub at its middle
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self {
            origin,
            size,
            center: origin + size / 2.0,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.origin).all() && point.cmplt(self.origin + self.size).all()
    }
}

/// Outcome of resolving one pointer position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AimResult {
    Target(usize),
    /// Radial aim inside the inner circle; show a hint rather than ignoring it
    TooClose,
    Miss,
}

impl AimResult {
    pub fn line(&self) -> Option<usize> {
        match self {
            AimResult::Target(line) => Some(*line),
            _ => None,
        }
    }
}

/// Hint shown when a radial aim is too close to the center
pub const TOO_CLOSE_HINT: &str = AimMode::Radial.miss_hint();

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimResolver {
    pub area: PlayArea,
    pub tuning: AimTuning,
}

impl AimResolver {
    pub fn new(area: PlayArea, tuning: AimTuning) -> Self {
        Self { area, tuning }
    }

    pub fn resolve(&self, level: Level, point: Vec2) -> AimResult {
        let layout = LevelLayout::for_level(level);
        let lines = layout.line_count();
        match layout.aim {
            AimMode::Columns => self.resolve_column(point, lines),
            AimMode::Rows => self.resolve_row(point, lines),
            AimMode::Radial => self.resolve_radial(level, point),
        }
    }

    /// Left edge and width of the column bands
    fn column_span(&self) -> (f32, f32) {
        let frac = self.tuning.column_fraction.clamp(0.0, 1.0);
        let width = self.area.size.x * frac;
        let left = self.area.origin.x + (self.area.size.x - width) / 2.0;
        (left, width)
    }

    /// Top edge and height of the row bands
    fn row_span(&self) -> (f32, f32) {
        let top = self.area.origin.y + self.area.size.y * self.tuning.row_top;
        let bottom = self.area.origin.y + self.area.size.y * self.tuning.row_bottom;
        (top, (bottom - top).max(0.0))
    }

    fn resolve_column(&self, point: Vec2, lines: usize) -> AimResult {
        if !self.area.contains(point) {
            return AimResult::Miss;
        }
        let (left, width) = self.column_span();
        band_index(point.x - left, width, lines).map_or(AimResult::Miss, AimResult::Target)
    }

    fn resolve_row(&self, point: Vec2, lines: usize) -> AimResult {
        let gate_left = self.area.origin.x + self.area.size.x * self.tuning.row_left;
        let gate_right = self.area.origin.x + self.area.size.x * self.tuning.row_right;
        if point.x < gate_left || point.x > gate_right {
            return AimResult::Miss;
        }
        let (top, height) = self.row_span();
        band_index(point.y - top, height, lines).map_or(AimResult::Miss, AimResult::Target)
    }

    fn resolve_radial(&self, level: Level, point: Vec2) -> AimResult {
        let (min, max) = self.tuning.radial_range(level, self.area.size);

        // Screen space: y grows downward, so sectors advance clockwise
        let (distance, angle) = cartesian_to_polar(point - self.area.center);
        let sector = TAU / RADIAL_SECTORS as f32;
        let shifted = normalize_angle(angle + sector / 2.0);
        let index = (shifted / sector).floor() as usize;
        if index >= RADIAL_SECTORS {
            return AimResult::Miss;
        }

        if distance < min {
            AimResult::TooClose
        } else if distance > max {
            AimResult::Miss
        } else {
            AimResult::Target(index)
        }
    }

    /// A point in the middle of a line's hit zone
    pub fn target_point(&self, level: Level, line: usize) -> Option<Vec2> {
        let layout = LevelLayout::for_level(level);
        let lines = layout.line_count();
        if line >= lines {
            return None;
        }
        let mid = |start: f32, extent: f32| start + extent * (line as f32 + 0.5) / lines as f32;
        let point = match layout.aim {
            AimMode::Columns => {
                let (left, width) = self.column_span();
                Vec2::new(mid(left, width), self.area.center.y)
            }
            AimMode::Rows => {
                let (top, height) = self.row_span();
                Vec2::new(self.area.center.x, mid(top, height))
            }
            AimMode::Radial => {
                let (min, max) = self.tuning.radial_range(level, self.area.size);
                let theta = TAU * line as f32 / RADIAL_SECTORS as f32;
                self.area.center + polar_to_cartesian((min + max) / 2.0, theta)
            }
        };
        Some(point)
    }
}

/// Which of `count` equal bands over `[0, extent)` contains `offset`
fn band_index(offset: f32, extent: f32, count: usize) -> Option<usize> {
    if count == 0 || extent <= 0.0 || offset < 0.0 || offset >= extent {
        return None;
    }
    let index = (offset / (extent / count as f32)).floor() as usize;
    Some(index.min(count - 1))
}
