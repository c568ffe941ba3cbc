//! Chicken Eggs - level gameplay engine
//!
//! Core modules:
//! - `sim`: Board, layouts, aiming, throw rules, scoring and the session state machine
//! - `audio`: Sound collaborator interface and volume gating
//! - `tournament`: Tournament score reporting with an at-most-once guard
//! - `settings`: Player preferences and aim tuning
//! - `error`: Error types shared across the crate

pub mod audio;
pub mod error;
pub mod settings;
pub mod sim;
pub mod tournament;

pub use error::{GameError, GameResult, ThrowRejection};
pub use settings::{AimTuning, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per countdown second (60 Hz fixed step)
    pub const TICKS_PER_SECOND: u64 = 60;

    /// Number of playable levels
    pub const LEVEL_COUNT: u8 = 5;

    /// Sectors on the radial levels (hexagon and circle)
    pub const RADIAL_SECTORS: usize = 6;

    /// Remaining seconds at which the countdown warning starts sounding
    pub const TIME_WARNING_SECS: u32 = 10;
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
