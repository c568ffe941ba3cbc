//! Fixed timestep simulation tick
//!
//! Applies one frame's worth of input to the session, then advances time.

use glam::Vec2;

use super::level::BallColor;
use super::session::Session;
use crate::audio::SoundPlayer;
use crate::tournament::ScoreReporter;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position while dragging
    pub pointer: Option<Vec2>,
    /// Pointer released here (throw)
    pub release: Option<Vec2>,
    /// Pick a ball color directly
    pub select_color: Option<BallColor>,
    /// Switch to the next ball color
    pub cycle_color: bool,
    /// Pause toggle
    pub pause: bool,
    /// Continue after a completed level
    pub continue_level: bool,
    pub restart_level: bool,
    pub restart_game: bool,
    /// Back to menu
    pub exit: bool,
}

/// Advance the session by one fixed timestep
pub fn tick<P: SoundPlayer, R: ScoreReporter>(session: &mut Session<P, R>, input: &TickInput) {
    if input.pause {
        session.toggle_pause();
    }

    if let Some(color) = input.select_color {
        session.select_color(color);
    }
    if input.cycle_color {
        session.cycle_color();
    }

    if let Some(point) = input.pointer {
        session.aim_move(point);
    }
    if let Some(point) = input.release {
        // Rejections surface as hints and events; nothing else to do here
        let _ = session.aim_release(point);
    }

    if input.continue_level {
        if let Err(err) = session.continue_level() {
            log::debug!("Continue ignored: {err}");
        }
    }
    if input.restart_level {
        if let Err(err) = session.restart_level() {
            log::debug!("Restart ignored: {err}");
        }
    }
    if input.restart_game {
        if let Err(err) = session.restart_game() {
            log::debug!("Game restart ignored: {err}");
        }
    }
    if input.exit {
        session.exit();
    }

    session.advance();
}
