//! Error types for the gameplay engine.
//!
//! Nothing here is fatal. `ThrowRejection` is a soft failure shown to the
//! player as a hint; `GameError` covers the remaining boundary conditions.

use std::io;

use crate::sim::layout::AimMode;
use crate::sim::level::BallColor;

/// Why a throw was refused. The `Display` text doubles as the on-screen hint.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowRejection {
    #[error("{}", .0.miss_hint())]
    NoTarget(AimMode),

    #[error("Use {} ball for this {}!", .required.name(), .aim.line_noun())]
    WrongColor { required: BallColor, aim: AimMode },

    #[error("No balls left in this {}!", .0.line_noun())]
    LineEmpty(AimMode),

    #[error("Not accepting throws right now")]
    NotPlaying,
}

impl ThrowRejection {
    /// Whether the rejection should be surfaced to the player
    pub fn is_player_facing(&self) -> bool {
        !matches!(self, ThrowRejection::NotPlaying)
    }
}

/// Main error type for session-level operations.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Invalid level index: {0}")]
    InvalidLevel(u8),

    #[error("Restart is disabled in tournament mode")]
    RestartDisabled,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
