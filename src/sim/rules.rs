//! Throw resolution and egg collection
//!
//! A throw is checked against the target line's color and contents, then
//! clears the whole line in one step and collects every egg the clear
//! uncovered. Rejections never touch the board.

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::layout::OcclusionPolicy;
use super::level::BallColor;
use crate::error::ThrowRejection;

/// Where a collected egg came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EggSource {
    /// On-board egg at a position
    Board { position: u8 },
    /// The n-th egg released from a basket (0-based)
    Basket { index: u8 },
}

/// One egg awarded by a throw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedEgg {
    pub line: usize,
    pub source: EggSource,
    pub points: u64,
}

/// Result of an accepted throw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrowOutcome {
    pub line: usize,
    pub color: BallColor,
    /// Cleared ball positions, nearest-to-thrower first
    pub cleared: Vec<u8>,
    pub collected: Vec<CollectedEgg>,
}

impl ThrowOutcome {
    pub fn points(&self) -> u64 {
        self.collected.iter().map(|e| e.points).sum()
    }
}

/// Validate and apply a throw at `target` with the selected `color`
pub fn resolve_throw(
    board: &mut Board,
    target: Option<usize>,
    color: BallColor,
) -> Result<ThrowOutcome, ThrowRejection> {
    let layout = board.layout();

    let line = target
        .filter(|&line| line < layout.line_count())
        .ok_or(ThrowRejection::NoTarget(layout.aim))?;

    let required = layout.line_colors[line];
    if required != color {
        return Err(ThrowRejection::WrongColor {
            required,
            aim: layout.aim,
        });
    }

    if board.balls_in(line).is_empty() {
        return Err(ThrowRejection::LineEmpty(layout.aim));
    }

    let cleared = board.clear_line(line);
    let collected = collect_eggs(board, line);

    log::debug!(
        "Throw {} at line {}: cleared {} balls, collected {} eggs",
        color.name(),
        line,
        cleared.len(),
        collected.len()
    );

    Ok(ThrowOutcome {
        line,
        color,
        cleared,
        collected,
    })
}

/// Collect whatever the current board state allows on a line
pub fn collect_eggs(board: &mut Board, line: usize) -> Vec<CollectedEgg> {
    let layout = board.layout();
    let points = layout.points_per_egg;

    match layout.occlusion {
        OcclusionPolicy::Basket => {
            if !board.balls_in(line).is_empty() {
                return Vec::new();
            }
            let released = board.empty_basket(line);
            (0..released)
                .map(|index| CollectedEgg {
                    line,
                    source: EggSource::Basket { index },
                    points,
                })
                .collect()
        }
        OcclusionPolicy::Row => {
            let positions: Vec<u8> = board.eggs_in(line).iter().map(|e| e.position).collect();
            positions
                .into_iter()
                .filter(|&position| board.collect_egg(line, position))
                .map(|position| CollectedEgg {
                    line,
                    source: EggSource::Board { position },
                    points,
                })
                .collect()
        }
        OcclusionPolicy::RadialInner | OcclusionPolicy::GridBelow => {
            let positions: Vec<u8> = board.eggs_in(line).iter().map(|e| e.position).collect();
            let mut collected = Vec::new();
            for position in positions {
                if is_occluded(board, line, position) {
                    break;
                }
                if board.collect_egg(line, position) {
                    collected.push(CollectedEgg {
                        line,
                        source: EggSource::Board { position },
                        points,
                    });
                }
            }
            collected
        }
    }
}

/// Whether a visible ball still hides the egg at `(line, position)`
pub fn is_occluded(board: &Board, line: usize, position: u8) -> bool {
    let blocking = |ball_pos: u8| match board.layout().occlusion {
        OcclusionPolicy::RadialInner => ball_pos > 0 && ball_pos < position,
        OcclusionPolicy::GridBelow => ball_pos > position,
        OcclusionPolicy::Basket | OcclusionPolicy::Row => false,
    };
    board
        .balls()
        .iter()
        .any(|b| b.visible && b.line == line && blocking(b.position))
}
