//! Level numbers and the ball color palette

use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_COUNT;
use crate::error::{GameError, GameResult};

/// Ball colors available to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallColor {
    Red,
    Blue,
    Yellow,
    Green,
    Purple,
    Orange,
}

impl BallColor {
    /// Full palette in selector order
    pub const ALL: [BallColor; 6] = [
        BallColor::Red,
        BallColor::Blue,
        BallColor::Yellow,
        BallColor::Green,
        BallColor::Purple,
        BallColor::Orange,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BallColor::Red => "red",
            BallColor::Blue => "blue",
            BallColor::Yellow => "yellow",
            BallColor::Green => "green",
            BallColor::Purple => "purple",
            BallColor::Orange => "orange",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
    }
}

/// A validated level number (1-5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const FIRST: Level = Level(1);
    pub const LAST: Level = Level(LEVEL_COUNT);

    pub fn new(number: u8) -> GameResult<Self> {
        if (1..=LEVEL_COUNT).contains(&number) {
            Ok(Level(number))
        } else {
            Err(GameError::InvalidLevel(number))
        }
    }

    /// Level number for a level-select entry point, falling back to level 1
    pub fn or_first(number: u8) -> Self {
        Self::new(number).unwrap_or_else(|err| {
            log::warn!("{err}, starting at level 1");
            Level::FIRST
        })
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// Zero-based index into per-level tables
    pub fn index(&self) -> usize {
        (self.0 - 1) as usize
    }

    pub fn is_last(&self) -> bool {
        *self == Level::LAST
    }

    /// The following level, or `None` after the last one
    pub fn next(&self) -> Option<Level> {
        if self.is_last() { None } else { Some(Level(self.0 + 1)) }
    }

    pub fn all() -> impl Iterator<Item = Level> {
        (1..=LEVEL_COUNT).map(Level)
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::FIRST
    }
}

impl TryFrom<u8> for Level {
    type Error = GameError;

    fn try_from(value: u8) -> GameResult<Self> {
        Level::new(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_bounds() {
        assert!(Level::new(0).is_err());
        assert!(Level::new(6).is_err());
        assert_eq!(Level::new(3).unwrap().index(), 2);
        assert_eq!(Level::or_first(42), Level::FIRST);
        assert_eq!(Level::or_first(4).number(), 4);
    }

    #[test]
    fn test_level_next() {
        assert_eq!(Level::FIRST.next(), Level::new(2).ok());
        assert_eq!(Level::LAST.next(), None);
        assert_eq!(Level::all().count(), 5);
    }

    #[test]
    fn test_level_serde_rejects_out_of_range() {
        let level: Level = serde_json::from_str("2").unwrap();
        assert_eq!(level.number(), 2);
        assert!(serde_json::from_str::<Level>("7").is_err());
    }

    #[test]
    fn test_color_names() {
        assert_eq!(BallColor::from_str("Purple"), Some(BallColor::Purple));
        assert_eq!(BallColor::from_str("teal"), None);
        assert_eq!(BallColor::Green.name(), "green");
    }
}
