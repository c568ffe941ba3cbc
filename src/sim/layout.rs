//! Level layout tables
//!
//! Every level is described by one `LevelLayout` entry. Shared code in the
//! aim resolver and the rule engine interprets the table; per-level behavior
//! is selected through the small `AimMode` / `OcclusionPolicy` / `ClearOrder`
//! enums rather than per-level branches.

use serde::{Deserialize, Serialize};

use super::board::{BallCell, Basket, Board, EggCell};
use super::level::{BallColor, Level};

/// Board shape of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    ThreeColumns,
    Triangle,
    Hexagon,
    Rectangle,
    Circle,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::ThreeColumns => "Three Columns",
            Shape::Triangle => "Triangle",
            Shape::Hexagon => "Hexagon",
            Shape::Rectangle => "Rectangle",
            Shape::Circle => "Circle",
        }
    }
}

/// How a pointer coordinate maps to a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AimMode {
    /// Equal-width vertical bands
    Columns,
    /// Equal-height horizontal bands
    Rows,
    /// Six angular sectors around the center
    Radial,
}

impl AimMode {
    /// Hint shown when a release lands outside every line
    pub const fn miss_hint(&self) -> &'static str {
        match self {
            AimMode::Columns => "Aim at one of the colored columns!",
            AimMode::Rows => "Aim at one of the colored rows!",
            AimMode::Radial => "Aim between the inner and outer circles!",
        }
    }

    /// Player-facing name of one line. Radial arms read as columns.
    pub fn line_noun(&self) -> &'static str {
        match self {
            AimMode::Rows => "row",
            AimMode::Columns | AimMode::Radial => "column",
        }
    }
}

/// Which eggs become collectible after a line is cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OcclusionPolicy {
    /// Eggs wait off-board in a basket and are released all at once
    Basket,
    /// Every egg in the row is released, no blocking
    Row,
    /// Blocked by visible balls between the center and the egg
    RadialInner,
    /// Blocked by visible balls below the egg in the same column
    GridBelow,
}

/// Order in which a line's balls are reported when cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClearOrder {
    /// Highest position first (bottom of a column / end of a row)
    Descending,
    /// Lowest position first (innermost ring first)
    Ascending,
}

/// Compiled-in description of one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelLayout {
    pub shape: Shape,
    pub aim: AimMode,
    pub occlusion: OcclusionPolicy,
    pub clear_order: ClearOrder,
    /// Required ball color per line
    pub line_colors: &'static [BallColor],
    /// Ball positions per line
    pub ball_slots: &'static [&'static [u8]],
    /// On-board egg positions per line
    pub egg_slots: &'static [&'static [u8]],
    /// Off-board egg count per line (basket levels only)
    pub basket_eggs: &'static [u8],
    pub points_per_egg: u64,
    pub duration_secs: u32,
    pub total_eggs: u32,
}

const SIX_COLORS: &[BallColor] = &[
    BallColor::Red,
    BallColor::Blue,
    BallColor::Yellow,
    BallColor::Green,
    BallColor::Purple,
    BallColor::Orange,
];

const THREE_COLUMNS: LevelLayout = LevelLayout {
    shape: Shape::ThreeColumns,
    aim: AimMode::Columns,
    occlusion: OcclusionPolicy::Basket,
    clear_order: ClearOrder::Descending,
    line_colors: &[BallColor::Red, BallColor::Green, BallColor::Orange],
    ball_slots: &[&[0, 1, 2, 3], &[0, 1, 2, 3], &[0, 1, 2, 3]],
    egg_slots: &[&[], &[], &[]],
    basket_eggs: &[2, 3, 4],
    points_per_egg: 100,
    duration_secs: 90,
    total_eggs: 9,
};

const TRIANGLE: LevelLayout = LevelLayout {
    shape: Shape::Triangle,
    aim: AimMode::Rows,
    occlusion: OcclusionPolicy::Row,
    clear_order: ClearOrder::Descending,
    line_colors: &[BallColor::Red, BallColor::Blue, BallColor::Yellow],
    ball_slots: &[&[0, 1, 2], &[0, 1], &[0]],
    egg_slots: &[&[0, 1, 2], &[0, 1], &[0]],
    basket_eggs: &[],
    points_per_egg: 80,
    duration_secs: 120,
    total_eggs: 6,
};

// Radial slot 0 is the center, so arms start at 1. On arms 2 and 4 the egg
// sits under the ball at slot 2 and is still hidden by the ball at slot 1.
const HEXAGON: LevelLayout = LevelLayout {
    shape: Shape::Hexagon,
    aim: AimMode::Radial,
    occlusion: OcclusionPolicy::RadialInner,
    clear_order: ClearOrder::Ascending,
    line_colors: SIX_COLORS,
    ball_slots: &[&[1, 3], &[1, 2], &[1, 2, 3], &[1, 2], &[1, 2, 3], &[1, 2]],
    egg_slots: &[&[2], &[3], &[2], &[3], &[2], &[3]],
    basket_eggs: &[],
    points_per_egg: 120,
    duration_secs: 150,
    total_eggs: 6,
};

// Columns of a 6x6 grid, row 0 at the top. Balls below an egg hide it.
const RECTANGLE: LevelLayout = LevelLayout {
    shape: Shape::Rectangle,
    aim: AimMode::Columns,
    occlusion: OcclusionPolicy::GridBelow,
    clear_order: ClearOrder::Descending,
    line_colors: SIX_COLORS,
    ball_slots: &[
        &[0, 1, 3, 4, 5],
        &[1, 2, 3, 4, 5],
        &[0, 1, 2, 3, 5],
        &[0, 2, 3, 4, 5],
        &[0, 1, 2, 4, 5],
        &[0, 1, 2, 3, 5],
    ],
    egg_slots: &[&[2], &[0], &[4], &[1], &[3], &[4]],
    basket_eggs: &[],
    points_per_egg: 100,
    duration_secs: 180,
    total_eggs: 6,
};

// Outermost ring (slot 5) never holds a ball.
const CIRCLE: LevelLayout = LevelLayout {
    shape: Shape::Circle,
    aim: AimMode::Radial,
    occlusion: OcclusionPolicy::RadialInner,
    clear_order: ClearOrder::Ascending,
    line_colors: SIX_COLORS,
    ball_slots: &[
        &[1, 2, 4],
        &[1, 2, 3],
        &[1, 3],
        &[1, 2, 4],
        &[1, 3, 4],
        &[1, 2],
    ],
    egg_slots: &[&[3, 5], &[4, 5], &[2, 4], &[3, 5], &[2, 5], &[3, 4]],
    basket_eggs: &[],
    points_per_egg: 150,
    duration_secs: 210,
    total_eggs: 12,
};

/// Layout table indexed by `Level::index()`
pub static LAYOUTS: [LevelLayout; 5] = [THREE_COLUMNS, TRIANGLE, HEXAGON, RECTANGLE, CIRCLE];

impl LevelLayout {
    pub fn for_level(level: Level) -> &'static LevelLayout {
        &LAYOUTS[level.index()]
    }

    pub fn line_count(&self) -> usize {
        self.line_colors.len()
    }

    pub fn color_of(&self, line: usize) -> Option<BallColor> {
        self.line_colors.get(line).copied()
    }

    /// Eggs attached to a line, on-board or in a basket
    pub fn eggs_per_line(&self, line: usize) -> u32 {
        let on_board = self.egg_slots.get(line).map_or(0, |s| s.len() as u32);
        let held = self.basket_eggs.get(line).map_or(0, |&n| n as u32);
        on_board + held
    }

    pub fn ball_total(&self) -> usize {
        self.ball_slots.iter().map(|s| s.len()).sum()
    }

    /// Distinct line colors in line order
    pub fn colors(&self) -> Vec<BallColor> {
        let mut colors = Vec::with_capacity(self.line_colors.len());
        for &c in self.line_colors {
            if !colors.contains(&c) {
                colors.push(c);
            }
        }
        colors
    }
}

/// Build a fresh board for a level from its layout table
pub fn generate(level: Level) -> Board {
    let layout = LevelLayout::for_level(level);
    let mut next_id = 1u32;
    let mut alloc = || {
        let id = next_id;
        next_id += 1;
        id
    };

    let mut balls = Vec::with_capacity(layout.ball_total());
    for (line, slots) in layout.ball_slots.iter().enumerate() {
        let color = layout.line_colors[line];
        for &position in slots.iter() {
            balls.push(BallCell {
                id: alloc(),
                line,
                position,
                color,
                visible: true,
            });
        }
    }

    let mut eggs = Vec::new();
    for (line, slots) in layout.egg_slots.iter().enumerate() {
        for &position in slots.iter() {
            eggs.push(EggCell {
                id: alloc(),
                line,
                position,
                visible: true,
                collected: false,
            });
        }
    }

    let baskets = layout
        .basket_eggs
        .iter()
        .enumerate()
        .map(|(column, &count)| Basket {
            id: alloc(),
            column,
            color: layout.line_colors[column],
            egg_count: count,
            max_egg_count: count,
        })
        .collect();

    log::debug!(
        "Generated level {} ({}): {} balls, {} eggs, {} baskets",
        level,
        layout.shape.as_str(),
        balls.len(),
        eggs.len(),
        layout.basket_eggs.len()
    );

    Board::new(level, balls, eggs, baskets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_egg_totals_match_table() {
        let expected = [9, 6, 6, 6, 12];
        for (level, want) in Level::all().zip(expected) {
            let layout = LevelLayout::for_level(level);
            let sum: u32 = (0..layout.line_count()).map(|l| layout.eggs_per_line(l)).sum();
            assert_eq!(sum, want, "level {level}");
            assert_eq!(layout.total_eggs, want);
        }
    }

    #[test]
    fn test_ball_counts() {
        let expected = [12, 6, 14, 30, 16];
        for (level, want) in Level::all().zip(expected) {
            let board = generate(level);
            assert_eq!(board.visible_ball_count(), want, "level {level}");
        }
    }

    #[test]
    fn test_tables_are_consistent() {
        for level in Level::all() {
            let layout = LevelLayout::for_level(level);
            let lines = layout.line_count();
            assert_eq!(layout.ball_slots.len(), lines);
            assert_eq!(layout.egg_slots.len(), lines);
            assert!(layout.basket_eggs.is_empty() || layout.basket_eggs.len() == lines);

            for line in 0..lines {
                let balls = layout.ball_slots[line];
                let eggs = layout.egg_slots[line];
                let mut seen = balls.to_vec();
                seen.sort_unstable();
                seen.dedup();
                assert_eq!(seen.len(), balls.len(), "duplicate ball slot on level {level}");
                let mut eggs_seen = eggs.to_vec();
                eggs_seen.sort_unstable();
                eggs_seen.dedup();
                assert_eq!(eggs_seen.len(), eggs.len(), "duplicate egg slot on level {level} line {line}");
            }
        }
    }

    #[test]
    fn test_level_one_baskets() {
        let board = generate(Level::FIRST);
        let counts: Vec<u8> = board.baskets().iter().map(|b| b.egg_count).collect();
        assert_eq!(counts, vec![2, 3, 4]);
        assert_eq!(board.uncollected_egg_count(), 0);
        assert_eq!(board.balls_in(0).len(), 4);
    }

    #[test]
    fn test_rectangle_grid_is_six_by_six() {
        let layout = LevelLayout::for_level(Level::new(4).unwrap());
        for line in 0..6 {
            let mut slots: Vec<u8> = layout.ball_slots[line].to_vec();
            slots.extend_from_slice(layout.egg_slots[line]);
            slots.sort_unstable();
            assert_eq!(slots, vec![0, 1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn test_radial_positions_start_at_one() {
        for number in [3, 5] {
            let layout = LevelLayout::for_level(Level::new(number).unwrap());
            assert_eq!(layout.line_count(), 6);
            for line in 0..6 {
                assert!(layout.ball_slots[line].iter().all(|&p| p >= 1));
                assert!(layout.egg_slots[line].iter().all(|&p| p >= 1));
            }
        }
    }

    #[test]
    fn test_hexagon_eggs_behind_balls() {
        let board = generate(Level::new(3).unwrap());
        let egg_rows: Vec<u8> = (0..6).map(|arm| board.eggs_in(arm)[0].position).collect();
        assert_eq!(egg_rows, vec![2, 3, 2, 3, 2, 3]);
        // Arm 0 leaves its egg slot open, arms 2 and 4 cover it
        assert!(board.ball_at(0, 2).is_none());
        assert!(board.ball_at(2, 2).is_some());
        assert!(board.ball_at(4, 2).is_some());
    }

    #[test]
    fn test_rectangle_and_circle_egg_slots() {
        let rect = LevelLayout::for_level(Level::new(4).unwrap());
        let rows: Vec<u8> = rect.egg_slots.iter().map(|s| s[0]).collect();
        assert_eq!(rows, vec![2, 0, 4, 1, 3, 4]);

        let circle = LevelLayout::for_level(Level::new(5).unwrap());
        assert_eq!(circle.egg_slots[1], &[4, 5]);
        for line in 0..6 {
            assert!(circle.ball_slots[line].iter().all(|&p| p <= 4));
            assert!(circle.ball_slots[line].iter().all(|p| !circle.egg_slots[line].contains(p)));
        }
    }

    #[test]
    fn test_ids_unique() {
        let board = generate(Level::new(5).unwrap());
        let mut ids: Vec<u32> = board.balls().iter().map(|b| b.id).collect();
        ids.extend(board.eggs().iter().map(|e| e.id));
        let n = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), n);
    }
}
