//! Board model for the active level
//!
//! Holds the ball, egg and basket cells produced by the layout generator.
//! Queries are public; mutation is crate-private so the rule engine stays the
//! only writer.

use serde::{Deserialize, Serialize};

use super::layout::{ClearOrder, LevelLayout};
use super::level::{BallColor, Level};

/// A throwable-target ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallCell {
    pub id: u32,
    pub line: usize,
    pub position: u8,
    pub color: BallColor,
    pub visible: bool,
}

/// A collectible egg on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggCell {
    pub id: u32,
    pub line: usize,
    pub position: u8,
    pub visible: bool,
    pub collected: bool,
}

impl EggCell {
    /// Still on the board and waiting to be collected
    pub fn is_available(&self) -> bool {
        self.visible && !self.collected
    }
}

/// Off-board egg holder (three-column level)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    pub id: u32,
    pub column: usize,
    pub color: BallColor,
    pub egg_count: u8,
    pub max_egg_count: u8,
}

/// Cell collections of one level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    level: Level,
    balls: Vec<BallCell>,
    eggs: Vec<EggCell>,
    baskets: Vec<Basket>,
}

impl Board {
    pub(crate) fn new(level: Level, balls: Vec<BallCell>, eggs: Vec<EggCell>, baskets: Vec<Basket>) -> Self {
        Self {
            level,
            balls,
            eggs,
            baskets,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn layout(&self) -> &'static LevelLayout {
        LevelLayout::for_level(self.level)
    }

    pub fn line_count(&self) -> usize {
        self.layout().line_count()
    }

    pub fn balls(&self) -> &[BallCell] {
        &self.balls
    }

    pub fn eggs(&self) -> &[EggCell] {
        &self.eggs
    }

    pub fn baskets(&self) -> &[Basket] {
        &self.baskets
    }

    /// Visible ball at a slot
    pub fn ball_at(&self, line: usize, position: u8) -> Option<&BallCell> {
        self.balls
            .iter()
            .find(|b| b.visible && b.line == line && b.position == position)
    }

    /// Uncollected, visible egg at a slot
    pub fn egg_at(&self, line: usize, position: u8) -> Option<&EggCell> {
        self.eggs
            .iter()
            .find(|e| e.is_available() && e.line == line && e.position == position)
    }

    /// Visible balls of a line, nearest-to-thrower first
    pub fn balls_in(&self, line: usize) -> Vec<&BallCell> {
        let mut balls: Vec<&BallCell> = self
            .balls
            .iter()
            .filter(|b| b.visible && b.line == line)
            .collect();
        match self.layout().clear_order {
            ClearOrder::Descending => balls.sort_by(|a, b| b.position.cmp(&a.position)),
            ClearOrder::Ascending => balls.sort_by_key(|b| b.position),
        }
        balls
    }

    /// Uncollected eggs of a line in ascending position
    pub fn eggs_in(&self, line: usize) -> Vec<&EggCell> {
        let mut eggs: Vec<&EggCell> = self
            .eggs
            .iter()
            .filter(|e| e.is_available() && e.line == line)
            .collect();
        eggs.sort_by_key(|e| e.position);
        eggs
    }

    pub fn basket(&self, column: usize) -> Option<&Basket> {
        self.baskets.iter().find(|b| b.column == column)
    }

    pub fn visible_ball_count(&self) -> usize {
        self.balls.iter().filter(|b| b.visible).count()
    }

    pub fn uncollected_egg_count(&self) -> usize {
        self.eggs.iter().filter(|e| !e.collected).count()
    }

    pub fn baskets_empty(&self) -> bool {
        self.baskets.iter().all(|b| b.egg_count == 0)
    }

    /// Hide every visible ball in a line; returns their positions in clearing order
    pub(crate) fn clear_line(&mut self, line: usize) -> Vec<u8> {
        let order: Vec<u8> = self.balls_in(line).iter().map(|b| b.position).collect();
        for ball in self.balls.iter_mut().filter(|b| b.line == line) {
            ball.visible = false;
        }
        order
    }

    /// Mark an egg collected. Returns false if it was not available.
    pub(crate) fn collect_egg(&mut self, line: usize, position: u8) -> bool {
        match self
            .eggs
            .iter_mut()
            .find(|e| e.is_available() && e.line == line && e.position == position)
        {
            Some(egg) => {
                egg.collected = true;
                egg.visible = false;
                true
            }
            None => false,
        }
    }

    /// Empty a basket, returning how many eggs it held
    pub(crate) fn empty_basket(&mut self, column: usize) -> u8 {
        match self.baskets.iter_mut().find(|b| b.column == column) {
            Some(basket) => std::mem::take(&mut basket.egg_count),
            None => 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn hide_ball(&mut self, line: usize, position: u8) {
        if let Some(ball) = self
            .balls
            .iter_mut()
            .find(|b| b.line == line && b.position == position)
        {
            ball.visible = false;
        }
    }
}
