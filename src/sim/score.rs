//! Scoring and progress
//!
//! Per-level score and egg counters, the level-start snapshot used to roll a
//! restart back, and session totals that are folded in once per level.

use serde::{Deserialize, Serialize};

use super::rules::CollectedEgg;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreTracker {
    /// Score of the level in progress (includes earlier levels' points until folded)
    pub score: u64,
    /// `score` as it was when the level started
    pub level_start_score: u64,
    /// Eggs collected on the current level
    pub collected_eggs: u32,
    /// Eggs required on the current level
    pub total_eggs: u32,
    /// Sum of folded-in level scores
    pub total_score: u64,
    pub total_eggs_collected: u32,
    /// Completion of the current level, 0.0 - 1.0
    pub progress: f32,
    /// Set once the current level has been folded into the totals
    folded: bool,
}

impl ScoreTracker {
    pub fn new(total_eggs: u32) -> Self {
        Self {
            total_eggs,
            ..Default::default()
        }
    }

    /// Award points for collected eggs; returns points added
    pub fn award(&mut self, eggs: &[CollectedEgg]) -> u64 {
        let points: u64 = eggs.iter().map(|e| e.points).sum();
        self.score += points;
        self.collected_eggs += eggs.len() as u32;
        points
    }

    /// Recompute derived progress after a mutation
    pub fn recompute_progress(&mut self) {
        self.progress = if self.total_eggs == 0 {
            0.0
        } else {
            (self.collected_eggs as f32 / self.total_eggs as f32).min(1.0)
        };
    }

    pub fn all_eggs_collected(&self) -> bool {
        self.collected_eggs >= self.total_eggs
    }

    /// Fold the finished level into the session totals. Idempotent per level.
    pub fn fold_level(&mut self) -> bool {
        if self.folded {
            return false;
        }
        self.total_score += self.score - self.level_start_score;
        self.total_eggs_collected += self.collected_eggs;
        self.folded = true;
        true
    }

    /// Prepare counters for a new level, keeping the running score
    pub fn begin_level(&mut self, total_eggs: u32) {
        self.level_start_score = self.score;
        self.collected_eggs = 0;
        self.total_eggs = total_eggs;
        self.folded = false;
        self.recompute_progress();
    }

    /// Discard everything earned during the current attempt
    pub fn rollback_level(&mut self) {
        self.score = self.level_start_score;
        self.collected_eggs = 0;
        self.folded = false;
        self.recompute_progress();
    }

    /// Clear the whole session
    pub fn reset(&mut self, total_eggs: u32) {
        *self = Self::new(total_eggs);
    }

    pub fn level_points(&self) -> u64 {
        self.score - self.level_start_score
    }

    /// Score reported when the session ends: folded totals plus any unfolded level
    pub fn final_score(&self) -> u64 {
        if self.folded {
            self.total_score
        } else {
            self.total_score + self.level_points()
        }
    }
}
