//! Session state and core simulation types
//!
//! Everything the state machine reads or writes lives in `SessionState`.
//! Collaborators, the cue scheduler and the outgoing event queue live on
//! `Session` instead.

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::layout::{LevelLayout, generate};
use super::level::{BallColor, Level};
use super::rules::EggSource;
use super::score::ScoreTracker;
use crate::tournament::ReportGuard;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level in progress, throws accepted
    Playing,
    /// Level won, waiting for the player to continue
    LevelComplete,
    /// Timer ran out before the level was won
    GameOver,
    /// Level 5 won (normal mode)
    AllLevelsComplete,
    /// Next board is built; timer starts once the transition finishes
    Transitioning,
    /// Tournament session finished and reported
    SessionEnded,
    /// Player left a normal session
    Exited,
}

impl GamePhase {
    /// No further play possible without a restart
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GamePhase::GameOver | GamePhase::AllLevelsComplete | GamePhase::SessionEnded | GamePhase::Exited
        )
    }
}

/// Things the presentation layer may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: Level, duration_secs: u32 },
    TransitionComplete { level: Level },
    ColorSelected(BallColor),
    HintShown { text: String },
    BallsCleared { line: usize, positions: Vec<u8> },
    EggCollected { line: usize, source: EggSource, points: u64 },
    /// Staggered presentation of an egg leaving a basket (already scored)
    BasketEggReleased { column: usize, index: u8 },
    TimeWarning { seconds: u32 },
    LevelComplete { level: Level, level_score: u64 },
    GameOver { level: Level },
    AllLevelsComplete { total_score: u64 },
    ScoreReported { score: u64 },
}

/// Transient on-screen message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub text: String,
    pub expires_at_tick: u64,
}

/// Complete session state (serializable for debugging and snapshots)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub level: Level,
    pub phase: GamePhase,
    pub board: Board,
    pub scores: ScoreTracker,
    /// Whole seconds left on the level timer
    pub time_remaining: u32,
    /// Timer armed for the current level
    pub timer_running: bool,
    /// Timer suspended by the host (navigation, backgrounding)
    pub paused: bool,
    /// Ticks counted toward the next countdown second
    pub second_ticks: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Board generation; bumped on every teardown
    pub epoch: u32,
    pub selected_color: BallColor,
    /// Line currently under the pointer
    pub aimed_line: Option<usize>,
    pub hint: Option<Hint>,
    pub tournament: bool,
    pub report: ReportGuard,
}

impl SessionState {
    pub fn new(level: Level, tournament: bool) -> Self {
        let layout = LevelLayout::for_level(level);
        Self {
            level,
            phase: GamePhase::Playing,
            board: generate(level),
            scores: ScoreTracker::new(layout.total_eggs),
            time_remaining: layout.duration_secs,
            timer_running: true,
            paused: false,
            second_ticks: 0,
            time_ticks: 0,
            epoch: 0,
            selected_color: layout.line_colors[0],
            aimed_line: None,
            hint: None,
            tournament,
            report: ReportGuard::default(),
        }
    }

    pub fn layout(&self) -> &'static LevelLayout {
        LevelLayout::for_level(self.level)
    }

    /// Win condition of the current level
    pub fn is_level_won(&self) -> bool {
        if self.board.visible_ball_count() > 0 {
            return false;
        }
        if self.board.baskets().is_empty() {
            self.scores.all_eggs_collected()
        } else {
            self.board.baskets_empty()
        }
    }

    /// Countdown is live
    pub fn is_counting_down(&self) -> bool {
        self.phase == GamePhase::Playing && self.timer_running && !self.paused
    }

    pub fn final_score_reported(&self) -> bool {
        self.report.is_reported()
    }

    /// Rebuild the board for `level`, invalidating everything tied to the old one
    pub(crate) fn load_level(&mut self, level: Level) {
        let layout = LevelLayout::for_level(level);
        self.level = level;
        self.epoch = self.epoch.wrapping_add(1);
        self.board = generate(level);
        self.scores.begin_level(layout.total_eggs);
        self.time_remaining = layout.duration_secs;
        self.second_ticks = 0;
        self.aimed_line = None;
        self.hint = None;
        if !layout.line_colors.contains(&self.selected_color) {
            self.selected_color = layout.line_colors[0];
        }
    }
}
