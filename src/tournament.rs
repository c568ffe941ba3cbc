//! Tournament collaborator
//!
//! In tournament mode the session ends by reporting the final score to the
//! host's competitive-play SDK instead of showing local end screens. The SDK
//! is not idempotent, so every path goes through `ReportGuard`.

use serde::{Deserialize, Serialize};

/// Receives the final score of a tournament session
pub trait ScoreReporter {
    fn report_final_score(&mut self, score: u64);
}

/// Reporter for normal sessions; never expected to be called
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ScoreReporter for NoopReporter {
    fn report_final_score(&mut self, score: u64) {
        log::debug!("Score {score} not reported (no tournament backend)");
    }
}

/// Reporter that writes the score to the log
#[derive(Debug, Default, Clone)]
pub struct LogReporter {
    pub reported: Option<u64>,
}

impl ScoreReporter for LogReporter {
    fn report_final_score(&mut self, score: u64) {
        log::info!("Final tournament score: {score}");
        self.reported = Some(score);
    }
}

/// Opaque match data handed over by the tournament SDK
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchContext {
    pub description: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl MatchContext {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            data: serde_json::Value::Null,
        }
    }
}

/// How a session was entered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum SessionMode {
    #[default]
    Normal,
    Tournament(MatchContext),
}

impl SessionMode {
    pub fn is_tournament(&self) -> bool {
        matches!(self, SessionMode::Tournament(_))
    }

    pub fn match_context(&self) -> Option<&MatchContext> {
        match self {
            SessionMode::Tournament(ctx) => Some(ctx),
            SessionMode::Normal => None,
        }
    }
}

/// At-most-once gate in front of a `ScoreReporter`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportGuard {
    reported: bool,
}

impl ReportGuard {
    pub fn is_reported(&self) -> bool {
        self.reported
    }

    /// Report `score` unless already done. Returns true if this call reported.
    pub fn report<R: ScoreReporter + ?Sized>(&mut self, reporter: &mut R, score: u64) -> bool {
        if self.reported {
            log::debug!("Score already reported, skipping duplicate report of {score}");
            return false;
        }
        self.reported = true;
        log::info!("Reporting final score {score} to tournament");
        reporter.report_final_score(score);
        true
    }
}
