//! Idle/demo mode driver
//!
//! Produces `TickInput`s that play the session: picks a line that still has
//! balls, switches to its color, and releases somewhere inside its hit zone.
//! Seeded so a run can be replayed exactly.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::session::Session;
use super::state::GamePhase;
use super::tick::TickInput;
use crate::audio::SoundPlayer;
use crate::consts::TICKS_PER_SECOND;
use crate::tournament::ScoreReporter;

pub struct AutoPlayer {
    rng: Pcg32,
    /// Ticks to wait between throws
    throw_interval: u64,
    /// Chance of throwing without switching color first
    sloppiness: f64,
    cooldown: u64,
}

impl AutoPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            throw_interval: TICKS_PER_SECOND,
            sloppiness: 0.15,
            cooldown: TICKS_PER_SECOND,
        }
    }

    pub fn with_throw_interval(mut self, ticks: u64) -> Self {
        self.throw_interval = ticks.max(1);
        self.cooldown = self.throw_interval;
        self
    }

    pub fn with_sloppiness(mut self, chance: f64) -> Self {
        self.sloppiness = chance.clamp(0.0, 1.0);
        self
    }

    /// Decide this tick's input
    pub fn next_input<P: SoundPlayer, R: ScoreReporter>(&mut self, session: &Session<P, R>) -> TickInput {
        match session.phase() {
            GamePhase::LevelComplete => {
                return TickInput {
                    continue_level: true,
                    ..Default::default()
                };
            }
            GamePhase::Playing => {}
            _ => return TickInput::default(),
        }

        if self.cooldown > 0 {
            self.cooldown -= 1;
            return TickInput::default();
        }
        self.cooldown = self.throw_interval;

        let state = session.state();
        let lines: Vec<usize> = (0..state.board.line_count())
            .filter(|&line| !state.board.balls_in(line).is_empty())
            .collect();
        if lines.is_empty() {
            return TickInput::default();
        }
        let line = lines[self.rng.random_range(0..lines.len())];

        let layout = state.layout();
        let select_color = if self.rng.random_bool(self.sloppiness) {
            None
        } else {
            layout.color_of(line)
        };

        let release = session
            .aim_resolver()
            .target_point(state.level, line)
            .map(|p| p + self.jitter());

        TickInput {
            pointer: release,
            release,
            select_color,
            ..Default::default()
        }
    }

    fn jitter(&mut self) -> Vec2 {
        Vec2::new(self.rng.random_range(-4.0..4.0), self.rng.random_range(-4.0..4.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentPlayer;
    use crate::settings::Settings;
    use crate::sim::aim::PlayArea;
    use crate::sim::level::Level;
    use crate::sim::tick::tick;
    use crate::tournament::testing::RecordingReporter;
    use crate::tournament::{MatchContext, SessionMode};

    fn run(seed: u64, mode: SessionMode) -> Session<SilentPlayer, RecordingReporter> {
        let mut session = Session::with_level(
            Level::FIRST,
            Settings::default(),
            PlayArea::new(Vec2::ZERO, Vec2::new(400.0, 800.0)),
            mode,
            SilentPlayer,
            RecordingReporter::default(),
        );
        let mut bot = AutoPlayer::new(seed).with_throw_interval(10);
        for _ in 0..TICKS_PER_SECOND * 60 * 15 {
            if session.phase().is_terminal() {
                break;
            }
            let input = bot.next_input(&session);
            tick(&mut session, &input);
        }
        session
    }

    #[test]
    fn test_autoplay_finishes_all_levels() {
        let session = run(7, SessionMode::Normal);
        assert_eq!(session.phase(), GamePhase::AllLevelsComplete);
        // 9*100 + 6*80 + 6*120 + 6*100 + 12*150
        assert_eq!(session.state().scores.total_score, 4500);
        assert_eq!(session.state().scores.total_eggs_collected, 39);
    }

    #[test]
    fn test_autoplay_tournament_reports_once() {
        let session = run(11, SessionMode::Tournament(MatchContext::new("bot")));
        assert_eq!(session.phase(), GamePhase::SessionEnded);
        assert_eq!(session.reporter().scores, vec![4500]);
    }

    #[test]
    fn test_same_seed_same_run() {
        let a = run(3, SessionMode::Normal);
        let b = run(3, SessionMode::Normal);
        assert_eq!(a.state().time_ticks, b.state().time_ticks);
        assert_eq!(a.state().scores, b.state().scores);
    }
}
