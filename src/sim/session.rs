//! Level/session state machine
//!
//! `Session` owns the state, the injected sound and tournament collaborators,
//! the deferred-cue scheduler and the outgoing event queue. Each public method
//! is one discrete input and runs to completion before the next one.

use glam::Vec2;

use super::aim::{AimResolver, AimResult, PlayArea, TOO_CLOSE_HINT};
use super::layout::AimMode;
use super::level::{BallColor, Level};
use super::rules::{EggSource, ThrowOutcome, resolve_throw};
use super::schedule::{Cue, Scheduler};
use super::state::{GameEvent, GamePhase, Hint, SessionState};
use crate::audio::{Mixer, SoundEffect, SoundPlayer};
use crate::consts::{TICKS_PER_SECOND, TIME_WARNING_SECS};
use crate::error::{GameError, GameResult, ThrowRejection};
use crate::settings::Settings;
use crate::tournament::{ScoreReporter, SessionMode};

fn secs_to_ticks(secs: f32) -> u64 {
    (secs.max(0.0) * TICKS_PER_SECOND as f32).round() as u64
}

pub struct Session<P: SoundPlayer, R: ScoreReporter> {
    state: SessionState,
    mode: SessionMode,
    settings: Settings,
    aim: AimResolver,
    mixer: Mixer<P>,
    reporter: R,
    scheduler: Scheduler,
    events: Vec<GameEvent>,
}

impl<P: SoundPlayer, R: ScoreReporter> Session<P, R> {
    /// Start a session on the configured starting level
    pub fn new(settings: Settings, area: PlayArea, mode: SessionMode, player: P, reporter: R) -> Self {
        let level = settings.starting_level();
        Self::with_level(level, settings, area, mode, player, reporter)
    }

    pub fn with_level(
        level: Level,
        settings: Settings,
        area: PlayArea,
        mode: SessionMode,
        player: P,
        reporter: R,
    ) -> Self {
        match mode.match_context() {
            Some(ctx) => log::info!("Tournament session starting at level {level}: {}", ctx.description),
            None => log::info!("Normal session starting at level {level}"),
        }

        let state = SessionState::new(level, mode.is_tournament());
        let mut session = Self {
            aim: AimResolver::new(area, settings.aim),
            mixer: Mixer::new(player, &settings),
            state,
            mode,
            settings,
            reporter,
            scheduler: Scheduler::new(),
            events: Vec::new(),
        };
        session.announce_level();
        session
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn level(&self) -> Level {
        self.state.level
    }

    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn aim_resolver(&self) -> &AimResolver {
        &self.aim
    }

    pub fn mixer(&self) -> &Mixer<P> {
        &self.mixer
    }

    pub fn mixer_mut(&mut self) -> &mut Mixer<P> {
        &mut self.mixer
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Update the screen geometry (rotation, resize)
    pub fn set_play_area(&mut self, area: PlayArea) {
        self.aim.area = area;
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_cues(&self) -> usize {
        self.scheduler.len()
    }

    // === Input ===

    /// Pointer moved: update the highlighted line
    pub fn aim_move(&mut self, point: Vec2) -> AimResult {
        let result = self.aim.resolve(self.state.level, point);
        if self.state.phase == GamePhase::Playing {
            self.state.aimed_line = result.line();
            if result == AimResult::TooClose {
                self.show_hint(TOO_CLOSE_HINT);
            }
        }
        result
    }

    /// Pointer released: throw at whatever is under it
    pub fn aim_release(&mut self, point: Vec2) -> Result<ThrowOutcome, ThrowRejection> {
        self.state.aimed_line = None;
        if self.state.phase != GamePhase::Playing {
            return Err(ThrowRejection::NotPlaying);
        }

        let result = self.aim.resolve(self.state.level, point);
        match result {
            AimResult::Target(line) => self.throw_at(Some(line)),
            AimResult::TooClose => {
                self.show_hint(TOO_CLOSE_HINT);
                Err(ThrowRejection::NoTarget(AimMode::Radial))
            }
            // Radial misses are dropped without feedback
            AimResult::Miss if self.state.layout().aim == AimMode::Radial => {
                Err(ThrowRejection::NoTarget(AimMode::Radial))
            }
            AimResult::Miss => self.throw_at(None),
        }
    }

    /// Throw the selected ball at a line
    pub fn throw_at(&mut self, line: Option<usize>) -> Result<ThrowOutcome, ThrowRejection> {
        if self.state.phase != GamePhase::Playing {
            return Err(ThrowRejection::NotPlaying);
        }

        let outcome = match resolve_throw(&mut self.state.board, line, self.state.selected_color) {
            Ok(outcome) => outcome,
            Err(rejection) => {
                log::debug!("Throw rejected: {rejection}");
                if rejection.is_player_facing() {
                    self.mixer.play(SoundEffect::Reject);
                    self.show_hint(&rejection.to_string());
                }
                return Err(rejection);
            }
        };

        self.mixer.play(SoundEffect::Throw);
        self.mixer.play(SoundEffect::BallPop);
        self.events.push(GameEvent::BallsCleared {
            line: outcome.line,
            positions: outcome.cleared.clone(),
        });

        self.state.scores.award(&outcome.collected);
        self.state.scores.recompute_progress();

        let stagger = secs_to_ticks(self.settings.basket_release_stagger_secs).max(1);
        for egg in &outcome.collected {
            self.events.push(GameEvent::EggCollected {
                line: egg.line,
                source: egg.source,
                points: egg.points,
            });
            match egg.source {
                EggSource::Board { .. } => self.mixer.play(SoundEffect::EggCollect),
                EggSource::Basket { index } => self.scheduler.schedule(
                    self.state.time_ticks + stagger * (index as u64 + 1),
                    self.state.epoch,
                    Cue::BasketEggReleased {
                        column: egg.line,
                        index,
                    },
                ),
            }
        }

        self.check_level_won();
        Ok(outcome)
    }

    pub fn select_color(&mut self, color: BallColor) {
        if self.state.selected_color != color {
            self.state.selected_color = color;
            self.mixer.play(SoundEffect::ColorSwitch);
            self.events.push(GameEvent::ColorSelected(color));
        }
    }

    /// Switch to the next color used on this level
    pub fn cycle_color(&mut self) {
        let colors = self.state.layout().colors();
        let next = colors
            .iter()
            .position(|&c| c == self.state.selected_color)
            .map_or(0, |i| (i + 1) % colors.len());
        self.select_color(colors[next]);
    }

    // === Timer ===

    pub fn pause_timer(&mut self) {
        if !self.state.paused {
            log::debug!("Timer paused at {}s", self.state.time_remaining);
            self.state.paused = true;
        }
    }

    pub fn resume_timer(&mut self) {
        if self.state.paused {
            log::debug!("Timer resumed at {}s", self.state.time_remaining);
            self.state.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.state.paused {
            self.resume_timer();
        } else {
            self.pause_timer();
        }
    }

    /// Advance one fixed simulation tick
    pub fn advance(&mut self) {
        self.state.time_ticks += 1;
        let now = self.state.time_ticks;

        for cue in self.scheduler.drain_due(now, self.state.epoch) {
            self.apply_cue(cue);
        }

        if self.state.hint.as_ref().is_some_and(|h| now >= h.expires_at_tick) {
            self.state.hint = None;
        }

        if !self.state.is_counting_down() {
            return;
        }

        self.state.second_ticks += 1;
        if self.state.second_ticks < TICKS_PER_SECOND {
            return;
        }
        self.state.second_ticks = 0;
        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);

        let left = self.state.time_remaining;
        if left == 0 {
            self.handle_time_up();
        } else if left <= TIME_WARNING_SECS {
            self.mixer.play(SoundEffect::TimeWarning);
            self.events.push(GameEvent::TimeWarning { seconds: left });
        }
    }

    fn apply_cue(&mut self, cue: Cue) {
        match cue {
            Cue::BasketEggReleased { column, index } => {
                self.mixer.play(SoundEffect::EggCollect);
                self.events.push(GameEvent::BasketEggReleased { column, index });
            }
            Cue::TransitionComplete => {
                if self.state.phase == GamePhase::Transitioning {
                    self.state.phase = GamePhase::Playing;
                    self.state.timer_running = true;
                    log::info!("Level {} underway", self.state.level);
                    self.events.push(GameEvent::TransitionComplete {
                        level: self.state.level,
                    });
                }
            }
        }
    }

    // === Level flow ===

    fn check_level_won(&mut self) {
        if self.state.phase != GamePhase::Playing || !self.state.is_level_won() {
            return;
        }

        self.state.timer_running = false;
        let level = self.state.level;
        if level.is_last() {
            self.finish_all_levels();
            return;
        }

        let level_score = self.state.scores.level_points();
        log::info!(
            "Level {level} complete: {level_score} points with {}s left",
            self.state.time_remaining
        );
        self.state.phase = GamePhase::LevelComplete;
        self.mixer.play(SoundEffect::LevelComplete);
        self.events.push(GameEvent::LevelComplete { level, level_score });
    }

    fn handle_time_up(&mut self) {
        self.state.timer_running = false;
        self.mixer.stop_all();

        if self.state.tournament {
            log::info!("Time up on level {} (tournament)", self.state.level);
            self.end_tournament();
            return;
        }

        if self.state.is_level_won() {
            self.check_level_won();
            return;
        }

        log::info!("Time up on level {}", self.state.level);
        self.state.phase = GamePhase::GameOver;
        self.mixer.play(SoundEffect::GameOver);
        self.events.push(GameEvent::GameOver {
            level: self.state.level,
        });
    }

    fn finish_all_levels(&mut self) {
        self.state.timer_running = false;
        self.state.scores.fold_level();
        self.mixer.stop_all();

        if self.state.tournament {
            self.end_tournament();
            return;
        }

        let total_score = self.state.scores.total_score;
        log::info!("All levels complete: {total_score} points");
        self.state.phase = GamePhase::AllLevelsComplete;
        self.mixer.play(SoundEffect::Victory);
        self.events.push(GameEvent::AllLevelsComplete { total_score });
    }

    /// Report once and close the tournament session
    fn end_tournament(&mut self) {
        let score = self.state.scores.final_score();
        if self.state.report.report(&mut self.reporter, score) {
            self.events.push(GameEvent::ScoreReported { score });
        }
        self.state.timer_running = false;
        self.state.phase = GamePhase::SessionEnded;
    }

    /// Move on from a completed level
    pub fn continue_level(&mut self) -> GameResult<()> {
        if self.state.phase != GamePhase::LevelComplete {
            return Err(GameError::InvalidState(format!(
                "cannot continue from {:?}",
                self.state.phase
            )));
        }

        self.mixer.stop_all();
        self.state.scores.fold_level();

        let Some(next) = self.state.level.next() else {
            self.finish_all_levels();
            return Ok(());
        };

        self.state.load_level(next);
        self.scheduler.discard_before(self.state.epoch);
        self.state.phase = GamePhase::Transitioning;
        self.state.timer_running = false;
        let due = self.state.time_ticks + secs_to_ticks(self.settings.transition_delay_secs);
        self.scheduler.schedule(due, self.state.epoch, Cue::TransitionComplete);
        self.announce_level();
        Ok(())
    }

    /// Replay the current level, rolling the score back to its start
    pub fn restart_level(&mut self) -> GameResult<()> {
        if self.state.tournament {
            log::warn!("Cannot restart level in tournament mode");
            return Err(GameError::RestartDisabled);
        }
        if !matches!(
            self.state.phase,
            GamePhase::Playing | GamePhase::GameOver | GamePhase::LevelComplete
        ) {
            return Err(GameError::InvalidState(format!(
                "cannot restart level from {:?}",
                self.state.phase
            )));
        }

        self.mixer.stop_all();
        self.state.scores.rollback_level();
        self.start_level(self.state.level);
        Ok(())
    }

    /// Start over from level 1 with a clean score
    pub fn restart_game(&mut self) -> GameResult<()> {
        if self.state.tournament {
            log::warn!("Cannot restart game in tournament mode");
            return Err(GameError::RestartDisabled);
        }
        if !matches!(self.state.phase, GamePhase::AllLevelsComplete | GamePhase::GameOver) {
            return Err(GameError::InvalidState(format!(
                "cannot restart game from {:?}",
                self.state.phase
            )));
        }

        self.mixer.stop_all();
        self.state.scores.reset(0);
        self.start_level(Level::FIRST);
        Ok(())
    }

    /// Leave the session (back to menu). Tournament sessions report first.
    pub fn exit(&mut self) {
        self.state.timer_running = false;
        self.mixer.stop_all();
        if self.state.tournament {
            log::warn!("Exiting tournament session");
            self.end_tournament();
        } else if self.state.phase != GamePhase::Exited {
            log::info!("Leaving session at level {}", self.state.level);
            self.state.phase = GamePhase::Exited;
        }
    }

    fn start_level(&mut self, level: Level) {
        self.state.load_level(level);
        self.scheduler.discard_before(self.state.epoch);
        self.state.phase = GamePhase::Playing;
        self.state.timer_running = true;
        self.announce_level();
    }

    fn announce_level(&mut self) {
        let level = self.state.level;
        let layout = self.state.layout();
        log::info!(
            "Level {level} ({}): {} eggs in {}s",
            layout.shape.as_str(),
            layout.total_eggs,
            layout.duration_secs
        );
        self.events.push(GameEvent::LevelStarted {
            level,
            duration_secs: layout.duration_secs,
        });
    }

    fn show_hint(&mut self, text: &str) {
        let expires_at_tick = self.state.time_ticks + secs_to_ticks(self.settings.hint_duration_secs);
        self.state.hint = Some(Hint {
            text: text.to_string(),
            expires_at_tick,
        });
        self.events.push(GameEvent::HintShown {
            text: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::RecordingPlayer;
    use crate::tournament::MatchContext;
    use crate::tournament::testing::RecordingReporter;
    use proptest::prelude::*;

    type TestSession = Session<RecordingPlayer, RecordingReporter>;

    fn area() -> PlayArea {
        PlayArea::new(Vec2::ZERO, Vec2::new(400.0, 800.0))
    }

    fn session_at(level: u8, mode: SessionMode) -> TestSession {
        Session::with_level(
            Level::new(level).unwrap(),
            Settings::default(),
            area(),
            mode,
            RecordingPlayer::default(),
            RecordingReporter::default(),
        )
    }

    fn normal(level: u8) -> TestSession {
        session_at(level, SessionMode::Normal)
    }

    fn tournament(level: u8) -> TestSession {
        session_at(level, SessionMode::Tournament(MatchContext::new("test match")))
    }

    /// Throw the right color at every line
    fn clear_level(s: &mut TestSession) {
        for line in 0..s.state().layout().line_count() {
            let color = s.state().layout().line_colors[line];
            s.select_color(color);
            s.throw_at(Some(line)).unwrap();
        }
    }

    fn advance_secs(s: &mut TestSession, secs: u64) {
        for _ in 0..secs * TICKS_PER_SECOND {
            s.advance();
        }
    }

    #[test]
    fn test_level_one_scenario() {
        let mut s = normal(1);
        let outcome = s.throw_at(Some(0)).unwrap();
        assert_eq!(outcome.collected.len(), 2);
        assert_eq!(s.state().scores.score, 200);
        assert_eq!(s.state().scores.collected_eggs, 2);
        assert_eq!(s.state().board.visible_ball_count(), 8);
        assert_eq!(s.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_aim_release_routes_through_resolver() {
        let mut s = normal(1);
        let err = s.aim_release(Vec2::new(5.0, 400.0)).unwrap_err();
        assert_eq!(err, ThrowRejection::NoTarget(AimMode::Columns));
        assert_eq!(s.state().hint.as_ref().map(|h| h.text.as_str()), Some("Aim at one of the colored columns!"));

        let outcome = s.aim_release(Vec2::new(50.0, 400.0)).unwrap();
        assert_eq!(outcome.line, 0);
    }

    #[test]
    fn test_radial_too_close_shows_hint() {
        let mut s = normal(3);
        let center = s.aim_resolver().area.center;
        assert!(s.aim_release(center + Vec2::new(10.0, 0.0)).is_err());
        assert_eq!(s.state().hint.as_ref().map(|h| h.text.as_str()), Some(TOO_CLOSE_HINT));

        // Beyond the outer circle: silent
        let mut s = normal(3);
        assert!(s.aim_release(center + Vec2::new(390.0, 0.0)).is_err());
        assert!(s.state().hint.is_none());
    }

    #[test]
    fn test_hint_expires() {
        let mut s = normal(2);
        s.select_color(BallColor::Blue);
        assert!(s.throw_at(Some(0)).is_err());
        assert!(s.state().hint.is_some());
        advance_secs(&mut s, 2);
        assert!(s.state().hint.is_none());
    }

    #[test]
    fn test_wrong_color_changes_nothing() {
        let mut s = normal(3);
        s.select_color(BallColor::Orange);
        let err = s.throw_at(Some(0)).unwrap_err();
        assert_eq!(
            err,
            ThrowRejection::WrongColor {
                required: BallColor::Red,
                aim: AimMode::Radial
            }
        );
        assert_eq!(
            s.state().hint.as_ref().map(|h| h.text.as_str()),
            Some("Use red ball for this column!")
        );
        assert_eq!(s.state().board.visible_ball_count(), 14);
        assert_eq!(s.state().scores.score, 0);
        assert_eq!(s.mixer().player().count("reject"), 1);
    }

    #[test]
    fn test_level_complete_then_continue() {
        let mut s = normal(1);
        clear_level(&mut s);
        assert_eq!(s.phase(), GamePhase::LevelComplete);
        assert_eq!(s.state().scores.score, 900);
        assert!(!s.state().timer_running);

        s.continue_level().unwrap();
        assert_eq!(s.phase(), GamePhase::Transitioning);
        assert_eq!(s.level().number(), 2);
        assert_eq!(s.state().scores.total_score, 900);
        assert_eq!(s.state().scores.total_eggs_collected, 9);
        assert_eq!(s.throw_at(Some(0)), Err(ThrowRejection::NotPlaying));

        advance_secs(&mut s, 3);
        assert_eq!(s.phase(), GamePhase::Playing);
        assert!(s.state().is_counting_down());
        assert!(s.state().time_remaining < 120);
    }

    #[test]
    fn test_continue_only_from_level_complete() {
        let mut s = normal(1);
        assert!(matches!(s.continue_level(), Err(GameError::InvalidState(_))));
    }

    #[test]
    fn test_level_five_win_completes_session() {
        let mut s = normal(5);
        clear_level(&mut s);
        assert_eq!(s.phase(), GamePhase::AllLevelsComplete);
        assert_eq!(s.state().scores.total_score, 12 * 150);
        assert_eq!(s.mixer().player().count("victory"), 1);
    }

    #[test]
    fn test_time_out_is_game_over() {
        let mut s = normal(1);
        advance_secs(&mut s, 90);
        assert_eq!(s.phase(), GamePhase::GameOver);
        assert_eq!(s.state().time_remaining, 0);
        assert_eq!(s.mixer().player().count("time_warning"), 10);
        assert!(s.reporter().scores.is_empty());
    }

    #[test]
    fn test_pause_keeps_remaining_time() {
        let mut s = normal(1);
        advance_secs(&mut s, 5);
        assert_eq!(s.state().time_remaining, 85);
        s.pause_timer();
        advance_secs(&mut s, 30);
        assert_eq!(s.state().time_remaining, 85);
        s.resume_timer();
        advance_secs(&mut s, 1);
        assert_eq!(s.state().time_remaining, 84);
    }

    #[test]
    fn test_restart_rolls_back_score() {
        let mut s = normal(1);
        clear_level(&mut s);
        s.continue_level().unwrap();
        advance_secs(&mut s, 2);

        s.select_color(BallColor::Red);
        s.throw_at(Some(0)).unwrap();
        assert_eq!(s.state().scores.score, 900 + 240);

        s.restart_level().unwrap();
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.state().scores.score, 900);
        assert_eq!(s.state().scores.collected_eggs, 0);
        assert_eq!(s.state().time_remaining, 120);
        assert_eq!(s.state().board.visible_ball_count(), 6);
    }

    #[test]
    fn test_replay_before_continue_is_not_double_counted() {
        let mut s = normal(1);
        clear_level(&mut s);
        s.restart_level().unwrap();
        clear_level(&mut s);
        s.continue_level().unwrap();
        assert_eq!(s.state().scores.total_score, 900);
        assert_eq!(s.state().scores.total_eggs_collected, 9);
    }

    #[test]
    fn test_restart_game_after_victory() {
        let mut s = normal(5);
        clear_level(&mut s);
        s.restart_game().unwrap();
        assert_eq!(s.level(), Level::FIRST);
        assert_eq!(s.state().scores.score, 0);
        assert_eq!(s.state().scores.total_score, 0);
        assert_eq!(s.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_tournament_disables_restart() {
        let mut s = tournament(1);
        assert!(matches!(s.restart_level(), Err(GameError::RestartDisabled)));
        assert!(matches!(s.restart_game(), Err(GameError::RestartDisabled)));
    }

    #[test]
    fn test_tournament_time_out_reports_once() {
        let mut s = tournament(1);
        s.throw_at(Some(0)).unwrap();
        advance_secs(&mut s, 90);
        assert_eq!(s.phase(), GamePhase::SessionEnded);
        assert_eq!(s.reporter().scores, vec![200]);

        // Exit after the report must not report again
        s.exit();
        advance_secs(&mut s, 5);
        assert_eq!(s.reporter().scores, vec![200]);
        assert!(s.state().final_score_reported());
    }

    #[test]
    fn test_tournament_all_levels_reports_total() {
        let mut s = tournament(4);
        clear_level(&mut s);
        s.continue_level().unwrap();
        advance_secs(&mut s, 2);
        clear_level(&mut s);
        assert_eq!(s.phase(), GamePhase::SessionEnded);
        assert_eq!(s.reporter().scores, vec![600 + 1800]);
        s.exit();
        assert_eq!(s.reporter().scores.len(), 1);
    }

    #[test]
    fn test_tournament_exit_reports_running_score() {
        let mut s = tournament(2);
        s.throw_at(Some(0)).unwrap();
        s.exit();
        assert_eq!(s.reporter().scores, vec![240]);
        assert_eq!(s.phase(), GamePhase::SessionEnded);
    }

    #[test]
    fn test_normal_exit() {
        let mut s = normal(2);
        s.exit();
        assert_eq!(s.phase(), GamePhase::Exited);
        assert!(s.reporter().scores.is_empty());
        assert!(s.mixer().player().stops >= 1);
    }

    #[test]
    fn test_basket_releases_are_staggered() {
        let mut s = normal(1);
        s.select_color(BallColor::Orange);
        s.throw_at(Some(2)).unwrap();
        // Scored immediately, presented later
        assert_eq!(s.state().scores.collected_eggs, 4);
        assert_eq!(s.pending_cues(), 4);
        s.drain_events();

        advance_secs(&mut s, 1);
        let released = s
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::BasketEggReleased { column: 2, .. }))
            .count();
        assert_eq!(released, 4);
    }

    #[test]
    fn test_restart_drops_stale_basket_cues() {
        let mut s = normal(1);
        s.throw_at(Some(0)).unwrap();
        assert_eq!(s.pending_cues(), 2);
        s.restart_level().unwrap();
        assert_eq!(s.pending_cues(), 0);
        s.drain_events();
        advance_secs(&mut s, 1);
        assert!(
            !s.drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::BasketEggReleased { .. }))
        );
        assert_eq!(s.state().scores.score, 0);
    }

    #[test]
    fn test_cycle_color_stays_in_level_palette() {
        let mut s = normal(1);
        s.cycle_color();
        assert_eq!(s.state().selected_color, BallColor::Green);
        s.cycle_color();
        s.cycle_color();
        assert_eq!(s.state().selected_color, BallColor::Red);
    }

    proptest! {
        #[test]
        fn prop_collected_eggs_never_decrease(
            throws in proptest::collection::vec((0usize..6, 0usize..6), 1..40),
            level in 1u8..=5,
        ) {
            let mut s = normal(level);
            let mut last = 0;
            for (line, color) in throws {
                s.select_color(BallColor::ALL[color]);
                let before = s.state().board.visible_ball_count();
                let result = s.throw_at(Some(line));
                if result.is_err() {
                    prop_assert_eq!(s.state().board.visible_ball_count(), before);
                }
                let now = s.state().scores.collected_eggs;
                prop_assert!(now >= last);
                prop_assert!(now <= s.state().layout().total_eggs);
                last = now;
            }
        }

        #[test]
        fn prop_tournament_reports_at_most_once(
            actions in proptest::collection::vec(0u8..4, 1..12),
        ) {
            let mut s = tournament(5);
            for action in actions {
                match action {
                    0 => { let _ = s.throw_at(Some(0)); }
                    1 => advance_secs(&mut s, 60),
                    2 => s.exit(),
                    _ => { let _ = s.restart_level(); }
                }
            }
            prop_assert!(s.reporter().scores.len() <= 1);
            if s.phase() == GamePhase::SessionEnded {
                prop_assert_eq!(s.reporter().scores.len(), 1);
            }
        }
    }
}
