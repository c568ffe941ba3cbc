//! Chicken Eggs headless runner
//!
//! Plays a full session with the autoplay driver and prints the result.
//!
//! Usage: chicken-eggs [--seed N] [--level L] [--tournament] [--settings PATH]

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;

use chicken_eggs::Settings;
use chicken_eggs::audio::LogPlayer;
use chicken_eggs::consts::{LEVEL_COUNT, TICKS_PER_SECOND};
use chicken_eggs::sim::{AutoPlayer, GameEvent, GamePhase, Level, PlayArea, Session, tick};
use chicken_eggs::tournament::{LogReporter, MatchContext, SessionMode};

/// Hard stop for the demo loop (all five timers back to back)
const MAX_TICKS: u64 = (90 + 120 + 150 + 180 + 210 + 60) * TICKS_PER_SECOND;

#[derive(Parser)]
#[command(name = "chicken-eggs", version, about = "Play a headless Chicken Eggs session with the autoplay driver")]
struct Cli {
    /// Seed for the autoplay driver
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Level to start on (overrides the settings file)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=LEVEL_COUNT as i64))]
    level: Option<u8>,
    /// Run as a tournament session and report the final score
    #[arg(long)]
    tournament: bool,
    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Cli::parse();
    log::info!("Chicken Eggs (headless) starting...");

    let mut settings = args.settings.as_deref().map(|path| Settings::load(path)).unwrap_or_default();
    if let Some(level) = args.level {
        settings.starting_level = level;
    }
    let start = Level::or_first(settings.starting_level);

    let mode = if args.tournament {
        SessionMode::Tournament(MatchContext::new(format!("local match seed {}", args.seed)))
    } else {
        SessionMode::Normal
    };

    let area = PlayArea::new(Vec2::ZERO, Vec2::new(390.0, 844.0));
    let mut session = Session::with_level(start, settings, area, mode, LogPlayer, LogReporter::default());
    let mut bot = AutoPlayer::new(args.seed);

    for _ in 0..MAX_TICKS {
        if session.phase().is_terminal() {
            break;
        }
        let input = bot.next_input(&session);
        tick(&mut session, &input);

        for event in session.drain_events() {
            match event {
                GameEvent::LevelComplete { level, level_score } => {
                    println!("Level {level} complete (+{level_score})");
                }
                GameEvent::HintShown { text } => log::debug!("hint: {text}"),
                other => log::trace!("{other:?}"),
            }
        }
    }

    let state = session.state();
    match state.phase {
        GamePhase::AllLevelsComplete => println!("All levels complete!"),
        GamePhase::GameOver => println!("Time up on level {}", state.level),
        GamePhase::SessionEnded => println!("Tournament session ended"),
        phase => println!("Stopped in {phase:?}"),
    }
    println!(
        "Final score: {} ({} eggs)",
        state.scores.final_score(),
        state.scores.total_eggs_collected
    );
    if let Some(score) = session.reporter().reported {
        println!("Reported to tournament: {score}");
    }
}
