//! Gameplay simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (autoplay)
//! - No rendering or platform dependencies

pub mod aim;
pub mod autoplay;
pub mod board;
pub mod layout;
pub mod level;
pub mod rules;
pub mod schedule;
pub mod score;
pub mod session;
pub mod state;
pub mod tick;

pub use aim::{AimResolver, AimResult, PlayArea};
pub use autoplay::AutoPlayer;
pub use board::{BallCell, Basket, Board, EggCell};
pub use layout::{AimMode, ClearOrder, LAYOUTS, LevelLayout, OcclusionPolicy, Shape, generate};
pub use level::{BallColor, Level};
pub use rules::{CollectedEgg, EggSource, ThrowOutcome, resolve_throw};
pub use schedule::{Cue, Scheduler};
pub use score::ScoreTracker;
pub use session::Session;
pub use state::{GameEvent, GamePhase, Hint, SessionState};
pub use tick::{TickInput, tick};
