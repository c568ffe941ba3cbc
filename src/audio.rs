//! Sound collaborator
//!
//! The engine never plays audio itself. It names sound effects and hands them
//! to an injected `SoundPlayer` through a `Mixer` that applies mute/volume.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball leaves the player's hand
    Throw,
    /// A line of balls pops
    BallPop,
    /// An egg is collected
    EggCollect,
    /// Throw refused (wrong color, empty line, no target)
    Reject,
    /// Ball color switched
    ColorSwitch,
    /// Countdown warning during the last seconds
    TimeWarning,
    LevelComplete,
    GameOver,
    /// All five levels finished
    Victory,
}

impl SoundEffect {
    /// Asset name passed to the player
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Throw => "throw",
            SoundEffect::BallPop => "ball_pop",
            SoundEffect::EggCollect => "egg_collect",
            SoundEffect::Reject => "reject",
            SoundEffect::ColorSwitch => "color_switch",
            SoundEffect::TimeWarning => "time_warning",
            SoundEffect::LevelComplete => "level_complete",
            SoundEffect::GameOver => "game_over",
            SoundEffect::Victory => "victory",
        }
    }
}

/// Fire-and-forget playback backend supplied by the host app
pub trait SoundPlayer {
    /// Play `name` at `volume` (0.0 - 1.0)
    fn play_sound(&mut self, name: &str, volume: f32);
    fn stop_all(&mut self);
}

/// Player that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPlayer;

impl SoundPlayer for SilentPlayer {
    fn play_sound(&mut self, _name: &str, _volume: f32) {}
    fn stop_all(&mut self) {}
}

/// Player that only logs, for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPlayer;

impl SoundPlayer for LogPlayer {
    fn play_sound(&mut self, name: &str, volume: f32) {
        log::trace!("sound: {name} at {volume:.2}");
    }

    fn stop_all(&mut self) {
        log::trace!("sound: stop all");
    }
}

/// Audio manager for the game
pub struct Mixer<P: SoundPlayer> {
    player: P,
    volume: f32,
    muted: bool,
}

impl<P: SoundPlayer> Mixer<P> {
    pub fn new(player: P, settings: &Settings) -> Self {
        Self {
            player,
            volume: settings.effective_volume(),
            muted: false,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.player.stop_all();
        }
    }

    /// Set effective volume (0.0 - 1.0), applied to every following sound
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_audible(&self) -> bool {
        !self.muted && self.volume > 0.0
    }

    pub fn play(&mut self, effect: SoundEffect) {
        if self.is_audible() {
            self.player.play_sound(effect.name(), self.volume);
        }
    }

    pub fn stop_all(&mut self) {
        self.player.stop_all();
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }
}
