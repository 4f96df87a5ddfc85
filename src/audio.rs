//! Sound playback surface
//!
//! The simulation only emits `GameEvent`s; this module decides which of them
//! make a sound and at what volume. Decoding and mixing belong to whatever
//! `AudioSink` the host plugs in.

use crate::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// A player left the ground
    Jump,
    /// A bullet or bomb was fired
    Fire,
    /// A player took damage
    Hurt,
    /// A player's health ran out
    Death,
    /// A pickup was collected
    PowerUp,
}

impl SoundEffect {
    /// Logical asset path handed to the sink
    pub fn asset_path(self) -> &'static str {
        match self {
            SoundEffect::Jump => "assets/jump.wav",
            SoundEffect::Fire => "assets/fireball.wav",
            SoundEffect::Hurt => "assets/hit.wav",
            SoundEffect::Death => "assets/death.wav",
            SoundEffect::PowerUp => "assets/powerup.wav",
        }
    }

    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped(_) => Some(SoundEffect::Jump),
            GameEvent::Fired { .. } => Some(SoundEffect::Fire),
            GameEvent::Hurt(_) => Some(SoundEffect::Hurt),
            GameEvent::Died(_) => Some(SoundEffect::Death),
            GameEvent::PowerUp { .. } => Some(SoundEffect::PowerUp),
            GameEvent::MatchStarted { .. }
            | GameEvent::EnemySpawned
            | GameEvent::PickupSpawned
            | GameEvent::Reset => None,
        }
    }
}

/// Something that can play a sound asset
pub trait AudioSink {
    /// Fire and forget; no completion callback
    fn play(&mut self, asset: &str, volume: f32);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, asset: &str, volume: f32) {
        log::debug!("play {asset} at {volume:.2}");
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Option<Box<dyn AudioSink>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self {
            sink: None,
            master_volume: 0.0,
            sfx_volume: 0.0,
            muted: true,
        }
    }
}

impl AudioManager {
    pub fn new(sink: impl AudioSink + 'static) -> Self {
        let defaults = Settings::default();
        Self {
            sink: Some(Box::new(sink)),
            master_volume: defaults.master_volume,
            sfx_volume: defaults.sfx_volume,
            muted: defaults.muted,
        }
    }

    /// No output device was found; same as `default()` but says so
    pub fn silent() -> Self {
        log::warn!("No audio sink - audio disabled");
        Self::default()
    }

    /// Take volume and mute from player settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(sink) = &mut self.sink else { return };
        sink.play(effect.asset_path(), vol);
    }

    /// Play whatever this frame's events call for
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}
