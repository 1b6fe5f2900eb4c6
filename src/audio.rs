//! Feedback sounds
//!
//! Fire-and-forget: the manager hands effects to a backend and logs any
//! failure. Nothing here reports back into the simulation.

use thiserror::Error;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Projectile struck the character
    Hit,
    /// Character left the ground
    Jump,
    /// Monster launched a volley
    Volley,
    /// Session ended
    GameOver,
}

impl SoundEffect {
    /// Effect for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Hit { .. } => Some(SoundEffect::Hit),
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::Volley { .. } => Some(SoundEffect::Volley),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::CharacterReady | GameEvent::MonsterReady => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device unavailable")]
    Unavailable,
    #[error("failed to play {effect:?}: {reason}")]
    Playback { effect: SoundEffect, reason: String },
}

/// Something that can actually make noise
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
}

/// Backend for headless runs: logs what would have played
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        log::debug!("sfx {:?} at volume {:.2}", effect, volume);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    failures: u32,
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            failures: 0,
        }
    }

    /// Manager with volumes taken from settings
    pub fn with_settings(backend: Option<Box<dyn AudioBackend>>, settings: &Settings) -> Self {
        let mut manager = Self::new(backend);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_muted(settings.muted);
        manager
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

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Playback failures seen so far
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Play a sound effect. Failures are logged and otherwise ignored.
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if let Err(e) = backend.play(effect, vol) {
            self.failures += 1;
            log::warn!("Audio: {}", e);
        }
    }
}
