//! Frame driver
//!
//! Runs one simulation tick per displayed frame and forwards what happened
//! to the collaborators outside the simulation: audio, the HUD and whoever
//! ends the session. The terminal signal goes out exactly once, after which
//! the loop is stopped.

use crate::Millis;
use crate::audio::{AudioManager, SoundEffect};
use crate::settings::Settings;
use crate::sim::{
    GameEvent, HudSnapshot, Loaders, StopHandle, TerminalReason, TickInput, TickReport, World, tick,
};

/// Receives the HUD values after every simulated frame
pub trait HudSink {
    fn refresh(&mut self, hud: &HudSnapshot);
}

/// Receives the end of the session
pub trait TerminationSink {
    fn game_over(&mut self, reason: TerminalReason, hud: &HudSnapshot);
}

pub struct Game {
    world: World,
    stop: StopHandle,
    audio: AudioManager,
    hud: Box<dyn HudSink>,
    termination: Box<dyn TerminationSink>,
    frames: u64,
    terminal_sent: bool,
}

impl Game {
    /// Start a session at `now`. The returned loaders resolve the models.
    pub fn new(
        settings: &Settings,
        now: Millis,
        audio: AudioManager,
        hud: Box<dyn HudSink>,
        termination: Box<dyn TerminationSink>,
    ) -> (Self, Loaders) {
        let (world, loaders) = World::new(settings.tuning.clone(), now);
        let game = Self {
            world,
            stop: StopHandle::new(),
            audio,
            hud,
            termination,
            frames: 0,
            terminal_sent: false,
        };
        (game, loaders)
    }

    /// Run one frame
    pub fn frame(&mut self, input: &TickInput, now: Millis) -> TickReport {
        let report = tick(&mut self.world, input, now, &self.stop);
        if !report.ran {
            return report;
        }
        self.frames += 1;

        for event in &report.events {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.audio.play(effect);
            }
            if let GameEvent::GameOver { reason } = event {
                self.finish(*reason, &report.hud);
            }
        }

        self.hud.refresh(&report.hud);
        report
    }

    fn finish(&mut self, reason: TerminalReason, hud: &HudSnapshot) {
        if self.terminal_sent {
            return;
        }
        self.terminal_sent = true;
        self.stop.stop();
        self.termination.game_over(reason, hud);
    }

    /// Handle for cancelling the loop from outside
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// True once stopped, either by game over or by the stop handle
    pub fn is_finished(&self) -> bool {
        self.stop.is_stopped()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn world(&self) -> &World {
        &self.world
    }
}
