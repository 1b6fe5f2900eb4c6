//! Game state and session outcome
//!
//! Lives, the session clock, the terminal outcome and the events raised
//! during the current tick.

use serde::{Deserialize, Serialize};

use crate::Millis;

/// Why the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalReason {
    LivesDepleted,
    OutOfBounds,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Character model not delivered yet
    Loading,
    /// Active gameplay
    Playing,
    /// Session ended
    GameOver(TerminalReason),
}

/// Something collaborators outside the simulation may react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CharacterReady,
    MonsterReady,
    Jumped,
    /// The monster launched a volley of `count` projectiles
    Volley { count: u32 },
    /// A projectile struck the character
    Hit { projectile: u32, lives_left: u8 },
    /// Raised exactly once per session
    GameOver { reason: TerminalReason },
}

/// What the HUD shows each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub lives: u8,
    pub elapsed_secs: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Player lives, never below zero
    pub lives: u8,
    /// Session start timestamp
    pub started_at: Millis,
    /// Milliseconds since session start
    pub elapsed_ms: Millis,
    /// Projectiles that struck the character
    pub hits: u32,
    /// Volleys launched by the monster
    pub volleys: u32,
    outcome: Option<TerminalReason>,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(lives: u8, started_at: Millis) -> Self {
        Self {
            lives,
            started_at,
            elapsed_ms: 0,
            hits: 0,
            volleys: 0,
            outcome: None,
            events: Vec::new(),
        }
    }

    /// Advance the session clock; never runs backwards
    pub fn update_clock(&mut self, now: Millis) {
        self.elapsed_ms = self.elapsed_ms.max(now.saturating_sub(self.started_at));
    }

    #[inline]
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_ms as f32 / 1000.0
    }

    #[inline]
    pub fn outcome(&self) -> Option<TerminalReason> {
        self.outcome
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Record a projectile hit. Ends the session when the last life goes.
    pub fn register_hit(&mut self, projectile: u32) {
        self.lives = self.lives.saturating_sub(1);
        self.hits += 1;
        self.push_event(GameEvent::Hit {
            projectile,
            lives_left: self.lives,
        });
        log::debug!("Hit by projectile {}, {} lives left", projectile, self.lives);
        if self.lives == 0 {
            self.end(TerminalReason::LivesDepleted);
        }
    }

    pub fn register_volley(&mut self, count: u32) {
        self.volleys += 1;
        self.push_event(GameEvent::Volley { count });
    }

    /// End the session. Only the first call has any effect.
    pub fn end(&mut self, reason: TerminalReason) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        self.outcome = Some(reason);
        self.push_event(GameEvent::GameOver { reason });
        log::info!(
            "Game over ({:?}) after {:.1}s, {} hits",
            reason,
            self.elapsed_secs(),
            self.hits
        );
        true
    }

    /// Terminal checks run at the end of a tick
    pub fn check_terminal(&mut self, character_y: Option<f32>, floor_y: f32) {
        if character_y.is_some_and(|y| y < floor_y) {
            self.end(TerminalReason::OutOfBounds);
        }
        if self.lives == 0 {
            self.end(TerminalReason::LivesDepleted);
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            lives: self.lives,
            elapsed_secs: self.elapsed_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_life_ends_session_once() {
        let mut state = GameState::new(1, 0);
        state.register_hit(9);
        assert_eq!(state.lives, 0);
        assert_eq!(state.outcome(), Some(TerminalReason::LivesDepleted));

        state.register_hit(10);
        state.check_terminal(Some(-10.0), -3.0);
        assert_eq!(state.lives, 0);
        assert_eq!(state.outcome(), Some(TerminalReason::LivesDepleted));

        let game_overs = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_falling_below_floor_ends_session() {
        let mut state = GameState::new(3, 0);
        state.check_terminal(Some(-2.9), -3.0);
        assert!(!state.is_over());
        state.check_terminal(Some(-5.0), -3.0);
        assert_eq!(state.outcome(), Some(TerminalReason::OutOfBounds));
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_missing_character_is_not_out_of_bounds() {
        let mut state = GameState::new(3, 0);
        state.check_terminal(None, -3.0);
        assert!(!state.is_over());
    }

    #[test]
    fn test_clock_and_hud() {
        let mut state = GameState::new(3, 1_000);
        state.update_clock(3_500);
        assert_eq!(state.elapsed_ms, 2_500);
        state.update_clock(2_000);
        assert_eq!(state.elapsed_ms, 2_500);
        assert_eq!(
            state.hud(),
            HudSnapshot {
                lives: 3,
                elapsed_secs: 2.5
            }
        );
    }

    #[test]
    fn test_drain_clears_events() {
        let mut state = GameState::new(3, 0);
        state.register_volley(2);
        assert_eq!(state.drain_events(), vec![GameEvent::Volley { count: 2 }]);
        assert!(state.drain_events().is_empty());
        assert_eq!(state.volleys, 1);
    }
}
