//! Player character controller
//!
//! Two motion states:
//! - `Grounded`: gravity accumulates, and contact with the platform snaps the
//!   character onto its top surface every tick.
//! - `Airborne`: vertical velocity follows a fixed up-then-down arc over the
//!   jump duration. Landing is timer-driven: the state returns to `Grounded`
//!   when the arc completes, whatever the altitude.
//!
//! Position integrates the velocity left by the previous tick, so the jump
//! seed carries the first airborne frame and the arc trails by one frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, BoundingSphere};
use super::platform::Platform;
use super::rig::Rig;
use crate::Millis;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionState {
    Grounded,
    Airborne { started_at: Millis },
}

/// Held movement keys for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementIntent {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub backward: bool,
}

impl MovementIntent {
    pub fn is_active(&self) -> bool {
        self.left || self.right || self.forward || self.backward
    }

    /// Planar (x, z) velocity for this intent.
    ///
    /// Each axis takes one flag of its pair: right over left, backward over
    /// forward. Forward is toward -z (the monster).
    pub fn planar_velocity(&self, speed: f32) -> (f32, f32) {
        let x = if self.right {
            speed
        } else if self.left {
            -speed
        } else {
            0.0
        };
        let z = if self.backward {
            speed
        } else if self.forward {
            -speed
        } else {
            0.0
        };
        (x, z)
    }
}

/// Phase reported to the external animator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpPhase {
    Grounded,
    Ascending,
    Descending,
}

/// Per-tick state an external animator consumes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationState {
    pub phase: JumpPhase,
    /// Jump progress in [0, 1] while airborne
    pub jump_progress: Option<f32>,
    /// Any movement key applied this tick
    pub moving: bool,
}

/// Movement constants the controller reads every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterParams {
    pub move_speed: f32,
    pub gravity: f32,
    pub ground_stick_velocity: f32,
    pub jump_seed_velocity: f32,
    pub jump_peak_velocity: f32,
    pub jump_duration_ms: Millis,
}

impl CharacterParams {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            move_speed: tuning.move_speed,
            gravity: tuning.gravity,
            ground_stick_velocity: tuning.ground_stick_velocity,
            jump_seed_velocity: tuning.jump_seed_velocity,
            jump_peak_velocity: tuning.jump_peak_velocity,
            jump_duration_ms: tuning.jump_duration_ms.max(1),
        }
    }
}

impl Default for CharacterParams {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}

/// Vertical velocity of the jump arc at `progress` (clamped to [0, 1])
///
/// Falls linearly from `peak` to zero over the first half, then from zero
/// to `-peak` over the second half.
pub fn jump_velocity(progress: f32, peak: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    if p < 0.5 {
        peak * (1.0 - p * 2.0)
    } else {
        -peak * (p * 2.0 - 1.0)
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub pos: Vec3,
    pub vel: Vec3,
    pub motion: MotionState,
    pub rig: Rig,
    extents: Vec3,
    moving: bool,
    /// Snapped onto the platform by the last update
    supported: bool,
    params: CharacterParams,
}

impl Character {
    pub fn new(spawn: Vec3, extents: Vec3, params: CharacterParams, rig: Rig) -> Self {
        Self {
            pos: spawn,
            vel: Vec3::ZERO,
            motion: MotionState::Grounded,
            rig,
            extents,
            moving: false,
            supported: false,
            params,
        }
    }

    #[inline]
    pub fn params(&self) -> &CharacterParams {
        &self.params
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.extents.y / 2.0
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        matches!(self.motion, MotionState::Airborne { .. })
    }

    /// Collision box at the current position
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_extents(self.pos, self.extents)
    }

    /// Box used for platform contact: the current box swept down by this
    /// tick's downward speed, so resting contact survives f32 rounding and a
    /// fast fall cannot skip through the surface.
    pub fn contact_bounds(&self) -> Aabb {
        self.bounds().extend_down(-self.vel.y)
    }

    /// Sphere projectiles are tested against
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.pos, self.extents.x * 0.5)
    }

    /// Height of the center when standing on `platform`
    pub fn rest_height(&self, platform: &Platform) -> f32 {
        platform.top() + self.half_height()
    }

    pub fn touches_platform(&self, platform: &Platform) -> bool {
        self.contact_bounds().intersects(platform.bounds())
    }

    /// Standing on the platform: the footprint is over it, and the last
    /// update snapped onto the surface or the unswept box meets it.
    pub fn stands_on(&self, platform: &Platform) -> bool {
        let bounds = self.bounds();
        let surface = platform.bounds();
        bounds.footprint_overlaps(surface) && (self.supported || bounds.intersects(surface))
    }

    /// Zero horizontal and depth velocity ahead of fresh input
    pub fn halt_planar(&mut self) {
        self.vel.x = 0.0;
        self.vel.z = 0.0;
    }

    pub fn apply_intent(&mut self, intent: &MovementIntent) {
        let (vx, vz) = intent.planar_velocity(self.params.move_speed);
        self.vel.x = vx;
        self.vel.z = vz;
        self.moving = intent.is_active();
    }

    /// Start a jump. No-op unless grounded and standing on the platform.
    pub fn try_jump(&mut self, platform: &Platform, now: Millis) -> bool {
        if self.is_jumping() || !self.stands_on(platform) {
            return false;
        }
        self.motion = MotionState::Airborne { started_at: now };
        self.supported = false;
        self.vel.y = self.params.jump_seed_velocity;
        log::debug!("Jump at {}ms from y={:.3}", now, self.pos.y);
        true
    }

    /// Raw jump progress (may exceed 1.0 before the landing tick runs)
    pub fn jump_progress(&self, now: Millis) -> Option<f32> {
        match self.motion {
            MotionState::Grounded => None,
            MotionState::Airborne { started_at } => Some(
                now.saturating_sub(started_at) as f32 / self.params.jump_duration_ms as f32,
            ),
        }
    }

    /// Advance vertical motion and integrate position by one tick
    pub fn update(&mut self, platform: &Platform, now: Millis) {
        let mut resting = false;
        if self.motion == MotionState::Grounded {
            self.vel.y += self.params.gravity;
            if self.vel.y <= 0.0 && self.touches_platform(platform) {
                self.vel.y = self.params.ground_stick_velocity;
                resting = true;
            }
        }

        self.pos.x += self.vel.x;
        self.pos.z += self.vel.z;
        self.pos.y = if resting {
            self.rest_height(platform)
        } else {
            self.pos.y + self.vel.y
        };
        self.supported = resting;

        // Arc velocity for the next tick
        if let Some(progress) = self.jump_progress(now) {
            self.vel.y = jump_velocity(progress, self.params.jump_peak_velocity);
            if progress >= 1.0 {
                self.motion = MotionState::Grounded;
                log::debug!("Jump finished at {}ms, y={:.3}", now, self.pos.y);
            }
        }
    }

    pub fn animation_state(&self, now: Millis) -> AnimationState {
        match self.jump_progress(now) {
            None => AnimationState {
                phase: JumpPhase::Grounded,
                jump_progress: None,
                moving: self.moving,
            },
            Some(p) => AnimationState {
                phase: if p < 0.5 {
                    JumpPhase::Ascending
                } else {
                    JumpPhase::Descending
                },
                jump_progress: Some(p.min(1.0)),
                moving: self.moving,
            },
        }
    }
}
