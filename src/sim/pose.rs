//! Bone rotations for the external animator
//!
//! Turns a character's [`AnimationState`] into x-axis rotations per bone
//! role (only roles bound in the rig are emitted), and waves the monster's
//! stalks about z.

use std::f32::consts::FRAC_PI_4;
use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::character::{AnimationState, JumpPhase};
use super::monster::Monster;
use super::rig::{BoneRole, Rig};
use crate::Millis;

/// Walk cycle angular rate (radians per millisecond)
const WALK_RATE: f64 = 0.005;
const LEG_SWING: f32 = 0.5;
const ARM_SWING: f32 = 0.3;
/// Stalk wave angular rate (radians per millisecond)
const WAVE_RATE: f64 = 0.001;
const WAVE_SWING: f32 = 1.0;
const BIG_STALK_SWING: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoneRotation {
    pub role: BoneRole,
    pub handle: u32,
    /// Rotation about the local x axis (radians)
    pub rotation_x: f32,
}

/// One monster stalk's rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StalkRotation {
    pub handle: u32,
    /// Rotation about the local z axis (radians)
    pub rotation_z: f32,
}

/// Cycle angle at `now`, wrapped to [0, 2π)
fn phase(now: Millis, rate: f64) -> f32 {
    ((now as f64 * rate) % TAU) as f32
}

/// Leg tuck angle over the jump: sweeps to -π/4 at the apex and back
fn jump_leg_angle(progress: f32) -> f32 {
    if progress < 0.5 {
        -FRAC_PI_4 * progress * 2.0
    } else {
        -FRAC_PI_4 * (1.0 - (progress - 0.5) * 2.0)
    }
}

/// Sample the pose for `anim` at `now`.
///
/// Jumping poses legs only, walking swings legs and arms in opposition,
/// standing returns every limb to rest.
pub fn sample(anim: &AnimationState, rig: &Rig, now: Millis) -> Vec<BoneRotation> {
    let t = phase(now, WALK_RATE);

    let targets: [(BoneRole, Option<f32>); 4] = match anim.phase {
        JumpPhase::Ascending | JumpPhase::Descending => {
            let leg = jump_leg_angle(anim.jump_progress.unwrap_or(0.0));
            [
                (BoneRole::LeftLeg, Some(leg)),
                (BoneRole::RightLeg, Some(leg)),
                (BoneRole::LeftArm, None),
                (BoneRole::RightArm, None),
            ]
        }
        JumpPhase::Grounded if anim.moving => [
            (BoneRole::LeftLeg, Some(t.sin() * LEG_SWING)),
            (BoneRole::RightLeg, Some(t.cos() * LEG_SWING)),
            (BoneRole::LeftArm, Some(t.cos() * ARM_SWING)),
            (BoneRole::RightArm, Some(t.sin() * ARM_SWING)),
        ],
        JumpPhase::Grounded => [
            (BoneRole::LeftLeg, Some(0.0)),
            (BoneRole::RightLeg, Some(0.0)),
            (BoneRole::LeftArm, Some(0.0)),
            (BoneRole::RightArm, Some(0.0)),
        ],
    };

    targets
        .into_iter()
        .filter_map(|(role, angle)| {
            Some(BoneRotation {
                role,
                handle: rig.get(role)?,
                rotation_x: angle?,
            })
        })
        .collect()
}

/// Sample the monster's stalk wave at `now`.
///
/// Each stalk trails its predecessor by one radian. The big stalk, if the
/// model has one, swings wider and in phase with the clock.
pub fn sample_stalks(monster: &Monster, now: Millis) -> Vec<StalkRotation> {
    let t = phase(now, WAVE_RATE);
    monster
        .stalks
        .iter()
        .enumerate()
        .map(|(index, stalk)| {
            let rotation_z = if monster.big_stalk == Some(stalk.handle) {
                t.sin() * BIG_STALK_SWING
            } else {
                -(t + index as f32).sin() * WAVE_SWING
            };
            StalkRotation {
                handle: stalk.handle,
                rotation_z,
            }
        })
        .collect()
}
