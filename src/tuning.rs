//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads. Defaults come from
//! [`crate::consts`]; any field missing from a settings file keeps its default.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::SettingsError;
use crate::{Millis, vec3};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Character ===
    pub move_speed: f32,
    pub gravity: f32,
    pub ground_stick_velocity: f32,
    pub jump_seed_velocity: f32,
    pub jump_peak_velocity: f32,
    pub jump_duration_ms: Millis,
    pub character_extents: [f32; 3],
    pub character_spawn: [f32; 3],

    // === Level ===
    pub platform_center: [f32; 3],
    pub platform_extents: [f32; 3],
    pub out_of_bounds_y: f32,

    // === Monster ===
    pub monster_position: [f32; 3],
    pub spawn_interval_ms: Millis,
    pub spawn_cap: u32,
    /// Emission points relative to the monster, used when its model has no stalk bones
    pub emission_offsets: Vec<[f32; 3]>,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    pub projectile_range: f32,

    // === Session ===
    pub starting_lives: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            gravity: GRAVITY,
            ground_stick_velocity: GROUND_STICK_VELOCITY,
            jump_seed_velocity: JUMP_SEED_VELOCITY,
            jump_peak_velocity: JUMP_PEAK_VELOCITY,
            jump_duration_ms: JUMP_DURATION_MS,
            character_extents: CHARACTER_EXTENTS,
            character_spawn: CHARACTER_SPAWN,

            platform_center: PLATFORM_CENTER,
            platform_extents: PLATFORM_EXTENTS,
            out_of_bounds_y: OUT_OF_BOUNDS_Y,

            monster_position: MONSTER_POSITION,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            spawn_cap: SPAWN_CAP,
            // Five stalks fanned across the monster's crown
            emission_offsets: vec![
                [-3.0, 2.0, 0.5],
                [-1.5, 3.0, 0.5],
                [0.0, 3.5, 0.5],
                [1.5, 3.0, 0.5],
                [3.0, 2.0, 0.5],
            ],

            projectile_speed: PROJECTILE_SPEED,
            projectile_radius: PROJECTILE_RADIUS,
            projectile_range: PROJECTILE_RANGE,

            starting_lives: STARTING_LIVES,
        }
    }
}

impl Tuning {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: &str| Err(SettingsError::Invalid(msg.to_string()));

        if self.jump_duration_ms == 0 {
            return invalid("jump_duration_ms must be positive");
        }
        if self.spawn_interval_ms == 0 {
            return invalid("spawn_interval_ms must be positive");
        }
        if self.spawn_cap == 0 {
            return invalid("spawn_cap must be at least 1");
        }
        if self.starting_lives == 0 {
            return invalid("starting_lives must be at least 1");
        }
        if self.character_extents.iter().any(|e| *e <= 0.0) {
            return invalid("character_extents must be positive");
        }
        if self.platform_extents.iter().any(|e| *e <= 0.0) {
            return invalid("platform_extents must be positive");
        }
        if self.projectile_speed <= 0.0 || self.projectile_radius <= 0.0 {
            return invalid("projectile speed and radius must be positive");
        }
        Ok(())
    }

    #[inline]
    pub fn character_extents(&self) -> Vec3 {
        vec3(self.character_extents)
    }

    #[inline]
    pub fn character_spawn(&self) -> Vec3 {
        vec3(self.character_spawn)
    }

    #[inline]
    pub fn monster_position(&self) -> Vec3 {
        vec3(self.monster_position)
    }

    /// Fallback emission points in world space
    pub fn fallback_emission_points(&self) -> Vec<Vec3> {
        let origin = self.monster_position();
        self.emission_offsets.iter().map(|o| origin + vec3(*o)).collect()
    }
}
