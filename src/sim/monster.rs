//! The projectile-throwing monster
//!
//! Every spawn interval the monster launches a volley of `spawn_rate`
//! projectiles, one per emission point round-robin, each aimed at where the
//! character stands at that instant. The volley grows by one per spawn
//! event up to the cap.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::assets::ModelHandle;
use super::geometry::BoundingSphere;
use super::projectile::Projectile;
use super::state::GameState;
use crate::Millis;
use crate::tuning::Tuning;

/// Bones whose name contains this marker are emission points
pub const EMISSION_BONE_MARKER: &str = "Stalk";

/// An animated stalk bone of the monster model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StalkBone {
    pub handle: u32,
    pub scale: f32,
}

/// The stalk whose scale is strictly larger than every other, if any
fn pick_big_stalk(stalks: &[StalkBone]) -> Option<u32> {
    let biggest = stalks.iter().map(|s| s.scale).fold(f32::NEG_INFINITY, f32::max);
    let mut at_max = stalks.iter().filter(|s| s.scale == biggest);
    match (at_max.next(), at_max.next()) {
        (Some(stalk), None) if stalks.len() > 1 => Some(stalk.handle),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub pos: Vec3,
    /// Aiming origins in world space
    pub emission_points: Vec<Vec3>,
    /// Stalk bones the wave animation drives, in model order
    pub stalks: Vec<StalkBone>,
    /// Handle of the stalk that swings widest
    pub big_stalk: Option<u32>,
    /// Projectiles per volley; grows by one per spawn event
    pub spawn_rate: u32,
    pub spawn_cap: u32,
    pub spawn_interval_ms: Millis,
    pub last_spawn: Millis,
    /// Live projectiles in launch order
    pub projectiles: Vec<Projectile>,
    projectile_speed: f32,
    projectile_radius: f32,
    projectile_range: f32,
    next_projectile_id: u32,
}

impl Monster {
    pub fn new(pos: Vec3, emission_points: Vec<Vec3>, tuning: &Tuning, now: Millis) -> Self {
        Self {
            pos,
            emission_points,
            stalks: Vec::new(),
            big_stalk: None,
            spawn_rate: 1,
            spawn_cap: tuning.spawn_cap.max(1),
            spawn_interval_ms: tuning.spawn_interval_ms,
            last_spawn: now,
            projectiles: Vec::new(),
            projectile_speed: tuning.projectile_speed,
            projectile_radius: tuning.projectile_radius,
            projectile_range: tuning.projectile_range,
            next_projectile_id: 1,
        }
    }

    /// Build from a delivered model: stalk bones become emission points,
    /// falling back to the tuning offsets when the model has none.
    pub fn from_model(model: &ModelHandle, tuning: &Tuning, now: Millis) -> Self {
        let stalk_bones: Vec<_> = model
            .bones
            .iter()
            .filter(|b| b.name.contains(EMISSION_BONE_MARKER))
            .collect();
        let stalks: Vec<StalkBone> = stalk_bones
            .iter()
            .map(|b| StalkBone {
                handle: b.handle,
                scale: b.scale,
            })
            .collect();
        let mut points: Vec<Vec3> = stalk_bones.iter().map(|b| b.world_position).collect();
        if points.is_empty() {
            log::warn!(
                "Monster model {} has no {} bones, using fallback emission points",
                model.id,
                EMISSION_BONE_MARKER
            );
            points = tuning.fallback_emission_points();
        }
        let mut monster = Self::new(tuning.monster_position(), points, tuning, now);
        monster.big_stalk = pick_big_stalk(&stalks);
        monster.stalks = stalks;
        monster
    }

    /// True once a full interval has passed since the last volley
    #[inline]
    pub fn spawn_due(&self, now: Millis) -> bool {
        now.saturating_sub(self.last_spawn) >= self.spawn_interval_ms
    }

    /// Launch `spawn_rate` projectiles at `target`, cycling emission points.
    /// Returns the number launched.
    pub fn throw_volley(&mut self, target: Vec3) -> u32 {
        if self.emission_points.is_empty() {
            return 0;
        }
        for i in 0..self.spawn_rate as usize {
            let origin = self.emission_points[i % self.emission_points.len()];
            let id = self.next_projectile_id;
            self.next_projectile_id += 1;
            self.projectiles.push(Projectile::aimed(
                id,
                origin,
                target,
                self.projectile_speed,
                self.projectile_radius,
            ));
        }
        self.spawn_rate
    }

    /// Spawn if due, then fly every live projectile one tick.
    ///
    /// Without a target the spawn timer is left pending, so the first volley
    /// fires on the first tick a character exists.
    pub fn update(&mut self, now: Millis, target: Option<Vec3>, state: &mut GameState) {
        if let Some(target) = target.filter(|_| self.spawn_due(now)) {
            let count = self.throw_volley(target);
            if count > 0 {
                state.register_volley(count);
                log::debug!("Volley of {} at {}ms", count, now);
            }
            self.spawn_rate = (self.spawn_rate + 1).min(self.spawn_cap);
            self.last_spawn = now;
        }

        for projectile in &mut self.projectiles {
            projectile.advance();
        }
        let range = self.projectile_range;
        self.projectiles.retain(|p| !p.is_spent(range));
    }

    /// Test every live projectile against `target`. Each hit costs a life
    /// and removes the projectile. Returns the number of hits.
    pub fn check_collisions(&mut self, target: &BoundingSphere, state: &mut GameState) -> u32 {
        let mut hits = 0;
        for projectile in &mut self.projectiles {
            if projectile.check_collision(target) {
                state.register_hit(projectile.id);
                hits += 1;
            }
        }
        self.projectiles.retain(|p| !p.has_collided);
        hits
    }
}
